//! Mentions vs. sentiment statistics

use crate::grouping::group_by_symbol;
use crate::record::SentimentRecord;
use serde::Serialize;

/// Colour band of a symbol's mean sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SentimentTone {
    #[serde(rename = "BULLISH")]
    Bullish,
    #[serde(rename = "NEUTRAL")]
    Neutral,
    #[serde(rename = "BEARISH")]
    Bearish,
}

impl SentimentTone {
    pub fn from_mean(avg: f64) -> Self {
        if avg > 0.1 {
            SentimentTone::Bullish
        } else if avg < -0.1 {
            SentimentTone::Bearish
        } else {
            SentimentTone::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub symbol: String,
    pub coin_name: String,
    pub mentions: usize,
    pub avg_sentiment: f64,
    /// Population standard deviation (divides by n).
    pub std_dev: f64,
    pub tone: SentimentTone,
}

/// One point per symbol, in order of first appearance. No truncation.
pub fn scatter_stats(records: &[SentimentRecord]) -> Vec<ScatterPoint> {
    group_by_symbol(records)
        .into_iter()
        .map(|group| {
            let n = group.len() as f64;
            let avg = group.mean();
            let variance = group.sentiments().map(|v| (v - avg).powi(2)).sum::<f64>() / n;

            // Display name of the newest record; first one wins on equal timestamps
            let coin_name = group
                .records
                .iter()
                .copied()
                .fold(None::<&SentimentRecord>, |newest, r| match newest {
                    Some(best) if best.date >= r.date => Some(best),
                    _ => Some(r),
                })
                .map(|r| r.coin_name.clone())
                .unwrap_or_default();

            ScatterPoint {
                symbol: group.symbol.to_string(),
                coin_name,
                mentions: group.len(),
                avg_sentiment: avg,
                std_dev: variance.sqrt(),
                tone: SentimentTone::from_mean(avg),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn create_test_record(symbol: &str, sentiment: f64) -> SentimentRecord {
        SentimentRecord::new(
            symbol,
            "Coin",
            sentiment,
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_batch() {
        assert!(scatter_stats(&[]).is_empty());
    }

    #[test]
    fn test_single_record_std_dev_is_zero() {
        let points = scatter_stats(&[create_test_record("LINK", 0.37)]);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].std_dev, 0.0);
        assert_eq!(points[0].mentions, 1);
    }

    #[test]
    fn test_population_std_dev() {
        let records = vec![
            create_test_record("BTC", 0.5),
            create_test_record("BTC", -0.5),
            create_test_record("ETH", 0.2),
        ];

        let points = scatter_stats(&records);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].symbol, "BTC");
        assert_eq!(points[0].avg_sentiment, 0.0);
        // Sample std-dev would be ~0.707
        assert_eq!(points[0].std_dev, 0.5);
        assert_eq!(points[0].tone, SentimentTone::Neutral);
        assert_eq!(points[1].tone, SentimentTone::Bullish);
    }

    #[test]
    fn test_coin_name_from_newest_record() {
        let old = SentimentRecord::new(
            "MATIC",
            "Matic Network",
            0.1,
            Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
        )
        .unwrap();
        let new = SentimentRecord::new(
            "MATIC",
            "Polygon",
            0.1,
            Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
        )
        .unwrap();

        let points = scatter_stats(&[new, old]);
        assert_eq!(points[0].coin_name, "Polygon");
    }

    #[test]
    fn test_tone_bands() {
        assert_eq!(SentimentTone::from_mean(0.11), SentimentTone::Bullish);
        assert_eq!(SentimentTone::from_mean(0.1), SentimentTone::Neutral);
        assert_eq!(SentimentTone::from_mean(-0.2), SentimentTone::Bearish);
    }
}
