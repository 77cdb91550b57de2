//! Hourly mean-sentiment series per symbol

use super::bucket::BucketSize;
use crate::grouping::{group_by_symbol, mean, round_to, top_by_mentions};
use crate::record::SentimentRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

pub const DEFAULT_TRENDS_TOP_N: usize = 10;

/// One hour bucket. A symbol with no records in the hour maps to `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyPoint {
    pub hour: String,
    pub start: DateTime<Utc>,
    pub values: BTreeMap<String, Option<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HourlySeries {
    /// Series order for the chart legend.
    pub symbols: Vec<String>,
    /// Ascending by hour.
    pub points: Vec<HourlyPoint>,
}

impl HourlySeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Values of one symbol across all hours, gaps included.
    pub fn series(&self, symbol: &str) -> Vec<Option<f64>> {
        self.points
            .iter()
            .map(|p| p.values.get(symbol).copied().flatten())
            .collect()
    }
}

/// Mean sentiment per (hour, symbol), rounded to 3 decimals.
///
/// With `symbols_of_interest` unset or empty, the `top_n` most mentioned
/// symbols are charted. Requested symbols absent from the batch are skipped.
pub fn hourly_time_series(
    records: &[SentimentRecord],
    symbols_of_interest: Option<&[String]>,
    top_n: usize,
) -> HourlySeries {
    let groups = group_by_symbol(records);
    let present: HashSet<&str> = groups.iter().map(|g| g.symbol).collect();

    let symbols: Vec<String> = match symbols_of_interest {
        Some(requested) if !requested.is_empty() => {
            let mut seen = HashSet::new();
            requested
                .iter()
                .filter(|s| present.contains(s.as_str()))
                .filter(|s| seen.insert(s.as_str()))
                .cloned()
                .collect()
        }
        _ => top_by_mentions(&groups, top_n)
            .into_iter()
            .map(String::from)
            .collect(),
    };

    let selected: HashSet<&str> = symbols.iter().map(|s| s.as_str()).collect();

    let mut buckets: BTreeMap<DateTime<Utc>, HashMap<&str, Vec<f64>>> = BTreeMap::new();
    for record in records.iter().filter(|r| selected.contains(r.symbol.as_str())) {
        buckets
            .entry(BucketSize::Hour.truncate(&record.date))
            .or_default()
            .entry(record.symbol.as_str())
            .or_default()
            .push(record.sentiment);
    }

    let points = buckets
        .into_iter()
        .map(|(start, by_symbol)| {
            let values = symbols
                .iter()
                .map(|symbol| {
                    let value = by_symbol
                        .get(symbol.as_str())
                        .and_then(|v| mean(v.iter().copied()))
                        .map(|m| round_to(m, 3));
                    (symbol.clone(), value)
                })
                .collect();
            HourlyPoint {
                hour: BucketSize::Hour.label(&start),
                start,
                values,
            }
        })
        .collect();

    HourlySeries { symbols, points }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn create_test_record(symbol: &str, sentiment: f64, hour: u32, minute: u32) -> SentimentRecord {
        SentimentRecord::new(
            symbol,
            symbol,
            sentiment,
            Utc.with_ymd_and_hms(2024, 5, 1, hour, minute, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_batch() {
        let series = hourly_time_series(&[], None, DEFAULT_TRENDS_TOP_N);
        assert!(series.is_empty());
        assert!(series.symbols.is_empty());
    }

    #[test]
    fn test_hourly_means_and_gaps() {
        let records = vec![
            create_test_record("BTC", 0.2, 10, 5),
            create_test_record("BTC", 0.4, 10, 55),
            create_test_record("ETH", -0.3, 11, 0),
            create_test_record("BTC", 0.1, 12, 30),
        ];

        let series = hourly_time_series(&records, None, DEFAULT_TRENDS_TOP_N);
        let hours: Vec<&str> = series.points.iter().map(|p| p.hour.as_str()).collect();
        assert_eq!(hours, vec!["2024-05-01 10:00", "2024-05-01 11:00", "2024-05-01 12:00"]);

        assert_eq!(series.series("BTC"), vec![Some(0.3), None, Some(0.1)]);
        assert_eq!(series.series("ETH"), vec![None, Some(-0.3), None]);
    }

    #[test]
    fn test_top_n_by_mentions() {
        let records = vec![
            create_test_record("DOGE", 0.1, 9, 0),
            create_test_record("BTC", 0.1, 9, 0),
            create_test_record("BTC", 0.1, 10, 0),
            create_test_record("ADA", 0.1, 11, 0),
        ];

        let series = hourly_time_series(&records, None, 2);
        assert_eq!(series.symbols, vec!["BTC", "ADA"]);
        // DOGE's only hour holds BTC data too, so hour 9 survives
        assert_eq!(series.points.len(), 3);
        assert!(series.points[0].values.get("DOGE").is_none());
    }

    #[test]
    fn test_symbols_of_interest() {
        let records = vec![
            create_test_record("BTC", 0.1, 9, 0),
            create_test_record("ETH", 0.5, 9, 0),
        ];
        let wanted = vec!["ETH".to_string(), "XRP".to_string(), "ETH".to_string()];

        let series = hourly_time_series(&records, Some(&wanted), DEFAULT_TRENDS_TOP_N);
        assert_eq!(series.symbols, vec!["ETH"]);
        assert_eq!(series.series("ETH"), vec![Some(0.5)]);
    }

    #[test]
    fn test_rounds_to_three_decimals() {
        let records = vec![
            create_test_record("SOL", 0.1, 9, 0),
            create_test_record("SOL", 0.2, 9, 0),
            create_test_record("SOL", 0.2, 9, 0),
        ];

        let series = hourly_time_series(&records, None, DEFAULT_TRENDS_TOP_N);
        assert_eq!(series.series("SOL"), vec![Some(0.167)]);
    }

    #[test]
    fn test_idempotent() {
        let records = vec![
            create_test_record("BTC", 0.13, 9, 0),
            create_test_record("ETH", -0.7, 10, 0),
        ];

        let first = hourly_time_series(&records, None, 5);
        let second = hourly_time_series(&records, None, 5);
        assert_eq!(first, second);
    }
}
