//! Five-number sentiment summaries for the box plot

use crate::grouping::{group_by_symbol, top_by_average};
use crate::record::SentimentRecord;
use serde::Serialize;
use std::collections::HashMap;

pub const DEFAULT_DISTRIBUTION_TOP_N: usize = 15;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPlotSummary {
    pub symbol: String,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub count: usize,
    pub mean: f64,
    /// Raw values, ascending, for the point overlay.
    pub values: Vec<f64>,
}

/// Nearest-rank five-number summary: `sorted[floor(p * n)]`, no interpolation.
///
/// Returns `(min, q1, median, q3, max)`, or `None` for no values.
pub fn five_number_summary(values: &[f64]) -> Option<(f64, f64, f64, f64, f64)> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    let at = |p: f64| sorted[((n as f64 * p).floor() as usize).min(n - 1)];

    Some((sorted[0], at(0.25), at(0.5), at(0.75), sorted[n - 1]))
}

/// Box plots for the `top_n` symbols with the highest mean sentiment,
/// highest first.
pub fn box_plot_summary(records: &[SentimentRecord], top_n: usize) -> Vec<BoxPlotSummary> {
    let groups = group_by_symbol(records);
    let by_symbol: HashMap<&str, _> = groups.iter().map(|g| (g.symbol, g)).collect();

    top_by_average(&groups, top_n)
        .into_iter()
        .filter_map(|symbol| {
            let group = by_symbol.get(symbol)?;
            let values: Vec<f64> = group.sentiments().collect();
            let (min, q1, median, q3, max) = five_number_summary(&values)?;

            let mut sorted = values;
            sorted.sort_by(|a, b| a.total_cmp(b));

            Some(BoxPlotSummary {
                symbol: symbol.to_string(),
                min,
                q1,
                median,
                q3,
                max,
                count: group.len(),
                mean: group.mean(),
                values: sorted,
            })
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
            symbol,
            sentiment,
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_nearest_rank_five_values() {
        let summary = five_number_summary(&[0.4, -0.1, 0.9, -0.5, 0.2]).unwrap();
        assert_eq!(summary, (-0.5, -0.1, 0.2, 0.4, 0.9));
    }

    #[test]
    fn test_nearest_rank_even_count() {
        // n = 4 → indices 1, 2, 3; no averaging of the middle pair
        let summary = five_number_summary(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(summary, (1.0, 2.0, 3.0, 4.0, 4.0));
    }

    #[test]
    fn test_single_value_is_degenerate() {
        let summary = five_number_summary(&[0.3]).unwrap();
        assert_eq!(summary, (0.3, 0.3, 0.3, 0.3, 0.3));
    }

    #[test]
    fn test_empty() {
        assert!(five_number_summary(&[]).is_none());
        assert!(box_plot_summary(&[], DEFAULT_DISTRIBUTION_TOP_N).is_empty());
    }

    #[test]
    fn test_box_plot_ranked_by_average() {
        let mut records = Vec::new();
        for v in [-0.5, -0.1, 0.2, 0.4, 0.9] {
            records.push(create_test_record("BTC", v));
        }
        records.push(create_test_record("ETH", 0.6));
        records.push(create_test_record("DOGE", -0.8));

        let boxes = box_plot_summary(&records, 2);
        let symbols: Vec<&str> = boxes.iter().map(|b| b.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["ETH", "BTC"]);

        let btc = &boxes[1];
        assert_eq!(
            (btc.min, btc.q1, btc.median, btc.q3, btc.max),
            (-0.5, -0.1, 0.2, 0.4, 0.9)
        );
        assert_eq!(btc.count, 5);
        assert_eq!(btc.values, vec![-0.5, -0.1, 0.2, 0.4, 0.9]);

        let eth = &boxes[0];
        assert_eq!((eth.min, eth.q1, eth.median, eth.q3, eth.max), (0.6, 0.6, 0.6, 0.6, 0.6));
    }
}
