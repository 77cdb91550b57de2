//! Daily per-symbol sentiment grid

use super::bucket::BucketSize;
use crate::grouping::{group_by_symbol, mean, round_to, top_by_mentions};
use crate::record::SentimentRecord;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

pub const DEFAULT_HEATMAP_TOP_N: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapCell {
    pub date_index: usize,
    pub symbol_index: usize,
    pub date: String,
    pub symbol: String,
    /// Mean sentiment, 2 decimals.
    pub sentiment: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeatmapGrid {
    pub dates: Vec<String>,
    pub symbols: Vec<String>,
    /// Only (date, symbol) pairs with data; date-major order.
    pub cells: Vec<HeatmapCell>,
}

impl HeatmapGrid {
    pub fn cell(&self, date: &str, symbol: &str) -> Option<f64> {
        self.cells
            .iter()
            .find(|c| c.date == date && c.symbol == symbol)
            .map(|c| c.sentiment)
    }
}

pub fn daily_heatmap_grid(records: &[SentimentRecord], top_n: usize) -> HeatmapGrid {
    let groups = group_by_symbol(records);
    let symbols: Vec<&str> = top_by_mentions(&groups, top_n);
    let symbol_index: HashMap<&str, usize> =
        symbols.iter().enumerate().map(|(i, s)| (*s, i)).collect();

    // ISO dates order lexicographically = chronologically
    let mut by_date: BTreeMap<String, HashMap<&str, Vec<f64>>> = BTreeMap::new();
    for record in records {
        let symbol = record.symbol.as_str();
        if !symbol_index.contains_key(symbol) {
            continue;
        }
        by_date
            .entry(BucketSize::Day.label(&record.date))
            .or_default()
            .entry(symbol)
            .or_default()
            .push(record.sentiment);
    }

    let mut cells = Vec::new();
    for (date_index, (date, per_symbol)) in by_date.iter().enumerate() {
        for (idx, symbol) in symbols.iter().enumerate() {
            let Some(avg) = per_symbol.get(symbol).and_then(|v| mean(v.iter().copied())) else {
                continue;
            };
            cells.push(HeatmapCell {
                date_index,
                symbol_index: idx,
                date: date.clone(),
                symbol: symbol.to_string(),
                sentiment: round_to(avg, 2),
            });
        }
    }

    HeatmapGrid {
        dates: by_date.into_keys().collect(),
        symbols: symbols.into_iter().map(String::from).collect(),
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn create_test_record(symbol: &str, sentiment: f64, day: u32, hour: u32) -> SentimentRecord {
        SentimentRecord::new(
            symbol,
            symbol,
            sentiment,
            Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_batch() {
        let grid = daily_heatmap_grid(&[], DEFAULT_HEATMAP_TOP_N);
        assert!(grid.dates.is_empty());
        assert!(grid.symbols.is_empty());
        assert!(grid.cells.is_empty());
    }

    #[test]
    fn test_daily_cells() {
        let records = vec![
            create_test_record("BTC", 0.123, 2, 8),
            create_test_record("BTC", 0.2, 2, 20),
            create_test_record("ETH", -0.456, 1, 9),
            create_test_record("BTC", 0.5, 1, 10),
        ];

        let grid = daily_heatmap_grid(&records, DEFAULT_HEATMAP_TOP_N);
        assert_eq!(grid.dates, vec!["2024-05-01", "2024-05-02"]);
        assert_eq!(grid.symbols, vec!["BTC", "ETH"]);

        assert_eq!(grid.cell("2024-05-02", "BTC"), Some(0.16));
        assert_eq!(grid.cell("2024-05-01", "ETH"), Some(-0.46));
        assert_eq!(grid.cell("2024-05-02", "ETH"), None);
        assert_eq!(grid.cells.len(), 3);

        let first = &grid.cells[0];
        assert_eq!((first.date_index, first.symbol_index), (0, 0));
    }

    #[test]
    fn test_dates_restricted_to_top_symbols() {
        let records = vec![
            create_test_record("BTC", 0.1, 3, 0),
            create_test_record("BTC", 0.1, 3, 1),
            create_test_record("PEPE", 0.9, 4, 0),
        ];

        let grid = daily_heatmap_grid(&records, 1);
        assert_eq!(grid.symbols, vec!["BTC"]);
        assert_eq!(grid.dates, vec!["2024-05-03"]);
    }

    #[test]
    fn test_cells_round_the_stored_value() {
        let records = vec![
            create_test_record("LINK", 0.075, 3, 0),
            create_test_record("UNI", 0.125, 3, 0),
        ];
        let grid = daily_heatmap_grid(&records, DEFAULT_HEATMAP_TOP_N);
        assert_eq!(grid.cell("2024-05-03", "LINK"), Some(0.07));
        assert_eq!(grid.cell("2024-05-03", "UNI"), Some(0.13));
    }

    #[test]
    fn test_single_record_symbol_participates() {
        let records = vec![create_test_record("ATOM", 0.25, 7, 12)];
        let grid = daily_heatmap_grid(&records, DEFAULT_HEATMAP_TOP_N);
        assert_eq!(grid.cell("2024-05-07", "ATOM"), Some(0.25));
    }
}
