//! Symbol grouping and ranking shared by the signal and aggregation engines

use crate::record::SentimentRecord;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Records of one symbol, in the order they appear in the batch.
#[derive(Debug, Clone)]
pub struct SymbolGroup<'a> {
    pub symbol: &'a str,
    pub records: Vec<&'a SentimentRecord>,
}

impl<'a> SymbolGroup<'a> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn sentiments(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.sentiment)
    }

    /// Mean sentiment accumulated in batch order. A group is never empty.
    pub fn mean(&self) -> f64 {
        mean(self.sentiments()).unwrap_or(0.0)
    }
}

/// Group records by symbol, groups ordered by first appearance.
pub fn group_by_symbol(records: &[SentimentRecord]) -> Vec<SymbolGroup<'_>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<SymbolGroup<'_>> = Vec::new();

    for record in records {
        let symbol = record.symbol.as_str();
        match index.get(symbol) {
            Some(&i) => groups[i].records.push(record),
            None => {
                index.insert(symbol, groups.len());
                groups.push(SymbolGroup {
                    symbol,
                    records: vec![record],
                });
            }
        }
    }

    groups
}

/// Arithmetic mean in iteration order, `None` for no values.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values {
        sum += v;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Round the exact binary value half away from zero to `decimals` places,
/// then take the nearest f64 of the rounded decimal.
///
/// `0.075` is stored as `0.07499999…` and rounds to `0.07`; `0.125` is exact
/// and rounds to `0.13`.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }

    // Every f64 fraction terminates within 1074 decimal digits
    let exact = format!("{:.1100}", value.abs());
    let (whole, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let kept = &fraction[..decimals.min(fraction.len())];
    let round_up = fraction.as_bytes().get(decimals).is_some_and(|d| *d >= b'5');

    let Ok(mut scaled) = format!("{}{}", whole, kept).parse::<u128>() else {
        let factor = 10f64.powi(decimals as i32);
        return (value * factor).round() / factor;
    };
    if round_up {
        scaled += 1;
    }
    if scaled == 0 {
        return 0.0;
    }

    let digits = format!("{:0>width$}", scaled, width = decimals + 1);
    let (int_digits, frac_digits) = digits.split_at(digits.len() - decimals);
    let magnitude: f64 = format!("{}.{}0", int_digits, frac_digits)
        .parse()
        .unwrap_or(value.abs());

    if value < 0.0 {
        -magnitude
    } else {
        magnitude
    }
}

/// Top `n` symbols by mention count, ties by symbol.
pub fn top_by_mentions<'a>(groups: &[SymbolGroup<'a>], n: usize) -> Vec<&'a str> {
    let mut ranked: Vec<(&'a str, usize)> = groups.iter().map(|g| (g.symbol, g.len())).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.into_iter().take(n).map(|(symbol, _)| symbol).collect()
}

/// Top `n` symbols by mean sentiment (highest first), ties by symbol.
pub fn top_by_average<'a>(groups: &[SymbolGroup<'a>], n: usize) -> Vec<&'a str> {
    let mut ranked: Vec<(&'a str, f64)> = groups.iter().map(|g| (g.symbol, g.mean())).collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });
    ranked.into_iter().take(n).map(|(symbol, _)| symbol).collect()
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
    fn test_group_by_symbol_first_appearance_order() {
        let records = vec![
            create_test_record("ETH", 0.1),
            create_test_record("BTC", 0.2),
            create_test_record("ETH", 0.3),
        ];

        let groups = group_by_symbol(&records);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].symbol, "ETH");
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[1].symbol, "BTC");
        assert!((groups[0].mean() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(Vec::<f64>::new()), None);
        assert_eq!(mean(vec![0.5, -0.5]), Some(0.0));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.456, 2), 0.46);
        assert_eq!(round_to(-0.454, 2), -0.45);
        assert_eq!(round_to(0.12345, 3), 0.123);
        assert_eq!(round_to(0.5, 0), 1.0);
        assert_eq!(round_to(1.0, 2), 1.0);
    }

    #[test]
    fn test_round_to_uses_exact_binary_value() {
        // 0.075 is 0.07499999999999999722... in binary
        assert_eq!(round_to(0.075, 2), 0.07);
        assert_eq!(round_to(-0.075, 2), -0.07);
        // 1.005 is 1.00499999999999989...
        assert_eq!(round_to(1.005, 2), 1.0);
        // Exact halves go away from zero
        assert_eq!(round_to(0.125, 2), 0.13);
        assert_eq!(round_to(-0.125, 2), -0.13);
        assert_eq!(round_to(0.0625, 3), 0.063);
    }

    #[test]
    fn test_round_to_small_magnitudes() {
        assert_eq!(round_to(0.004, 2), 0.0);
        assert_eq!(round_to(-0.004, 2), 0.0);
        assert_eq!(round_to(0.0005, 3), 0.001);
        assert!(round_to(f64::NAN, 2).is_nan());
    }

    #[test]
    fn test_top_by_mentions_ties_break_on_symbol() {
        let records = vec![
            create_test_record("SOL", 0.1),
            create_test_record("ADA", 0.1),
            create_test_record("BTC", 0.1),
            create_test_record("BTC", 0.1),
        ];
        let groups = group_by_symbol(&records);

        assert_eq!(top_by_mentions(&groups, 2), vec!["BTC", "ADA"]);
        assert_eq!(top_by_mentions(&groups, 10), vec!["BTC", "ADA", "SOL"]);
    }

    #[test]
    fn test_top_by_average() {
        let records = vec![
            create_test_record("SOL", -0.4),
            create_test_record("ADA", 0.6),
            create_test_record("BTC", 0.2),
            create_test_record("DOT", 0.2),
        ];
        let groups = group_by_symbol(&records);

        assert_eq!(top_by_average(&groups, 3), vec!["ADA", "BTC", "DOT"]);
    }
}
