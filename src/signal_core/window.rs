//! Fetch window requested from the upstream sentiment endpoint

use crate::record::SentimentRecord;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DAYS: u32 = 7;

/// `{days?, hours?, symbols?}` request parameters. `hours` wins over `days`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchParams {
    pub days: Option<u32>,
    pub hours: Option<u32>,
    #[serde(default)]
    pub symbols: Vec<String>,
}

/// Resolved lookback span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookback {
    Hours(u32),
    Days(u32),
}

impl Lookback {
    pub fn duration(&self) -> Duration {
        match self {
            Lookback::Hours(h) => Duration::hours(i64::from(*h)),
            Lookback::Days(d) => Duration::days(i64::from(*d)),
        }
    }
}

impl FetchParams {
    pub fn days(days: u32) -> Self {
        Self {
            days: Some(days),
            ..Default::default()
        }
    }

    pub fn hours(hours: u32) -> Self {
        Self {
            hours: Some(hours),
            ..Default::default()
        }
    }

    pub fn with_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols = symbols.into_iter().map(Into::into).collect();
        self
    }

    pub fn lookback(&self) -> Lookback {
        match (self.hours, self.days) {
            (Some(h), _) => Lookback::Hours(h),
            (None, Some(d)) => Lookback::Days(d),
            (None, None) => Lookback::Days(DEFAULT_DAYS),
        }
    }

    /// Query pairs for the fetch layer, e.g. `[("hours", "6"), ("symbols", "BTC,ETH")]`.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = match self.lookback() {
            Lookback::Hours(h) => vec![("hours", h.to_string())],
            Lookback::Days(d) => vec![("days", d.to_string())],
        };

        let symbols: Vec<&str> = self
            .symbols
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();
        if !symbols.is_empty() {
            pairs.push(("symbols", symbols.join(",")));
        }

        pairs
    }

    /// Earliest timestamp inside the window ending at `now`.
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.lookback().duration()
    }

    /// Apply the window locally: drop records older than the cutoff and,
    /// when a symbol list is given, records of other symbols.
    pub fn apply(&self, records: Vec<SentimentRecord>, now: DateTime<Utc>) -> Vec<SentimentRecord> {
        let cutoff = self.cutoff(now);
        records
            .into_iter()
            .filter(|r| r.date >= cutoff)
            .filter(|r| {
                self.symbols.is_empty()
                    || self
                        .symbols
                        .iter()
                        .any(|s| s.trim().eq_ignore_ascii_case(&r.symbol))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_is_seven_days() {
        let params = FetchParams::default();
        assert_eq!(params.lookback(), Lookback::Days(7));
        assert_eq!(params.query_pairs(), vec![("days", "7".to_string())]);
    }

    #[test]
    fn test_hours_override_days() {
        let params = FetchParams {
            days: Some(30),
            hours: Some(6),
            symbols: vec![],
        };
        assert_eq!(params.lookback(), Lookback::Hours(6));
        assert_eq!(params.query_pairs(), vec![("hours", "6".to_string())]);
    }

    #[test]
    fn test_symbols_joined() {
        let params = FetchParams::days(3).with_symbols(["BTC", " ETH", ""]);
        assert_eq!(
            params.query_pairs(),
            vec![("days", "3".to_string()), ("symbols", "BTC,ETH".to_string())]
        );
    }

    #[test]
    fn test_apply_cutoff_and_symbols() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        let records = vec![
            SentimentRecord::new("BTC", "Bitcoin", 0.1, now - Duration::hours(1)).unwrap(),
            SentimentRecord::new("BTC", "Bitcoin", 0.1, now - Duration::hours(5)).unwrap(),
            SentimentRecord::new("ETH", "Ethereum", 0.1, now - Duration::hours(1)).unwrap(),
        ];

        let kept = FetchParams::hours(3).with_symbols(["btc"]).apply(records, now);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].symbol, "BTC");
    }
}
