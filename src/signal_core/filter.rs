//! Stablecoin exclusion applied to a fetched batch before aggregation
//!
//! The denylist is an explicit value handed to the filter; nothing here reads
//! process-wide state.

use super::signal::TradingSignal;
use crate::record::SentimentRecord;
use std::collections::{BTreeMap, HashSet};

pub const DEFAULT_STABLECOINS: &[&str] = &[
    "USDT", "USDC", "DAI", "BUSD", "TUSD", "USDP", "GUSD", "FDUSD", "PYUSD", "USDD", "FRAX",
    "LUSD", "USDE",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StablecoinFilter {
    // Upper-cased tickers
    denylist: HashSet<String>,
}

impl StablecoinFilter {
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let denylist = symbols
            .into_iter()
            .map(|s| s.as_ref().trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();
        Self { denylist }
    }

    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_STABLECOINS.iter().copied())
    }

    /// A filter that keeps everything.
    pub fn disabled() -> Self {
        Self {
            denylist: HashSet::new(),
        }
    }

    /// Case-insensitive denylist check.
    pub fn is_excluded(&self, symbol: &str) -> bool {
        self.denylist.contains(&symbol.trim().to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.denylist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.denylist.is_empty()
    }

    /// Drop records of denylisted symbols, keeping the remaining order.
    pub fn filter_records(&self, records: Vec<SentimentRecord>) -> Vec<SentimentRecord> {
        let before = records.len();
        let kept: Vec<SentimentRecord> = records
            .into_iter()
            .filter(|r| !self.is_excluded(&r.symbol))
            .collect();

        if kept.len() != before {
            log::debug!(
                "Stablecoin filter removed {} of {} records",
                before - kept.len(),
                before
            );
        }
        kept
    }

    /// Drop signals of denylisted symbols from an already computed map.
    pub fn filter_signals(
        &self,
        signals: BTreeMap<String, TradingSignal>,
    ) -> BTreeMap<String, TradingSignal> {
        signals
            .into_iter()
            .filter(|(symbol, _)| !self.is_excluded(symbol))
            .collect()
    }
}

impl Default for StablecoinFilter {
    fn default() -> Self {
        Self::with_defaults()
    }
}
