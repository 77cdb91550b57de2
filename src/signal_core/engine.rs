//! Per-symbol signal derivation over a full record batch

use super::detector::SignalDetector;
use super::signal::TradingSignal;
use crate::grouping::{group_by_symbol, mean, SymbolGroup};
use crate::record::SentimentRecord;
use serde::Serialize;
use std::collections::BTreeMap;

pub const DEFAULT_RECENCY_WINDOW: usize = 5;

/// A symbol whose records disagree on the display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameConflict {
    pub symbol: String,
    pub chosen: String,
    pub names: Vec<String>,
}

pub struct SignalEngine {
    detector: SignalDetector,
    recency_window: usize,
}

impl SignalEngine {
    pub fn new(detector: SignalDetector, recency_window: usize) -> Self {
        Self {
            detector,
            recency_window: recency_window.max(1),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(SignalDetector::with_defaults(), DEFAULT_RECENCY_WINDOW)
    }

    pub fn recency_window(&self) -> usize {
        self.recency_window
    }

    /// One signal per distinct symbol in the batch.
    pub fn derive_signals(&self, records: &[SentimentRecord]) -> BTreeMap<String, TradingSignal> {
        self.derive_signals_with_diagnostics(records).0
    }

    /// Same as `derive_signals`, also returning symbols whose records carry
    /// more than one `coin_name`.
    pub fn derive_signals_with_diagnostics(
        &self,
        records: &[SentimentRecord],
    ) -> (BTreeMap<String, TradingSignal>, Vec<NameConflict>) {
        let mut signals = BTreeMap::new();
        let mut conflicts = Vec::new();

        for group in group_by_symbol(records) {
            let (signal, conflict) = self.derive_one(&group);
            if let Some(conflict) = conflict {
                log::warn!(
                    "⚠️  {} has {} display names {:?}, using '{}'",
                    conflict.symbol,
                    conflict.names.len(),
                    conflict.names,
                    conflict.chosen
                );
                conflicts.push(conflict);
            }
            signals.insert(signal.symbol.clone(), signal);
        }

        log::debug!(
            "Derived {} signals from {} records",
            signals.len(),
            records.len()
        );

        (signals, conflicts)
    }

    fn derive_one(&self, group: &SymbolGroup<'_>) -> (TradingSignal, Option<NameConflict>) {
        let avg = group.mean();

        // Stable sort: records sharing a timestamp keep batch order
        let mut by_recency = group.records.clone();
        by_recency.sort_by(|a, b| b.date.cmp(&a.date));

        let window = self.recency_window.min(by_recency.len());
        let recent = mean(by_recency[..window].iter().map(|r| r.sentiment)).unwrap_or(avg);
        let trend = recent - avg;

        let (kind, strength) = self.detector.classify(recent, trend);

        let chosen = by_recency
            .first()
            .map(|r| r.coin_name.clone())
            .unwrap_or_default();
        let conflict = name_conflict(group, &chosen);

        let signal = TradingSignal {
            symbol: group.symbol.to_string(),
            coin_name: chosen,
            signal: kind,
            strength,
            avg_sentiment: avg,
            recent_sentiment: recent,
            trend,
            mentions: group.len(),
        };

        (signal, conflict)
    }
}

fn name_conflict(group: &SymbolGroup<'_>, chosen: &str) -> Option<NameConflict> {
    let mut names: Vec<String> = Vec::new();
    for record in &group.records {
        if !names.iter().any(|n| n == &record.coin_name) {
            names.push(record.coin_name.clone());
        }
    }

    if names.len() > 1 {
        Some(NameConflict {
            symbol: group.symbol.to_string(),
            chosen: chosen.to_string(),
            names,
        })
    } else {
        None
    }
}
