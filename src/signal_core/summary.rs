//! Batch-level dashboard statistics and signal grouping

use super::signal::{SignalKind, TradingSignal};
use crate::grouping::mean;
use crate::record::SentimentRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_records: usize,
    pub unique_coins: usize,
    pub avg_sentiment: f64,
    /// Mean of the newer half of the batch.
    pub recent_avg_sentiment: f64,
    /// Relative change of the newer half vs. the whole batch, in percent.
    pub sentiment_trend_pct: f64,
    pub active_signals: usize,
    pub total_signals: usize,
    pub date_range: Option<DateRange>,
}

impl DashboardSummary {
    pub fn compute(records: &[SentimentRecord], signals: &BTreeMap<String, TradingSignal>) -> Self {
        let unique_coins = records
            .iter()
            .map(|r| r.symbol.as_str())
            .collect::<HashSet<_>>()
            .len();

        let avg_sentiment = mean(records.iter().map(|r| r.sentiment)).unwrap_or(0.0);

        let mut newest_first: Vec<&SentimentRecord> = records.iter().collect();
        newest_first.sort_by(|a, b| b.date.cmp(&a.date));
        let half = newest_first.len() / 2;
        let recent_avg_sentiment =
            mean(newest_first[..half].iter().map(|r| r.sentiment)).unwrap_or(0.0);

        // A zero baseline is treated as 1 so the percentage stays finite
        let baseline = if avg_sentiment == 0.0 {
            1.0
        } else {
            avg_sentiment.abs()
        };
        let sentiment_trend_pct = (recent_avg_sentiment - avg_sentiment) / baseline * 100.0;

        let date_range = match (
            records.iter().map(|r| r.date).min(),
            records.iter().map(|r| r.date).max(),
        ) {
            (Some(start), Some(end)) => Some(DateRange { start, end }),
            _ => None,
        };

        Self {
            total_records: records.len(),
            unique_coins,
            avg_sentiment,
            recent_avg_sentiment,
            sentiment_trend_pct,
            active_signals: signals.values().filter(|s| s.signal.is_active()).count(),
            total_signals: signals.len(),
            date_range,
        }
    }
}

/// Signals of one kind, strongest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalGroup {
    pub kind: SignalKind,
    pub signals: Vec<TradingSignal>,
}

/// Partition signals by kind (STRONG BUY first); empty kinds are omitted.
pub fn group_signals(signals: &BTreeMap<String, TradingSignal>) -> Vec<SignalGroup> {
    SignalKind::all()
        .into_iter()
        .filter_map(|kind| {
            let mut members: Vec<TradingSignal> = signals
                .values()
                .filter(|s| s.signal == kind)
                .cloned()
                .collect();
            if members.is_empty() {
                return None;
            }
            members.sort_by(|a, b| {
                b.strength
                    .partial_cmp(&a.strength)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.symbol.cmp(&b.symbol))
            });
            Some(SignalGroup {
                kind,
                signals: members,
            })
        })
        .collect()
}
