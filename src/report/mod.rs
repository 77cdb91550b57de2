//! Report - one snapshot of every view derived from a batch
//!
//! # Architecture
//!
//! ```text
//! SentimentBatch (records + optional upstream signals)
//!     ↓
//! FetchParams window (optional) → StablecoinFilter
//!     ↓
//! ├── SignalEngine       → signals, name conflicts, signal groups
//! ├── DashboardSummary
//! └── AggregationEngine  → hourly series, heatmap, box plots, scatter
//!     ↓
//! SentimentReport → ReportWriter (JSONL file | stdout)
//! ```

pub mod jsonl_writer;
pub mod writer;
pub mod writer_backend;

pub use jsonl_writer::JsonlReportWriter;
pub use writer::{ReportWriter, StdoutReportWriter};
pub use writer_backend::ReportWriterBackend;

use crate::aggregator_core::{
    AggregationEngine, BoxPlotSummary, HeatmapGrid, HourlySeries, ScatterPoint,
};
use crate::config::EngineConfig;
use crate::record::SentimentRecord;
use crate::signal_core::{
    group_signals, DashboardSummary, FetchParams, NameConflict, SignalDetector, SignalEngine,
    SignalGroup, StablecoinFilter, TradingSignal,
};
use crate::source::{SentimentBatch, SourceFormat};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Where the report's signal map came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalOrigin {
    /// Precomputed signals shipped with the payload, used as-is
    Upstream,
    /// Recomputed from the (filtered) records
    Derived,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentReport {
    pub generated_at: DateTime<Utc>,
    /// `None` for generated demo batches
    pub format: Option<SourceFormat>,
    pub distinct_symbols: usize,
    pub summary: DashboardSummary,
    pub signal_origin: SignalOrigin,
    pub signals: BTreeMap<String, TradingSignal>,
    pub signal_groups: Vec<SignalGroup>,
    pub name_conflicts: Vec<NameConflict>,
    pub hourly_series: HourlySeries,
    pub heatmap: HeatmapGrid,
    pub distribution: Vec<BoxPlotSummary>,
    pub scatter: Vec<ScatterPoint>,
}

/// Runs both engines over a batch and bundles the results.
pub struct ReportBuilder {
    signal_engine: SignalEngine,
    aggregation_engine: AggregationEngine,
    filter: StablecoinFilter,
    window: Option<FetchParams>,
}

impl ReportBuilder {
    pub fn new(
        signal_engine: SignalEngine,
        aggregation_engine: AggregationEngine,
        filter: StablecoinFilter,
    ) -> Self {
        Self {
            signal_engine,
            aggregation_engine,
            filter,
            window: None,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(
            SignalEngine::with_defaults(),
            AggregationEngine::with_defaults(),
            StablecoinFilter::with_defaults(),
        )
    }

    /// Restrict batches to a fetch window before anything is computed.
    pub fn with_window(mut self, window: FetchParams) -> Self {
        self.window = Some(window);
        self
    }

    /// The window is applied only when `FETCH_*` variables were set.
    pub fn from_config(config: &EngineConfig) -> Self {
        let builder = Self::new(
            SignalEngine::new(SignalDetector::with_defaults(), config.recency_window),
            AggregationEngine::new(config.limits),
            config.stablecoin_filter(),
        );

        if config.fetch == FetchParams::default() {
            builder
        } else {
            builder.with_window(config.fetch.clone())
        }
    }

    pub fn build(&self, batch: SentimentBatch, now: DateTime<Utc>) -> SentimentReport {
        self.assemble(Some(batch.format), batch.records, batch.upstream_signals, now)
    }

    /// Report over bare records, e.g. a generated demo batch.
    pub fn build_from_records(
        &self,
        records: Vec<SentimentRecord>,
        now: DateTime<Utc>,
    ) -> SentimentReport {
        self.assemble(None, records, None, now)
    }

    fn assemble(
        &self,
        format: Option<SourceFormat>,
        records: Vec<SentimentRecord>,
        upstream: Option<BTreeMap<String, TradingSignal>>,
        now: DateTime<Utc>,
    ) -> SentimentReport {
        let received = records.len();

        let records = match &self.window {
            Some(window) => window.apply(records, now),
            None => records,
        };
        let records = self.filter.filter_records(records);

        // Upstream signals only describe the batch as delivered
        let upstream = upstream
            .map(|signals| self.filter.filter_signals(signals))
            .filter(|signals| records.len() == received && covers_exactly(signals, &records));

        let (signal_origin, signals, name_conflicts) = match upstream {
            Some(signals) => {
                log::debug!("Using {} upstream signals", signals.len());
                (SignalOrigin::Upstream, signals, Vec::new())
            }
            None => {
                let (signals, conflicts) =
                    self.signal_engine.derive_signals_with_diagnostics(&records);
                (SignalOrigin::Derived, signals, conflicts)
            }
        };

        let summary = DashboardSummary::compute(&records, &signals);
        let requested = self
            .window
            .as_ref()
            .map(|w| resolve_symbols(&w.symbols, &records))
            .unwrap_or_default();
        let symbols_of_interest = Some(requested.as_slice()).filter(|s| !s.is_empty());

        let report = SentimentReport {
            generated_at: now,
            format,
            distinct_symbols: summary.unique_coins,
            signal_groups: group_signals(&signals),
            hourly_series: self
                .aggregation_engine
                .hourly_time_series(&records, symbols_of_interest),
            heatmap: self.aggregation_engine.daily_heatmap_grid(&records),
            distribution: self.aggregation_engine.box_plot_summary(&records),
            scatter: self.aggregation_engine.scatter_stats(&records),
            summary,
            signal_origin,
            signals,
            name_conflicts,
        };

        log::info!(
            "📊 Report: {} records, {} symbols, {} active signals ({} dropped by window/filter)",
            report.summary.total_records,
            report.distinct_symbols,
            report.summary.active_signals,
            received - report.summary.total_records
        );

        report
    }
}

/// One signal per distinct record symbol, and nothing else.
fn covers_exactly(signals: &BTreeMap<String, TradingSignal>, records: &[SentimentRecord]) -> bool {
    let symbols: BTreeSet<&str> = records.iter().map(|r| r.symbol.as_str()).collect();
    let matches = signals.len() == symbols.len()
        && signals.keys().all(|symbol| symbols.contains(symbol.as_str()));

    if !matches {
        log::warn!(
            "⚠️  Upstream signals cover {} symbols, batch has {}; re-deriving",
            signals.len(),
            symbols.len()
        );
    }
    matches
}

/// Map requested tickers onto the spelling used in the batch.
fn resolve_symbols(requested: &[String], records: &[SentimentRecord]) -> Vec<String> {
    requested
        .iter()
        .filter_map(|want| {
            records
                .iter()
                .find(|r| r.symbol.eq_ignore_ascii_case(want.trim()))
                .map(|r| r.symbol.clone())
        })
        .collect()
}
