//! Aggregation engine bundling the chart projections

use super::distribution::{box_plot_summary, BoxPlotSummary, DEFAULT_DISTRIBUTION_TOP_N};
use super::heatmap::{daily_heatmap_grid, HeatmapGrid, DEFAULT_HEATMAP_TOP_N};
use super::scatter::{scatter_stats, ScatterPoint};
use super::timeseries::{hourly_time_series, HourlySeries, DEFAULT_TRENDS_TOP_N};
use crate::record::SentimentRecord;

/// Top-N limits for the truncated views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationLimits {
    pub trends_top_n: usize,
    pub heatmap_top_n: usize,
    pub distribution_top_n: usize,
}

impl Default for AggregationLimits {
    fn default() -> Self {
        Self {
            trends_top_n: DEFAULT_TRENDS_TOP_N,
            heatmap_top_n: DEFAULT_HEATMAP_TOP_N,
            distribution_top_n: DEFAULT_DISTRIBUTION_TOP_N,
        }
    }
}

/// Stateless; every call is a fresh projection of the given batch.
pub struct AggregationEngine {
    limits: AggregationLimits,
}

impl AggregationEngine {
    pub fn new(limits: AggregationLimits) -> Self {
        Self { limits }
    }

    pub fn with_defaults() -> Self {
        Self::new(AggregationLimits::default())
    }

    pub fn limits(&self) -> AggregationLimits {
        self.limits
    }

    pub fn hourly_time_series(
        &self,
        records: &[SentimentRecord],
        symbols_of_interest: Option<&[String]>,
    ) -> HourlySeries {
        hourly_time_series(records, symbols_of_interest, self.limits.trends_top_n)
    }

    pub fn daily_heatmap_grid(&self, records: &[SentimentRecord]) -> HeatmapGrid {
        daily_heatmap_grid(records, self.limits.heatmap_top_n)
    }

    pub fn box_plot_summary(&self, records: &[SentimentRecord]) -> Vec<BoxPlotSummary> {
        box_plot_summary(records, self.limits.distribution_top_n)
    }

    pub fn scatter_stats(&self, records: &[SentimentRecord]) -> Vec<ScatterPoint> {
        scatter_stats(records)
    }
}
