//! Aggregator Core - chart aggregates over a sentiment batch
//!
//! Every projection is a pure function of the record slice it is given.
//!
//! # Architecture
//!
//! ```text
//! &[SentimentRecord]
//!     ↓
//! group_by_symbol / BucketSize (hour, day)
//!     ↓
//! ├── hourly_time_series  (top-N by mentions, gaps as None)
//! ├── daily_heatmap_grid  (top-N by mentions, 2-decimal cells)
//! ├── box_plot_summary    (top-N by mean sentiment, nearest-rank quartiles)
//! └── scatter_stats       (every symbol, population std-dev)
//! ```

pub mod bucket;
pub mod distribution;
pub mod engine;
pub mod heatmap;
pub mod scatter;
pub mod timeseries;

pub use bucket::BucketSize;
pub use distribution::{box_plot_summary, five_number_summary, BoxPlotSummary};
pub use engine::{AggregationEngine, AggregationLimits};
pub use heatmap::{daily_heatmap_grid, HeatmapCell, HeatmapGrid};
pub use scatter::{scatter_stats, ScatterPoint, SentimentTone};
pub use timeseries::{hourly_time_series, HourlyPoint, HourlySeries};
