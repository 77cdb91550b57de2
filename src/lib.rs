//! Sentiflow - trading signals and chart aggregates from crypto news sentiment
//!
//! # Architecture
//!
//! ```text
//! JSON payload (data.sentiments | sentiments | records)   demo generator
//!     ↓ source                                              ↓ mock
//! SentimentBatch ─────────────────────────────────────────────┘
//!     ↓
//! report::ReportBuilder
//!     ├── signal_core      (per-symbol signals, dashboard summary, filters)
//!     └── aggregator_core  (hourly series, heatmap, box plots, scatter)
//!     ↓
//! SentimentReport → JSONL / stdout
//! ```

pub mod aggregator_core;
pub mod config;
pub mod error;
pub mod grouping;
pub mod mock;
pub mod record;
pub mod report;
pub mod signal_core;
pub mod source;

pub use config::EngineConfig;
pub use error::{Result, SentimentError};
pub use record::SentimentRecord;
pub use report::{ReportBuilder, ReportWriter, SentimentReport};
pub use source::{SentimentBatch, SourceFormat};
