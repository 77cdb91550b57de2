//! Signal Core - per-asset trading signals from sentiment records
//!
//! # Architecture
//!
//! ```text
//! SentimentBatch (canonical records)
//!     ↓
//! StablecoinFilter (explicit denylist)
//!     ↓
//! SignalEngine (group by symbol, avg + recency window)
//!     ↓
//! SignalDetector (STRONG BUY … STRONG SELL thresholds)
//!     ↓
//! DashboardSummary / group_signals
//! ```

pub mod detector;
pub mod engine;
pub mod filter;
pub mod signal;
pub mod summary;
pub mod window;

pub use detector::{SignalDetector, SignalThresholds};
pub use engine::{NameConflict, SignalEngine, DEFAULT_RECENCY_WINDOW};
pub use filter::{StablecoinFilter, DEFAULT_STABLECOINS};
pub use signal::{SignalKind, TradingSignal};
pub use summary::{group_signals, DashboardSummary, DateRange, SignalGroup};
pub use window::{FetchParams, Lookback};
