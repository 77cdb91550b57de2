//! Writer backend trait for sentiment reports
//!
//! Defines the interface for emitting report snapshots to different sinks.

use super::SentimentReport;
use crate::error::Result;
use async_trait::async_trait;

/// Backend trait for writing report snapshots
#[async_trait]
pub trait ReportWriterBackend: Send {
    /// Write a single report snapshot
    async fn write_report(&mut self, report: &SentimentReport) -> Result<()>;

    /// Flush pending writes
    async fn flush(&mut self) -> Result<()>;

    /// Get backend type for logging
    fn backend_type(&self) -> &'static str;
}
