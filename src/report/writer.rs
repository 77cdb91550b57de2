//! Unified writer interface for sentiment reports
//!
//! Routes writes to a JSONL file or to stdout based on configuration.

use super::jsonl_writer::JsonlReportWriter;
use super::writer_backend::ReportWriterBackend;
use super::SentimentReport;
use crate::error::Result;
use async_trait::async_trait;
use std::io::{self, Write};
use std::path::PathBuf;

/// Pretty-printed reports on stdout.
#[derive(Debug, Default)]
pub struct StdoutReportWriter;

impl StdoutReportWriter {
    pub fn write_report(&mut self, report: &SentimentReport) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", json)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        io::stdout().flush()?;
        Ok(())
    }
}

#[async_trait]
impl ReportWriterBackend for StdoutReportWriter {
    async fn write_report(&mut self, report: &SentimentReport) -> Result<()> {
        StdoutReportWriter::write_report(self, report)
    }

    async fn flush(&mut self) -> Result<()> {
        StdoutReportWriter::flush(self)
    }

    fn backend_type(&self) -> &'static str {
        "stdout"
    }
}

/// Unified writer that routes to either the JSONL or stdout backend
pub enum ReportWriter {
    Jsonl(JsonlReportWriter),
    Stdout(StdoutReportWriter),
}

impl ReportWriter {
    /// JSONL file when an output path is configured, stdout otherwise
    pub fn new(output_path: Option<PathBuf>) -> Result<Self> {
        match output_path {
            Some(path) => Ok(ReportWriter::Jsonl(JsonlReportWriter::new(path)?)),
            None => Ok(ReportWriter::Stdout(StdoutReportWriter)),
        }
    }

    pub async fn write_report(&mut self, report: &SentimentReport) -> Result<()> {
        match self {
            ReportWriter::Jsonl(w) => ReportWriterBackend::write_report(w, report).await,
            ReportWriter::Stdout(w) => ReportWriterBackend::write_report(w, report).await,
        }
    }

    pub async fn flush(&mut self) -> Result<()> {
        match self {
            ReportWriter::Jsonl(w) => ReportWriterBackend::flush(w).await,
            ReportWriter::Stdout(w) => ReportWriterBackend::flush(w).await,
        }
    }

    pub fn backend_type(&self) -> &'static str {
        match self {
            ReportWriter::Jsonl(w) => w.backend_type(),
            ReportWriter::Stdout(w) => w.backend_type(),
        }
    }
}
