//! JSONL writer - appends one report snapshot per line

use super::writer_backend::ReportWriterBackend;
use super::SentimentReport;
use crate::error::Result;
use async_trait::async_trait;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct JsonlReportWriter {
    writer: BufWriter<File>,
}

impl JsonlReportWriter {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        log::info!("📝 Writing sentiment reports to: {}", path.display());

        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    pub fn write_report(&mut self, report: &SentimentReport) -> Result<()> {
        let json = serde_json::to_string(report)?;
        writeln!(self.writer, "{}", json)?;

        // One snapshot per refresh, so flush every write
        self.writer.flush()?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl Drop for JsonlReportWriter {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

#[async_trait]
impl ReportWriterBackend for JsonlReportWriter {
    async fn write_report(&mut self, report: &SentimentReport) -> Result<()> {
        JsonlReportWriter::write_report(self, report)
    }

    async fn flush(&mut self) -> Result<()> {
        JsonlReportWriter::flush(self)
    }

    fn backend_type(&self) -> &'static str {
        "JSONL"
    }
}
