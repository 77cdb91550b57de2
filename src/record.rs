//! Canonical sentiment record and boundary validation
//!
//! Every upstream payload shape is resolved into `SentimentRecord` before any
//! computation runs. Construction is the only place where validation happens.

use crate::error::{Result, SentimentError};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

/// One scored news mention of a crypto asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentRecord {
    pub symbol: String,
    pub coin_name: String,
    pub sentiment: f64,
    pub date: DateTime<Utc>,
    /// Informational only, no aggregate consumes it.
    pub relevance: f64,
    pub article_title: String,
    pub source: String,
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl SentimentRecord {
    /// Build a record, rejecting an empty symbol or a non-finite score.
    pub fn new(
        symbol: impl Into<String>,
        coin_name: impl Into<String>,
        sentiment: f64,
        date: DateTime<Utc>,
    ) -> Result<Self> {
        let symbol = symbol.into();
        if symbol.trim().is_empty() {
            return Err(SentimentError::invalid_field("symbol", "must not be empty"));
        }
        if !sentiment.is_finite() {
            return Err(SentimentError::invalid_field(
                "sentiment",
                format!("must be a finite number, got {}", sentiment),
            ));
        }

        Ok(Self {
            symbol,
            coin_name: coin_name.into(),
            sentiment,
            date,
            relevance: 0.0,
            article_title: String::new(),
            source: String::new(),
            explanation: String::new(),
            summary: None,
            url: None,
        })
    }

    pub fn with_relevance(mut self, relevance: f64) -> Self {
        self.relevance = relevance;
        self
    }

    pub fn with_article(mut self, title: impl Into<String>, source: impl Into<String>) -> Self {
        self.article_title = title.into();
        self.source = source.into();
        self
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    pub fn with_summary(mut self, summary: Option<String>) -> Self {
        self.summary = summary;
        self
    }

    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }
}

/// Parse an upstream timestamp.
///
/// Accepts RFC 3339 (`2024-05-01T12:30:00.000Z`, `+02:00` offsets) and naive
/// ISO forms without an offset, which are taken as UTC. A bare date maps to
/// midnight UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
