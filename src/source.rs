//! Upstream payload adapters
//!
//! The sentiment endpoint has shipped three JSON shapes over time. Each is
//! detected once and converted into canonical `SentimentRecord`s so nothing
//! downstream has to care which one arrived.
//!
//! ```text
//! {"data": {"sentiments": [...]}}   → SourceFormat::Nested
//! {"sentiments": [...]}             → SourceFormat::Direct
//! {"records": [...], "signals"?}    → SourceFormat::Dashboard
//! ```

use crate::error::{Result, SentimentError};
use crate::record::{parse_timestamp, SentimentRecord};
use crate::signal_core::TradingSignal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

const UNKNOWN_TITLE: &str = "Unknown Title";
const UNKNOWN_SOURCE: &str = "Unknown Source";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SourceFormat {
    Nested,
    Direct,
    Dashboard,
}

impl SourceFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::Nested => "data.sentiments",
            SourceFormat::Direct => "sentiments",
            SourceFormat::Dashboard => "records",
        }
    }
}

/// Raw payload, tagged by shape.
#[derive(Debug, Clone)]
pub enum SourcePayload {
    Nested(Vec<Value>),
    Direct(Vec<Value>),
    Dashboard {
        records: Vec<Value>,
        signals: Option<Value>,
    },
}

/// A canonical batch as delivered by the fetch layer.
#[derive(Debug, Clone)]
pub struct SentimentBatch {
    pub format: SourceFormat,
    pub records: Vec<SentimentRecord>,
    /// Signals precomputed upstream, if the payload carried any.
    pub upstream_signals: Option<BTreeMap<String, TradingSignal>>,
}

#[derive(Debug, Deserialize)]
struct ArticleRef {
    title: Option<String>,
    source: Option<String>,
    link: Option<String>,
}

/// Item of the `data.sentiments` / `sentiments` shapes.
#[derive(Debug, Deserialize)]
struct ArticleSentimentItem {
    symbol: Option<String>,
    #[serde(rename = "coinName")]
    coin_name: Option<String>,
    sentiment: Option<Value>,
    date: Option<Value>,
    explanation: Option<String>,
    relevance: Option<Value>,
    article: Option<ArticleRef>,
}

/// Item of the `records` shape.
#[derive(Debug, Deserialize)]
struct DashboardItem {
    symbol: Option<String>,
    coin_name: Option<String>,
    sentiment: Option<Value>,
    date: Option<Value>,
    explanation: Option<String>,
    article_title: Option<String>,
    source: Option<String>,
    relevance: Option<Value>,
    article_url: Option<String>,
    article_summary: Option<String>,
}

impl SourcePayload {
    /// Detect the payload shape. A shape counts only when its list is an
    /// array; `null` or a missing list falls through to the next shape.
    pub fn detect(value: Value) -> Result<Self> {
        let Value::Object(mut root) = value else {
            return Err(SentimentError::UnsupportedFormat);
        };

        let nested = root
            .get_mut("data")
            .and_then(|data| data.get_mut("sentiments"))
            .map(Value::take);
        if let Some(items) = array_items(nested) {
            return Ok(SourcePayload::Nested(items));
        }

        if let Some(items) = array_items(root.remove("sentiments")) {
            return Ok(SourcePayload::Direct(items));
        }

        if let Some(records) = array_items(root.remove("records")) {
            return Ok(SourcePayload::Dashboard {
                records,
                signals: root.remove("signals"),
            });
        }

        Err(SentimentError::UnsupportedFormat)
    }

    pub fn format(&self) -> SourceFormat {
        match self {
            SourcePayload::Nested(_) => SourceFormat::Nested,
            SourcePayload::Direct(_) => SourceFormat::Direct,
            SourcePayload::Dashboard { .. } => SourceFormat::Dashboard,
        }
    }

    /// Convert every item into a canonical record. The first malformed item
    /// fails the whole batch.
    pub fn into_batch(self) -> Result<SentimentBatch> {
        let format = self.format();

        let (records, upstream_signals) = match self {
            SourcePayload::Nested(items) | SourcePayload::Direct(items) => {
                (convert_items(items, from_article_item)?, None)
            }
            SourcePayload::Dashboard { records, signals } => {
                let records = convert_items(records, from_dashboard_item)?;
                (records, signals.and_then(parse_upstream_signals))
            }
        };

        log::debug!(
            "Resolved {} records from '{}' payload",
            records.len(),
            format.as_str()
        );

        Ok(SentimentBatch {
            format,
            records,
            upstream_signals,
        })
    }
}

impl SentimentBatch {
    pub fn from_value(value: Value) -> Result<Self> {
        SourcePayload::detect(value)?.into_batch()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

fn array_items(value: Option<Value>) -> Option<Vec<Value>> {
    match value {
        Some(Value::Array(items)) => Some(items),
        _ => None,
    }
}

fn convert_items<T, F>(items: Vec<Value>, convert: F) -> Result<Vec<SentimentRecord>>
where
    T: for<'de> Deserialize<'de>,
    F: Fn(T) -> Result<SentimentRecord>,
{
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<T>(item)
                .map_err(|e| SentimentError::invalid_field("record", e.to_string()))
                .and_then(&convert)
                .map_err(|e| e.at_index(index))
        })
        .collect()
}

fn from_article_item(item: ArticleSentimentItem) -> Result<SentimentRecord> {
    let sentiment = number_field("sentiment", item.sentiment.as_ref())?;
    let date = timestamp_field(item.date.as_ref())?;
    let relevance = optional_number_field("relevance", item.relevance.as_ref())?;

    let (title, source, url) = match item.article {
        Some(article) => (article.title, article.source, article.link),
        None => (None, None, None),
    };

    Ok(SentimentRecord::new(
        item.symbol.unwrap_or_default(),
        item.coin_name.unwrap_or_default(),
        sentiment,
        date,
    )?
    .with_relevance(relevance)
    .with_article(
        title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        source.unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
    )
    .with_explanation(item.explanation.unwrap_or_default())
    .with_url(url))
}

fn from_dashboard_item(item: DashboardItem) -> Result<SentimentRecord> {
    let sentiment = number_field("sentiment", item.sentiment.as_ref())?;
    let date = timestamp_field(item.date.as_ref())?;
    let relevance = optional_number_field("relevance", item.relevance.as_ref())?;

    Ok(SentimentRecord::new(
        item.symbol.unwrap_or_default(),
        item.coin_name.unwrap_or_default(),
        sentiment,
        date,
    )?
    .with_relevance(relevance)
    .with_article(
        item.article_title.unwrap_or_default(),
        item.source.unwrap_or_default(),
    )
    .with_explanation(item.explanation.unwrap_or_default())
    .with_url(item.article_url)
    .with_summary(item.article_summary.as_deref().and_then(summarize)))
}

/// First sentence of an article summary followed by an ellipsis.
pub fn summarize(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }
    let first = text.split('.').next().unwrap_or(text);
    Some(format!("{}...", first))
}

fn number_field(field: &'static str, value: Option<&Value>) -> Result<f64> {
    match value {
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| SentimentError::invalid_field(field, "is not representable as f64")),
        Some(other) => Err(SentimentError::invalid_field(
            field,
            format!("is not numeric: {}", other),
        )),
        None => Err(SentimentError::invalid_field(field, "is missing")),
    }
}

fn optional_number_field(field: &'static str, value: Option<&Value>) -> Result<f64> {
    match value {
        None | Some(Value::Null) => Ok(0.0),
        some => number_field(field, some),
    }
}

fn timestamp_field(value: Option<&Value>) -> Result<chrono::DateTime<chrono::Utc>> {
    match value {
        Some(Value::String(raw)) => parse_timestamp(raw).ok_or_else(|| {
            SentimentError::invalid_field("date", format!("is not a timestamp: '{}'", raw))
        }),
        Some(other) => Err(SentimentError::invalid_field(
            "date",
            format!("is not a timestamp string: {}", other),
        )),
        None => Err(SentimentError::invalid_field("date", "is missing")),
    }
}

fn parse_upstream_signals(value: Value) -> Option<BTreeMap<String, TradingSignal>> {
    if value.is_null() {
        return None;
    }
    match serde_json::from_value(value) {
        Ok(signals) => Some(signals),
        Err(e) => {
            log::warn!("Ignoring unreadable upstream signals: {}", e);
            None
        }
    }
}
