//! Time bucketing for chart aggregates

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BucketSize {
    Hour,
    Day,
}

impl BucketSize {
    /// Label format. Both sort lexicographically in chronological order.
    fn label_format(&self) -> &'static str {
        match self {
            BucketSize::Hour => "%Y-%m-%d %H:00",
            BucketSize::Day => "%Y-%m-%d",
        }
    }

    /// Start of the UTC bucket containing `date`.
    pub fn truncate(&self, date: &DateTime<Utc>) -> DateTime<Utc> {
        let hour = match self {
            BucketSize::Hour => date.hour(),
            BucketSize::Day => 0,
        };
        Utc.with_ymd_and_hms(date.year(), date.month(), date.day(), hour, 0, 0)
            .single()
            .unwrap_or(*date)
    }

    /// Bucket label for `date`, e.g. `2024-05-01 13:00` or `2024-05-01`.
    pub fn label(&self, date: &DateTime<Utc>) -> String {
        date.format(self.label_format()).to_string()
    }
}
