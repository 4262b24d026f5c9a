//! Storage key namespace for the external key/queue store.
//!
//! Every key is a pure function of its inputs. Brand identifiers are spliced in
//! as-is with `:` as the segment delimiter; callers that accept arbitrary brand
//! identifiers should run [`validate_brand_segment`] first, because a brand
//! containing `:` makes key segments ambiguous. The key formats themselves are
//! shared with existing stored data and must not change.

use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde::Serialize;

use crate::error::KeyError;

pub const KEY_DELIMITER: char = ':';

/// Key holding the set of tracked brand identifiers.
pub const TRACKED_BRANDS_SET_KEY: &str = "brands:set";

/// `data:{brand}:{date_key}:{hour}`
#[must_use]
pub fn brand_time_bucket_key(brand: &str, date_key: &str, hour: &str) -> String {
    format!("data:{brand}:{date_key}:{hour}")
}

/// `queue:{brand}`
#[must_use]
pub fn brand_queue_key(brand: &str) -> String {
    format!("queue:{brand}")
}

/// `queue:{brand}:processed`
#[must_use]
pub fn brand_processed_queue_key(brand: &str) -> String {
    format!("queue:{brand}:processed")
}

/// `latest_analysis:{brand}`
#[must_use]
pub fn brand_latest_analysis_key(brand: &str) -> String {
    format!("latest_analysis:{brand}")
}

/// `data:brand:{brand}:mentions`
#[must_use]
pub fn brand_mentions_key(brand: &str) -> String {
    format!("data:brand:{brand}:mentions")
}

/// `task:{brand}`
#[must_use]
pub fn brand_task_key(brand: &str) -> String {
    format!("task:{brand}")
}

/// `brand:{brand}:meta`
#[must_use]
pub fn brand_meta_key(brand: &str) -> String {
    format!("brand:{brand}:meta")
}

/// `stream:orchestrator:results:{brand}`
#[must_use]
pub fn orchestrator_results_stream_key(brand: &str) -> String {
    format!("stream:orchestrator:results:{brand}")
}

/// `brands:set`
#[must_use]
pub fn tracked_brands_set_key() -> String {
    TRACKED_BRANDS_SET_KEY.to_string()
}

/// Rejects brand identifiers that would produce degenerate or ambiguous keys.
///
/// The key builders never call this; they stay total.
///
/// # Errors
///
/// Returns [`KeyError::EmptyBrand`] for an empty identifier and
/// [`KeyError::DelimiterInBrand`] when it contains `:`.
pub fn validate_brand_segment(brand: &str) -> Result<(), KeyError> {
    if brand.is_empty() {
        return Err(KeyError::EmptyBrand);
    }
    if brand.contains(KEY_DELIMITER) {
        return Err(KeyError::DelimiterInBrand(brand.to_string()));
    }
    Ok(())
}

/// Typed view over the key family. `Display` renders the same strings as the
/// free builder functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKey<'a> {
    TimeBucket {
        brand: &'a str,
        date_key: &'a str,
        hour: &'a str,
    },
    Queue(&'a str),
    ProcessedQueue(&'a str),
    LatestAnalysis(&'a str),
    Mentions(&'a str),
    Task(&'a str),
    Meta(&'a str),
    ResultStream(&'a str),
    TrackedBrands,
}

impl<'a> StorageKey<'a> {
    /// Every key that does not need a time bucket, for one brand.
    #[must_use]
    pub fn all_for_brand(brand: &'a str) -> [StorageKey<'a>; 7] {
        [
            StorageKey::Queue(brand),
            StorageKey::ProcessedQueue(brand),
            StorageKey::LatestAnalysis(brand),
            StorageKey::Mentions(brand),
            StorageKey::Task(brand),
            StorageKey::Meta(brand),
            StorageKey::ResultStream(brand),
        ]
    }

    /// Short label naming the key's purpose.
    #[must_use]
    pub fn purpose(&self) -> &'static str {
        match self {
            StorageKey::TimeBucket { .. } => "time_bucket",
            StorageKey::Queue(_) => "queue",
            StorageKey::ProcessedQueue(_) => "processed_queue",
            StorageKey::LatestAnalysis(_) => "latest_analysis",
            StorageKey::Mentions(_) => "mentions",
            StorageKey::Task(_) => "task",
            StorageKey::Meta(_) => "meta",
            StorageKey::ResultStream(_) => "result_stream",
            StorageKey::TrackedBrands => "tracked_brands",
        }
    }
}

impl fmt::Display for StorageKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match *self {
            StorageKey::TimeBucket {
                brand,
                date_key,
                hour,
            } => brand_time_bucket_key(brand, date_key, hour),
            StorageKey::Queue(brand) => brand_queue_key(brand),
            StorageKey::ProcessedQueue(brand) => brand_processed_queue_key(brand),
            StorageKey::LatestAnalysis(brand) => brand_latest_analysis_key(brand),
            StorageKey::Mentions(brand) => brand_mentions_key(brand),
            StorageKey::Task(brand) => brand_task_key(brand),
            StorageKey::Meta(brand) => brand_meta_key(brand),
            StorageKey::ResultStream(brand) => orchestrator_results_stream_key(brand),
            StorageKey::TrackedBrands => tracked_brands_set_key(),
        };
        f.write_str(&key)
    }
}

/// UTC date + hour partition for a brand's mention data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeBucket {
    /// `YYYY-MM-DD`
    pub date_key: String,
    /// `00`..`23`
    pub hour: String,
}

impl TimeBucket {
    /// Buckets an epoch-millisecond timestamp.
    ///
    /// Returns `None` only when the instant is outside chrono's supported range.
    #[must_use]
    pub fn from_epoch_millis(ms: i64) -> Option<Self> {
        let dt = DateTime::from_timestamp_millis(ms)?;
        Some(Self {
            date_key: dt.format("%Y-%m-%d").to_string(),
            hour: dt.format("%H").to_string(),
        })
    }

    /// Builds a bucket from caller-supplied parts, e.g. query parameters.
    ///
    /// `date_key` must be a `YYYY-MM-DD` calendar date and `hour` an integer in
    /// `0..=23`; single-digit hours are zero-padded.
    #[must_use]
    pub fn parse(date_key: &str, hour: &str) -> Option<Self> {
        let date = NaiveDate::parse_from_str(date_key.trim(), "%Y-%m-%d").ok()?;
        let hour: u32 = hour.trim().parse().ok().filter(|h| *h < 24)?;
        Some(Self {
            date_key: date.format("%Y-%m-%d").to_string(),
            hour: format!("{hour:02}"),
        })
    }

    #[must_use]
    pub fn data_key(&self, brand: &str) -> String {
        brand_time_bucket_key(brand, &self.date_key, &self.hour)
    }

    #[must_use]
    pub fn storage_key<'a>(&'a self, brand: &'a str) -> StorageKey<'a> {
        StorageKey::TimeBucket {
            brand,
            date_key: &self.date_key,
            hour: &self.hour,
        }
    }
}

#[cfg(test)]
#[path = "keys_test.rs"]
mod tests;
