//! Normalization from [`RawMention`] to [`NormalizedMention`].
//!
//! The normalizer is total: malformed input is repaired, never rejected. The
//! only repair that reads external state is the timestamp fallback, which asks
//! the injected [`Clock`] for the current time.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::clock::{Clock, SystemClock};
use crate::mention::{MentionMetadata, NormalizedMention, RawMention, RawTimestamp};

/// Author substituted when the raw author is missing or empty.
pub const UNKNOWN_AUTHOR: &str = "unknown";

/// ISO 8601 forms with a numeric offset that RFC 3339 does not cover: minute
/// precision, or an offset written without a colon.
const OFFSET_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%dT%H:%M%:z",
];

/// Read as UTC. `Z` is matched literally.
const NAIVE_DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%MZ",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Normalizes a raw mention using the system clock for the timestamp fallback.
#[must_use]
pub fn normalize_mention(raw: &RawMention, brand: &str) -> NormalizedMention {
    normalize_mention_with_clock(raw, brand, &SystemClock)
}

/// Normalizes a raw mention, attributing it to `brand`.
///
/// An unresolvable timestamp is replaced with `clock.now_millis()`, so two
/// calls with the same malformed input can produce different timestamps.
#[must_use]
pub fn normalize_mention_with_clock<C>(raw: &RawMention, brand: &str, clock: &C) -> NormalizedMention
where
    C: Clock + ?Sized,
{
    let timestamp = raw
        .timestamp
        .as_ref()
        .and_then(resolve_timestamp)
        .unwrap_or_else(|| clock.now_millis());

    let author = if author_is_absent(raw.author.as_deref()) {
        UNKNOWN_AUTHOR.to_string()
    } else {
        raw.author.clone().unwrap_or_default()
    };

    NormalizedMention {
        id: raw.id.clone(),
        brand: brand.to_string(),
        text: raw.text.trim().to_string(),
        timestamp,
        source: raw.platform.clone(),
        metadata: MentionMetadata {
            author,
            url: raw.url.clone(),
            raw: raw.raw.clone(),
            score: score_or_default(raw.score),
        },
    }
}

/// Resolves a raw timestamp into epoch milliseconds.
///
/// Returns `None` for non-finite or out-of-range numbers and for strings that
/// match none of the accepted date formats.
#[must_use]
pub fn resolve_timestamp(ts: &RawTimestamp) -> Option<i64> {
    match ts {
        RawTimestamp::Millis(ms) => finite_millis(*ms),
        RawTimestamp::Text(s) => parse_date_millis(s),
    }
}

// i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn finite_millis(ms: f64) -> Option<i64> {
    if ms.is_finite() && ms >= i64::MIN as f64 && ms < i64::MAX as f64 {
        Some(ms.trunc() as i64)
    } else {
        None
    }
}

fn parse_date_millis(input: &str) -> Option<i64> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.timestamp_millis());
    }
    for fmt in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.timestamp_millis());
        }
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}

/// Falsy check: a missing author and an empty author are both absent.
/// Whitespace-only authors are kept.
fn author_is_absent(author: Option<&str>) -> bool {
    author.is_none_or(str::is_empty)
}

/// Nullish check: only a missing score is defaulted; `0.0` is preserved.
fn score_or_default(score: Option<f64>) -> f64 {
    score.unwrap_or(0.0)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
