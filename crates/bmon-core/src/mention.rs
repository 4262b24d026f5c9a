use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Timestamp as received from a platform: epoch milliseconds or a date string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Millis(f64),
    Text(String),
}

impl From<i64> for RawTimestamp {
    #[allow(clippy::cast_precision_loss)]
    fn from(ms: i64) -> Self {
        Self::Millis(ms as f64)
    }
}

impl From<&str> for RawTimestamp {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// A mention as handed over by an ingester. Nothing here is validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMention {
    pub id: String,
    pub text: String,
    /// Missing or null timestamps take the same wall-clock fallback as
    /// unparseable ones.
    #[serde(default)]
    pub timestamp: Option<RawTimestamp>,
    pub platform: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub raw: Option<Value>,
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentionMetadata {
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
    pub score: f64,
}

/// Canonical mention, the unit persisted in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMention {
    pub id: String,
    /// Always the brand the caller attributed the mention to.
    pub brand: String,
    pub text: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub source: String,
    pub metadata: MentionMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_mention_accepts_numeric_timestamp() {
        let raw: RawMention = serde_json::from_str(
            r#"{"id":"m1","text":"hi","timestamp":1709287200000,"platform":"reddit"}"#,
        )
        .expect("deserialize");
        assert_eq!(raw.timestamp, Some(RawTimestamp::Millis(1_709_287_200_000.0)));
        assert!(raw.author.is_none());
        assert!(raw.score.is_none());
    }

    #[test]
    fn raw_mention_accepts_string_timestamp_and_null_score() {
        let raw: RawMention = serde_json::from_str(
            r#"{"id":"m1","text":"hi","timestamp":"2024-03-01T10:00:00Z","platform":"twitter","author":"","score":null}"#,
        )
        .expect("deserialize");
        assert_eq!(
            raw.timestamp,
            Some(RawTimestamp::Text("2024-03-01T10:00:00Z".to_string()))
        );
        assert_eq!(raw.author.as_deref(), Some(""));
        assert!(raw.score.is_none());
    }

    #[test]
    fn normalized_mention_omits_absent_url_and_raw() {
        let mention = NormalizedMention {
            id: "m1".to_string(),
            brand: "acme".to_string(),
            text: "hello".to_string(),
            timestamp: 1_709_287_200_000,
            source: "twitter".to_string(),
            metadata: MentionMetadata {
                author: "unknown".to_string(),
                url: None,
                raw: None,
                score: 0.0,
            },
        };
        let json = serde_json::to_value(&mention).expect("serialize");
        assert!(json["metadata"].get("url").is_none());
        assert!(json["metadata"].get("raw").is_none());
        assert_eq!(json["metadata"]["author"], "unknown");
        assert_eq!(json["timestamp"], 1_709_287_200_000_i64);
    }
}
