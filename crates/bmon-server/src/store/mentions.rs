use bmon_core::keys::{brand_latest_analysis_key, brand_mentions_key, brand_queue_key};
use bmon_core::{Availability, NormalizedMention, TimeBucket};
use serde_json::Value;

use super::{decode, encode, MemoryStore, StoreError};

/// Appends normalized mentions to the brand's raw queue, its mentions
/// collection, and the time bucket each mention falls in.
///
/// # Errors
///
/// Returns [`StoreError::Codec`] if a mention cannot be encoded.
pub async fn push_mentions(
    store: &MemoryStore,
    brand: &str,
    mentions: &[NormalizedMention],
) -> Result<(), StoreError> {
    let queue_key = brand_queue_key(brand);
    let mentions_key = brand_mentions_key(brand);

    for mention in mentions {
        let payload = encode(&queue_key, mention)?;

        store.push(&queue_key, [payload.clone()]).await;
        store.push(&mentions_key, [payload.clone()]).await;

        match TimeBucket::from_epoch_millis(mention.timestamp) {
            Some(bucket) => {
                store.push(&bucket.data_key(brand), [payload]).await;
            }
            None => tracing::warn!(
                brand,
                mention_id = %mention.id,
                timestamp = mention.timestamp,
                "mention timestamp outside bucketable range; stored without time bucket"
            ),
        }
    }

    let queue_len = store.list_len(&queue_key).await;
    tracing::debug!(brand, count = mentions.len(), queue_len, "mentions queued");
    Ok(())
}

/// Reads up to `limit` of the newest mentions stored at `key`.
///
/// # Errors
///
/// Returns [`StoreError::Codec`] if a stored entry is not a valid mention.
pub async fn list_mentions(
    store: &MemoryStore,
    key: &str,
    limit: usize,
) -> Result<Vec<NormalizedMention>, StoreError> {
    store
        .tail(key, limit)
        .await
        .iter()
        .map(|raw| decode(key, raw))
        .collect()
}

/// The latest analysis result for a brand, or `Waiting` if none has been
/// written yet.
///
/// # Errors
///
/// Returns [`StoreError::Codec`] if the stored result is not valid JSON.
pub async fn latest_analysis(
    store: &MemoryStore,
    brand: &str,
) -> Result<Availability<Value>, StoreError> {
    let key = brand_latest_analysis_key(brand);
    let value = store
        .get(&key)
        .await
        .map(|raw| decode(&key, &raw))
        .transpose()?;
    Ok(value.into())
}

#[cfg(test)]
mod tests {
    use bmon_core::{normalize_mention_with_clock, FixedClock, RawMention, RawTimestamp};
    use serde_json::json;

    use super::*;

    fn mention(id: &str, timestamp: &str) -> NormalizedMention {
        let raw = RawMention {
            id: id.to_string(),
            text: format!(" mention {id} "),
            timestamp: Some(RawTimestamp::Text(timestamp.to_string())),
            platform: "reddit".to_string(),
            author: None,
            url: None,
            raw: None,
            score: None,
        };
        normalize_mention_with_clock(&raw, "acme", &FixedClock(0))
    }

    #[tokio::test]
    async fn push_writes_queue_collection_and_bucket() {
        let store = MemoryStore::new();
        let mentions = vec![
            mention("m1", "2024-03-01T10:15:00Z"),
            mention("m2", "2024-03-01T11:00:00Z"),
        ];
        push_mentions(&store, "acme", &mentions).await.expect("push");

        assert_eq!(store.list_len("queue:acme").await, 2);
        assert_eq!(store.list_len("data:brand:acme:mentions").await, 2);
        assert_eq!(store.list_len("data:acme:2024-03-01:10").await, 1);
        assert_eq!(store.list_len("data:acme:2024-03-01:11").await, 1);
        assert_eq!(store.list_len("queue:acme:processed").await, 0);
    }

    fn assert_send<T: Send>(_: &T) {}

    #[test]
    fn push_future_is_send() {
        let store = MemoryStore::new();
        let mentions = vec![mention("m1", "2024-03-01T10:15:00Z")];
        let fut = push_mentions(&store, "acme", &mentions);
        assert_send(&fut);
    }

    #[tokio::test]
    async fn list_round_trips_pushed_mentions() {
        let store = MemoryStore::new();
        let mentions = vec![mention("m1", "2024-03-01T10:15:00Z")];
        push_mentions(&store, "acme", &mentions).await.expect("push");

        let listed = list_mentions(&store, "data:acme:2024-03-01:10", 50)
            .await
            .expect("list");
        assert_eq!(listed, mentions);
    }

    #[tokio::test]
    async fn latest_is_waiting_until_written() {
        let store = MemoryStore::new();
        let latest = latest_analysis(&store, "acme").await.expect("latest");
        assert!(latest.is_waiting());

        store
            .set("latest_analysis:acme", json!({"score": 0.4}).to_string())
            .await;
        let latest = latest_analysis(&store, "acme").await.expect("latest");
        assert_eq!(latest, Availability::Ready(json!({"score": 0.4})));
    }
}
