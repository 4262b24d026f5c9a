use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};
use bmon_core::keys::brand_mentions_key;
use bmon_core::{
    normalize_mention_with_clock, ApiEnvelope, Availability, NormalizedMention, RawMention,
    TimeBucket,
};
use serde::Deserialize;
use serde_json::Value;

use crate::middleware::RequestId;
use crate::store;

use super::{checked_brand, map_store_error, normalize_limit, ApiError, ApiReply, AppState};

/// Decodes an ingest body holding one raw mention or an array of them. The
/// shape is picked up front so decode errors name the offending field.
fn raw_mentions_from_body(body: Value) -> Result<Vec<RawMention>, ApiError> {
    let parsed = if body.is_array() {
        serde_json::from_value::<Vec<RawMention>>(body)
    } else {
        serde_json::from_value::<RawMention>(body).map(|raw| vec![raw])
    };
    parsed.map_err(|e| {
        ApiError::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("invalid raw mention: {e}"),
        )
    })
}

#[derive(Debug, Deserialize)]
pub(super) struct MentionsQuery {
    pub date: Option<String>,
    pub hour: Option<String>,
    pub limit: Option<i64>,
}

/// `POST /api/v1/brands/{slug}/mentions`: normalize and enqueue mentions for
/// a tracked brand.
pub(super) async fn ingest_mentions(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<ApiReply<Vec<NormalizedMention>>, ApiError> {
    let Path(slug) = path?;
    let brand = checked_brand(&slug)?;
    let Json(body) = body?;
    let raws = raw_mentions_from_body(body)?;

    let tracked = store::get_brand(&state.store, brand)
        .await
        .map_err(|e| map_store_error(&req_id.0, &e))?;
    if tracked.is_none() {
        return Err(ApiError::not_found(format!("brand '{slug}' not found")));
    }

    let normalized: Vec<NormalizedMention> = raws
        .iter()
        .map(|raw| normalize_mention_with_clock(raw, brand, state.clock.as_ref()))
        .collect();

    store::push_mentions(&state.store, brand, &normalized)
        .await
        .map_err(|e| map_store_error(&req_id.0, &e))?;

    tracing::info!(brand, count = normalized.len(), "mentions ingested");

    Ok(ApiReply(ApiEnvelope::created(
        normalized,
        "Mentions normalized and queued",
    )))
}

/// `GET /api/v1/brands/{slug}/mentions`: newest mentions, either from one
/// time bucket (`date` + `hour`) or from the brand's full collection.
pub(super) async fn list_mentions(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<MentionsQuery>, QueryRejection>,
) -> Result<ApiReply<Vec<NormalizedMention>>, ApiError> {
    let Path(slug) = path?;
    let Query(query) = query?;
    let brand = checked_brand(&slug)?;

    let key = match (query.date.as_deref(), query.hour.as_deref()) {
        (Some(date), Some(hour)) => TimeBucket::parse(date, hour)
            .ok_or_else(|| {
                ApiError::bad_request(format!(
                    "invalid time bucket '{date}' / '{hour}'; expected YYYY-MM-DD and 0-23"
                ))
            })?
            .data_key(brand),
        (None, None) => brand_mentions_key(brand),
        _ => {
            return Err(ApiError::bad_request(
                "date and hour must be given together",
            ))
        }
    };

    let mentions = store::list_mentions(&state.store, &key, normalize_limit(query.limit))
        .await
        .map_err(|e| map_store_error(&req_id.0, &e))?;

    Ok(ApiReply(ApiEnvelope::ok(
        mentions,
        "Mentions fetched successfully",
    )))
}

/// `GET /api/v1/brands/{slug}/latest`: latest analysis result or the
/// `"waiting"` sentinel.
pub(super) async fn latest_analysis(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    path: Result<Path<String>, PathRejection>,
) -> Result<ApiReply<Availability<Value>>, ApiError> {
    let Path(slug) = path?;
    let brand = checked_brand(&slug)?;
    let latest = store::latest_analysis(&state.store, brand)
        .await
        .map_err(|e| map_store_error(&req_id.0, &e))?;

    let message = if latest.is_waiting() {
        "Analysis not available yet"
    } else {
        "Latest analysis fetched successfully"
    };
    Ok(ApiReply(ApiEnvelope::ok(latest, message)))
}
