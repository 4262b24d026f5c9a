//! Brand routes.
//!
//! - `GET    /api/v1/brands`:             tracked brand records
//! - `POST   /api/v1/brands`:             register a brand
//! - `GET    /api/v1/brands/{slug}`:      one brand record
//! - `DELETE /api/v1/brands/{slug}`:      stop tracking a brand
//! - `GET    /api/v1/brands/{slug}/keys`: storage keys for a brand

use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    Extension, Json,
};
use bmon_core::keys::tracked_brands_set_key;
use bmon_core::{ApiEnvelope, BrandRecord, StorageKey};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;
use crate::store::{self, BrandWriteError};

use super::{checked_brand, map_store_error, ApiError, ApiReply, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct CreateBrandRequest {
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct StorageKeyItem {
    pub purpose: &'static str,
    pub key: String,
}

pub(super) async fn list_brands(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<ApiReply<Vec<BrandRecord>>, ApiError> {
    let brands = store::list_brands(&state.store)
        .await
        .map_err(|e| map_store_error(&req_id.0, &e))?;

    Ok(ApiReply(ApiEnvelope::ok(brands, "Brands fetched successfully")))
}

pub(super) async fn create_brand(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<CreateBrandRequest>, JsonRejection>,
) -> Result<ApiReply<BrandRecord>, ApiError> {
    let Json(body) = body?;

    let record = store::create_brand(&state.store, &body.name, body.keywords)
        .await
        .map_err(|e| match e {
            BrandWriteError::EmptyName | BrandWriteError::InvalidSlug(..) => {
                ApiError::bad_request(e.to_string())
            }
            BrandWriteError::Duplicate(_) => ApiError::new(StatusCode::CONFLICT, e.to_string()),
            BrandWriteError::Store(ref inner) => map_store_error(&req_id.0, inner),
        })?;

    Ok(ApiReply(ApiEnvelope::created(
        record,
        "Brand created successfully",
    )))
}

pub(super) async fn get_brand(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    path: Result<Path<String>, PathRejection>,
) -> Result<ApiReply<BrandRecord>, ApiError> {
    let Path(slug) = path?;
    let record = store::get_brand(&state.store, checked_brand(&slug)?)
        .await
        .map_err(|e| map_store_error(&req_id.0, &e))?
        .ok_or_else(|| ApiError::not_found(format!("brand '{slug}' not found")))?;

    Ok(ApiReply(ApiEnvelope::ok(record, "Brand fetched successfully")))
}

pub(super) async fn delete_brand(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<ApiReply<String>, ApiError> {
    let Path(slug) = path?;
    if !store::delete_brand(&state.store, checked_brand(&slug)?).await {
        return Err(ApiError::not_found(format!("brand '{slug}' not found")));
    }
    Ok(ApiReply(ApiEnvelope::ok(slug, "Brand deleted successfully")))
}

/// Every storage key for the brand. Keys are computed, so the brand does not
/// need to be tracked.
pub(super) async fn brand_keys(
    path: Result<Path<String>, PathRejection>,
) -> Result<ApiReply<Vec<StorageKeyItem>>, ApiError> {
    let Path(slug) = path?;
    let brand = checked_brand(&slug)?;

    let mut keys: Vec<StorageKeyItem> = StorageKey::all_for_brand(brand)
        .iter()
        .map(|key| StorageKeyItem {
            purpose: key.purpose(),
            key: key.to_string(),
        })
        .collect();
    keys.push(StorageKeyItem {
        purpose: StorageKey::TrackedBrands.purpose(),
        key: tracked_brands_set_key(),
    });

    Ok(ApiReply(ApiEnvelope::ok(keys, "Storage keys computed")))
}
