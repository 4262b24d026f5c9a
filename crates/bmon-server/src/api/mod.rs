mod brands;
mod mentions;

use std::sync::Arc;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use bmon_core::keys::validate_brand_segment;
use bmon_core::{ApiEnvelope, Clock};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState};
use crate::store::{MemoryStore, StoreError};

#[derive(Clone)]
pub struct AppState {
    pub store: MemoryStore,
    /// Read only when a mention's timestamp cannot be resolved.
    pub clock: Arc<dyn Clock>,
}

/// Successful response wrapped in the envelope; the HTTP status mirrors
/// `statusCode`.
#[derive(Debug)]
pub struct ApiReply<T: Serialize>(pub ApiEnvelope<T>);

impl<T: Serialize> IntoResponse for ApiReply<T> {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.0.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.0)).into_response()
    }
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = ApiEnvelope::<()>::error(self.status.as_u16(), self.message);
        (self.status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

pub(super) fn normalize_limit(limit: Option<i64>) -> usize {
    let clamped = limit.unwrap_or(50).clamp(1, 200);
    usize::try_from(clamped).unwrap_or(50)
}

pub(super) fn map_store_error(request_id: &str, error: &StoreError) -> ApiError {
    tracing::error!(request_id, error = %error, "store operation failed");
    ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "store operation failed")
}

/// Rejects path brands that would produce ambiguous storage keys.
pub(super) fn checked_brand(slug: &str) -> Result<&str, ApiError> {
    validate_brand_segment(slug).map_err(|e| ApiError::bad_request(e.to_string()))?;
    Ok(slug)
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

fn api_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/brands",
            get(brands::list_brands).post(brands::create_brand),
        )
        .route(
            "/api/v1/brands/{slug}",
            get(brands::get_brand).delete(brands::delete_brand),
        )
        .route(
            "/api/v1/brands/{slug}/mentions",
            get(mentions::list_mentions).post(mentions::ingest_mentions),
        )
        .route(
            "/api/v1/brands/{slug}/latest",
            get(mentions::latest_analysis),
        )
        .route("/api/v1/brands/{slug}/keys", get(brands::brand_keys))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(api_router(rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

async fn health() -> ApiReply<HealthData> {
    ApiReply(ApiEnvelope::ok(HealthData { status: "ok" }, "healthy"))
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
