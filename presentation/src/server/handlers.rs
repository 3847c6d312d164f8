//! HTTP handlers for the review API

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    routing::{get, post},
};
use peer_review_application::RunReviewUseCase;
use peer_review_domain::{Prompt, ReviewError, ReviewResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use super::error::{ApiError, ApiResult};

/// Body of `POST /api/review`
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub prompt: String,
}

/// Body of `GET /api/health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// State shared across all handlers
///
/// Without usable provider configuration the server still starts; every
/// valid review request is then answered with the configuration error.
#[derive(Clone)]
pub struct AppState {
    max_prompt_chars: usize,
    review: Result<Arc<RunReviewUseCase>, ReviewError>,
}

impl AppState {
    pub fn new(review: RunReviewUseCase) -> Self {
        Self {
            max_prompt_chars: review.settings().max_prompt_chars,
            review: Ok(Arc::new(review)),
        }
    }

    /// State for a server whose providers could not be configured.
    pub fn unconfigured(max_prompt_chars: usize, error: ReviewError) -> Self {
        Self {
            max_prompt_chars,
            review: Err(error),
        }
    }
}

/// POST /api/review - Run the three-stage review for one prompt
///
/// Dropping the request (client disconnect) drops the run, which aborts any
/// provider calls still in flight.
pub async fn review(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<ReviewResult>> {
    let request: ReviewRequest = serde_json::from_slice(&body).map_err(|e| {
        debug!("Rejected request body: {}", e);
        ApiError::invalid_body()
    })?;

    let prompt = Prompt::parse(&request.prompt, state.max_prompt_chars)?;
    info!(chars = prompt.content().chars().count(), "Review requested");

    let review = state.review.as_ref().map_err(|e| {
        error!(kind = e.kind(), "Review unavailable: {}", e.user_message());
        ApiError::from(e.clone())
    })?;

    let result = review.execute(&prompt).await.map_err(|e| {
        error!(
            kind = e.kind(),
            role = e.role().map(|r| r.as_str()),
            "Review failed: {}",
            e.user_message()
        );
        ApiError::from(e)
    })?;

    Ok(Json(result))
}

/// GET /api/health - Liveness check
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/review", post(review))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
