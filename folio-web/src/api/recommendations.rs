//! Recommendations API
//!
//! `GET /api/recommendations` — the read path, up to 10 records newest
//! first. `POST /api/recommendations` — the submission workflow; the
//! success response carries the refreshed list so the page re-renders
//! without a second round trip.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::store::{Recommendation, RecommendationDraft, StoreError};
use crate::validate::FieldErrors;
use crate::workflow::{self, SubmitOutcome};
use crate::AppState;

/// List response body (also returned from a successful submission)
#[derive(Debug, Serialize)]
pub struct RecommendationList {
    pub recommendations: Vec<Recommendation>,
}

/// GET /api/recommendations
///
/// Read failures map to a 502 with diagnostic detail; the page renders
/// that inline in the list area without touching form state.
pub async fn list_recommendations(
    State(state): State<AppState>,
) -> Result<Json<RecommendationList>, ApiError> {
    let recommendations = workflow::refresh(state.store.as_ref())
        .await
        .map_err(ApiError::Read)?;
    Ok(Json(RecommendationList { recommendations }))
}

/// POST /api/recommendations
///
/// Validation failures return 422 with per-field errors and never reach
/// the store. A stored draft returns 201 with the refreshed list.
pub async fn submit_recommendation(
    State(state): State<AppState>,
    Json(draft): Json<RecommendationDraft>,
) -> Result<(StatusCode, Json<RecommendationList>), ApiError> {
    match workflow::submit(state.store.as_ref(), &draft).await {
        Ok(SubmitOutcome::Accepted { recommendations }) => {
            Ok((StatusCode::CREATED, Json(RecommendationList { recommendations })))
        }
        Ok(SubmitOutcome::Rejected(errors)) => Err(ApiError::Validation(errors)),
        Err(e) => Err(ApiError::Write(e)),
    }
}

/// Recommendations API errors
#[derive(Debug)]
pub enum ApiError {
    Validation(FieldErrors),
    Write(StoreError),
    Read(StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(field_errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "error": "Please fix the errors before submitting.",
                    "field_errors": field_errors,
                }),
            ),
            ApiError::Write(e) => {
                error!("Error submitting recommendation: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    json!({
                        "error": "Failed to submit recommendation. Please try again.",
                        "detail": e.to_string(),
                    }),
                )
            }
            ApiError::Read(e) => {
                error!("Error loading recommendations: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    json!({
                        "error": "Error loading recommendations. Please try again later.",
                        "detail": e.to_string(),
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
