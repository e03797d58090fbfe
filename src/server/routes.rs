//! HTTP routes for andhd.

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::pipeline::{NutritionPipeline, PipelineError};
use crate::AndhrimnirError;

/// Shared state for all routes.
#[derive(Clone)]
struct AppState {
    pipeline: Arc<NutritionPipeline>,
}

/// Build the application router.
pub fn router(pipeline: Arc<NutritionPipeline>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/v1/estimate", post(estimate))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { pipeline })
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// `POST /v1/estimate` — multipart form with an `image` file part and a
/// `mass_grams` text part.
async fn estimate(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut image: Option<Vec<u8>> = None;
    let mut mass_grams: Option<f64> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);

        match name.as_deref() {
            Some("image") => {
                // Only image uploads reach the pipeline.
                if !content_type.unwrap_or_default().starts_with("image/") {
                    return Err(ApiError::new(
                        StatusCode::UNSUPPORTED_MEDIA_TYPE,
                        "the 'image' part must be an image".to_string(),
                    ));
                }
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("failed to read image: {e}")))?;
                image = Some(bytes.to_vec());
            }
            Some("mass_grams") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("failed to read mass: {e}")))?;
                let value = text.trim().parse::<f64>().map_err(|_| {
                    ApiError::bad_request(format!("mass_grams is not a number: '{text}'"))
                })?;
                mass_grams = Some(value);
            }
            _ => {}
        }
    }

    let image = image.ok_or_else(|| ApiError::bad_request("missing 'image' part".to_string()))?;
    let mass_grams = mass_grams
        .ok_or_else(|| ApiError::bad_request("missing 'mass_grams' part".to_string()))?;

    let estimate = state.pipeline.run(&image, mass_grams).await?;

    Ok(Json(json!({
        "food": estimate.food,
        "calories": estimate.calories_total,
        "protein": estimate.protein_total,
    })))
}

/// An error response: a status code and a JSON `{ "error": ... }` body.
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: String) -> Self {
        Self { status, message }
    }

    fn bad_request(message: String) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        let status = match &err.source {
            AndhrimnirError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AndhrimnirError::NoFoodDetected => StatusCode::UNPROCESSABLE_ENTITY,
            AndhrimnirError::FoodNotFound(_) => StatusCode::NOT_FOUND,
            // Upstream transport, extraction and calculation failures are
            // all server-side from the caller's point of view.
            _ => StatusCode::BAD_GATEWAY,
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
