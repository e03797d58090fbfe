//! In-process tests for the HTTP surface.
//!
//! Drives the router with `tower::ServiceExt::oneshot` against fake
//! providers; no sockets and no real remote services.
#![cfg(feature = "server")]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use andhrimnir::providers::traits::{FoodDataProvider, LabelProvider};
use andhrimnir::server::router;
use andhrimnir::types::{FoodId, FoodLabel, RawNutrientRecord};
use andhrimnir::{AndhrimnirError, NutritionPipeline, Result};

// ============================================================================
// Fake providers
// ============================================================================

struct FakeDetector {
    result: Result<&'static str>,
}

#[async_trait]
impl LabelProvider for FakeDetector {
    fn name(&self) -> &str {
        "fake-detector"
    }

    async fn detect_food_label(&self, _image: &[u8]) -> Result<FoodLabel> {
        match &self.result {
            Ok(label) => FoodLabel::new(label),
            Err(AndhrimnirError::NoFoodDetected) => Err(AndhrimnirError::NoFoodDetected),
            Err(_) => Err(AndhrimnirError::Http("fake failure".to_string())),
        }
    }
}

struct FakeFoodData {
    found: bool,
}

#[async_trait]
impl FoodDataProvider for FakeFoodData {
    fn name(&self) -> &str {
        "fake-food-data"
    }

    async fn resolve_label(&self, label: &FoodLabel) -> Result<FoodId> {
        if self.found {
            Ok(FoodId(1105314))
        } else {
            Err(AndhrimnirError::FoodNotFound(label.to_string()))
        }
    }

    async fn fetch_nutrients(&self, _id: FoodId) -> Result<RawNutrientRecord> {
        Ok(RawNutrientRecord::from_pairs([(1003, 1.1), (1008, 89.0)]))
    }
}

fn test_router(detector: FakeDetector, food_data: FakeFoodData) -> Router {
    let pipeline = NutritionPipeline::new(Arc::new(detector), Arc::new(food_data));
    router(Arc::new(pipeline), 1024 * 1024)
}

fn banana_router() -> Router {
    test_router(
        FakeDetector { result: Ok("banana") },
        FakeFoodData { found: true },
    )
}

// ============================================================================
// Multipart helpers
// ============================================================================

const BOUNDARY: &str = "andhrimnir-test-boundary";

/// Build a multipart/form-data body from (name, content-type, data) parts.
fn multipart_body(parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, content_type, data) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match content_type {
            Some(ct) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"upload.jpg\"\r\n\
                     Content-Type: {ct}\r\n\r\n"
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            ),
        }
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn estimate_request(parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/estimate")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn health_returns_ok() {
    let response = banana_router()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");
}

#[tokio::test]
async fn estimate_returns_scaled_totals() {
    let request = estimate_request(&[
        ("image", Some("image/jpeg"), b"jpeg bytes"),
        ("mass_grams", None, b"150"),
    ]);

    let response = banana_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["food"], "banana");
    assert!((body["calories"].as_f64().unwrap() - 133.5).abs() < 1e-9);
    assert!((body["protein"].as_f64().unwrap() - 1.65).abs() < 1e-9);
}

#[tokio::test]
async fn missing_mass_part_is_bad_request() {
    let request = estimate_request(&[("image", Some("image/jpeg"), b"jpeg bytes")]);

    let response = banana_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(response).await["error"].is_string());
}

#[tokio::test]
async fn missing_image_part_is_bad_request() {
    let request = estimate_request(&[("mass_grams", None, b"150")]);

    let response = banana_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_numeric_mass_is_bad_request() {
    let request = estimate_request(&[
        ("image", Some("image/jpeg"), b"jpeg bytes"),
        ("mass_grams", None, b"plenty"),
    ]);

    let response = banana_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_mass_value_is_bad_request() {
    let request = estimate_request(&[
        ("image", Some("image/jpeg"), b"jpeg bytes"),
        ("mass_grams", None, b"-5"),
    ]);

    let response = banana_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_image_upload_is_unsupported_media_type() {
    let request = estimate_request(&[
        ("image", Some("text/plain"), b"not an image"),
        ("mass_grams", None, b"150"),
    ]);

    let response = banana_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn no_food_detected_is_unprocessable() {
    let app = test_router(
        FakeDetector {
            result: Err(AndhrimnirError::NoFoodDetected),
        },
        FakeFoodData { found: true },
    );

    let request = estimate_request(&[
        ("image", Some("image/jpeg"), b"empty plate"),
        ("mass_grams", None, b"150"),
    ]);

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unknown_food_is_not_found() {
    let app = test_router(
        FakeDetector { result: Ok("durian") },
        FakeFoodData { found: false },
    );

    let request = estimate_request(&[
        ("image", Some("image/jpeg"), b"jpeg bytes"),
        ("mass_grams", None, b"150"),
    ]);

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn upstream_failure_is_bad_gateway() {
    let app = test_router(
        FakeDetector {
            result: Err(AndhrimnirError::Http("connection refused".to_string())),
        },
        FakeFoodData { found: true },
    );

    let request = estimate_request(&[
        ("image", Some("image/jpeg"), b"jpeg bytes"),
        ("mass_grams", None, b"150"),
    ]);

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
