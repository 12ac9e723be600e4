//! HTTP surface: liveness, health and the recipe analysis endpoint.

use std::any::Any;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any as AnyHeader, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::orchestrator::RecipeAnalyzer;
use crate::recipe_schema::{RecipeRequest, RecipeResponse, RequestError};

pub const SERVICE_NAME: &str = "Smart Recipe Analyzer API";

pub type AppState = Arc<RecipeAnalyzer>;

#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub ai_enabled: bool,
}

/// Error body, `{"detail": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unprocessable(String),
    Internal(String),
}

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Unprocessable(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail),
            ApiError::Unprocessable(detail) => (StatusCode::UNPROCESSABLE_ENTITY, detail),
            ApiError::Internal(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal server error: {}", detail),
            ),
        };
        (status, Json(ErrorDetail { detail })).into_response()
    }
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Smart Recipe Analyzer API with AI is running!".to_string(),
    })
}

pub async fn health(State(analyzer): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        ai_enabled: analyzer.ai_enabled(),
    })
}

pub async fn analyze_recipes(
    State(analyzer): State<AppState>,
    payload: Result<Json<RecipeRequest>, JsonRejection>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let Json(request) = payload?;
    tracing::info!(
        ingredients = request.ingredients.len(),
        "Received POST request"
    );

    let analysis = analyzer.analyze(&request).await?;
    Ok(Json(analysis.response))
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown error".to_string()
    };
    tracing::error!(%detail, "Unexpected error while handling request");
    ApiError::Internal(detail).into_response()
}

fn allow_origin(allowed_origins: &[String]) -> AllowOrigin {
    if allowed_origins.iter().any(|origin| origin.trim() == "*") {
        return AllowOrigin::any();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(%origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    AllowOrigin::list(origins)
}

/// `*` anywhere in the list allows every origin.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allow_origin(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(AnyHeader)
        .expose_headers(AnyHeader)
}

pub fn router(analyzer: RecipeAnalyzer, allowed_origins: &[String]) -> Router {
    let state: AppState = Arc::new(analyzer);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/analyze-recipes", post(analyze_recipes))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
