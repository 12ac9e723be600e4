use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use recipe_analyzer::cli::DEFAULT_ALLOWED_ORIGINS;
use recipe_analyzer::generation::{GenerationError, RecipeGenerator};
use recipe_analyzer::orchestrator::RecipeAnalyzer;
use recipe_analyzer::server::router;
use serde_json::{json, Value};
use tower::ServiceExt;

#[derive(Debug, Default)]
struct CountingGenerator {
    reply: Option<String>,
    calls: AtomicUsize,
}

#[async_trait]
impl RecipeGenerator for CountingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone().ok_or(GenerationError::NoChoices)
    }

    fn model_name(&self) -> &str {
        "counting"
    }
}

fn origins() -> Vec<String> {
    DEFAULT_ALLOWED_ORIGINS.split(',').map(str::to_string).collect()
}

fn app(analyzer: RecipeAnalyzer) -> Router {
    router(analyzer, &origins())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn root_reports_liveness() {
    let (status, body) = send(app(RecipeAnalyzer::offline()), get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Smart Recipe Analyzer API with AI is running!");
}

#[tokio::test]
async fn health_reflects_credential() {
    let (status, body) = send(app(RecipeAnalyzer::offline()), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"status": "healthy", "service": "Smart Recipe Analyzer API", "ai_enabled": false})
    );

    let generator: Arc<dyn RecipeGenerator> = Arc::new(CountingGenerator::default());
    let (_, body) = send(app(RecipeAnalyzer::new(Some(generator))), get("/health")).await;
    assert_eq!(body["ai_enabled"], true);
}

#[tokio::test]
async fn offline_analysis_returns_fallback_recipe() {
    let request = post_json(
        "/analyze-recipes",
        json!({"ingredients": [{"name": "chicken"}, {"name": "rice", "quantity": "1 cup"}]}),
    );
    let (status, body) = send(app(RecipeAnalyzer::offline()), request).await;

    assert_eq!(status, StatusCode::OK);
    let recipes = body["recipes"].as_array().unwrap();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0]["name"], "Simple chicken & rice Dish");
    assert_eq!(recipes[0]["cookingTime"], "25 minutes");
    assert_eq!(recipes[0]["difficulty"], "Easy");
    assert_eq!(recipes[0]["servings"], 4);
    assert_eq!(recipes[0]["nutrition"]["calories"], 320);
    assert_eq!(
        body["message"],
        "Generated 1 recipe using your ingredients: chicken, rice!"
    );
}

#[tokio::test]
async fn failing_generator_never_surfaces_an_error() {
    let generator: Arc<dyn RecipeGenerator> = Arc::new(CountingGenerator::default());
    let request = post_json(
        "/analyze-recipes",
        json!({
            "ingredients": [{"name": "egg"}],
            "dietary_restrictions": ["vegetarian"],
            "cuisine_preference": "French"
        }),
    );
    let (status, body) = send(app(RecipeAnalyzer::new(Some(generator))), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recipes"][0]["name"], "Simple egg Dish");
}

#[tokio::test]
async fn empty_ingredients_rejected_without_generation() {
    let generator = Arc::new(CountingGenerator {
        reply: Some(r#"{"recipes": []}"#.to_string()),
        ..CountingGenerator::default()
    });
    let analyzer = RecipeAnalyzer::new(Some(generator.clone()));
    let request = post_json("/analyze-recipes", json!({"ingredients": []}));
    let (status, body) = send(app(analyzer), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "No ingredients provided");
    assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn blank_ingredient_name_is_rejected() {
    let request = post_json(
        "/analyze-recipes",
        json!({"ingredients": [{"name": "egg"}, {"name": ""}]}),
    );
    let (status, body) = send(app(RecipeAnalyzer::offline()), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("position 1"));
}

#[tokio::test]
async fn undecodable_body_is_unprocessable() {
    let request = post_json("/analyze-recipes", json!({"ingredients": "chicken"}));
    let (status, body) = send(app(RecipeAnalyzer::offline()), request).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn cors_preflight_allows_dev_origin_only() {
    let preflight = |origin: &str| {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/analyze-recipes")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap()
    };

    let response = app(RecipeAnalyzer::offline())
        .oneshot(preflight("http://localhost:5173"))
        .await
        .unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );

    let response = app(RecipeAnalyzer::offline())
        .oneshot(preflight("http://evil.example"))
        .await
        .unwrap();
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn wildcard_origin_allows_any_origin() {
    let service = router(RecipeAnalyzer::offline(), &["*".to_string()]);
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/analyze-recipes")
        .header(header::ORIGIN, "http://anywhere.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = service.oneshot(request).await.unwrap();
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}
