//! Router-level tests for the TripPlanner HTTP API

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use tripplanner::config::{GeminiConfig, PhotoConfig, ServerConfig};
use tripplanner::{
    AppState, GeminiClient, PersistentCache, PhotoResolver, PlanService, TextGenerator, web,
};

/// Replies with a fixed completion, like a model that always says the same thing.
struct CannedModel(&'static str);

#[async_trait]
impl TextGenerator for CannedModel {
    async fn generate(&self, _prompt: &str) -> tripplanner::Result<String> {
        Ok(self.0.to_string())
    }
}

const REPETITIVE_REPLY: &str = r#"```json
{
  "summary": "Snow, cafes and temples",
  "days": [
    {"date": "2025-05-01", "plan": [
      {"time": "09:00", "title": "Hadimba Devi Temple"},
      {"time": "11:00", "title": "Mall Road"},
      {"time": "13:00", "title": "Cafe 1947"}
    ]},
    {"date": "2025-05-02", "plan": [
      {"time": "09:00", "title": "Hadimba Devi Temple"},
      {"time": "11:00", "title": "mall road"},
      {"time": "13:00", "title": "Solang Valley"}
    ]}
  ],
  "hotels": [{"name": "Johnson Lodge", "note": "central"}, {"name": "johnson lodge"}],
  "restaurants": [{"name": "Cafe 1947", "note": "river views"}],
  "tips": ["Carry layers"]
}
```"#;

fn app_with(generator: Option<Arc<dyn TextGenerator>>, cache: Option<Arc<PersistentCache>>) -> Router {
    let config = PhotoConfig {
        timeout_seconds: 1,
        ..PhotoConfig::default()
    };
    app_with_photos(generator, &config, cache)
}

fn app_with_photos(
    generator: Option<Arc<dyn TextGenerator>>,
    photos: &PhotoConfig,
    cache: Option<Arc<PersistentCache>>,
) -> Router {
    let photos = PhotoResolver::new(photos, cache).unwrap();
    let state = AppState::new(PlanService::new(generator, 30), photos);
    web::app(&ServerConfig::default(), state)
}

/// Serves `upstream` on an ephemeral port and returns its origin.
async fn spawn_upstream(upstream: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, upstream).await.unwrap();
    });
    format!("http://{addr}")
}

fn failing_upstream(status: StatusCode) -> Router {
    Router::new().fallback(move || async move { (status, "upstream unavailable") })
}

fn json_request(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn manali_form() -> Value {
    json!({
        "origin": "Delhi",
        "destination": "Manali",
        "domestic": true,
        "startDate": "2025-05-01",
        "endDate": "2025-05-04",
        "travelers": {"adults": 2, "kids": 1},
        "budget": "value"
    })
}

#[tokio::test]
async fn test_plan_has_no_repeated_titles() {
    let app = app_with(Some(Arc::new(CannedModel(REPETITIVE_REPLY))), None);
    let response = app
        .oneshot(json_request("/api/ai/plan", &manali_form()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let plan = body_json(response).await;
    assert_eq!(plan["summary"], "Snow, cafes and temples");

    let days = plan["days"].as_array().unwrap();
    let dates: Vec<&str> = days.iter().map(|d| d["date"].as_str().unwrap()).collect();
    assert_eq!(dates, vec!["2025-05-01", "2025-05-02", "2025-05-03", "2025-05-04"]);

    let mut seen = HashSet::new();
    for day in days {
        let items = day["plan"].as_array().unwrap();
        assert!(items.len() <= 6);
        for item in items {
            let title = item["title"].as_str().unwrap().trim().to_lowercase();
            assert!(seen.insert(title.clone()), "repeated title {title}");
        }
        assert_eq!(day["stayTonight"], "Johnson Lodge");
    }

    assert_eq!(plan["hotels"].as_array().unwrap().len(), 1);
    assert_eq!(plan["tips"][0], "Carry layers");
    assert!(plan["costHints"].is_object());
}

#[tokio::test]
async fn test_plan_without_api_key_is_server_error() {
    let app = app_with(None, None);
    let response = app
        .oneshot(json_request("/api/ai/plan", &manali_form()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await, json!({"error": "GEMINI_API_KEY missing"}));
}

#[tokio::test]
async fn test_plan_with_blank_destination_is_bad_request() {
    let app = app_with(Some(Arc::new(CannedModel("{}"))), None);
    let mut form = manali_form();
    form["destination"] = json!("  ");

    let response = app.oneshot(json_request("/api/ai/plan", &form)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_plan_with_malformed_body_is_bad_request() {
    let app = app_with(Some(Arc::new(CannedModel("{}"))), None);
    let request = Request::builder()
        .method("POST")
        .uri("/api/ai/plan")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_trip_sheet_without_plan() {
    let app = app_with(None, None);
    let body = json!({"form": manali_form(), "intensity": "relaxed", "interests": ["nature"]});

    let response = app.oneshot(json_request("/api/trip/sheet", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let sheet = body_json(response).await;
    assert_eq!(sheet["nights"], 3);
    assert_eq!(sheet["days"].as_array().unwrap().len(), 4);
    assert!(sheet["days"].as_array().unwrap().iter().all(|d| d["items"].as_array().unwrap().len() == 4));
    assert_eq!(sheet["tierComparison"].as_array().unwrap().len(), 3);
    assert!(sheet["packingList"].as_array().unwrap().contains(&json!("Sunscreen")));
    assert!(sheet["itineraryText"].as_str().unwrap().starts_with("Manali (2025-05-01 → 2025-05-04)"));

    let labels: Vec<&str> = sheet["links"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["label"].as_str().unwrap())
        .collect();
    assert!(labels.contains(&"Flights"));
    assert!(labels.contains(&"Directions"));
}

#[tokio::test]
async fn test_photo_redirects_to_cached_image() {
    let dir = tempfile::tempdir().unwrap();
    let cache = Arc::new(PersistentCache::open(dir.path()).unwrap());
    cache
        .put(
            "photo:1000x600:jogini waterfall",
            "https://upload.wikimedia.org/jogini.jpg".to_string(),
            Duration::from_secs(300),
        )
        .await
        .unwrap();

    let app = app_with(None, Some(cache));
    let request = Request::builder()
        .uri("/api/place-photo?q=Jogini%20Waterfall&w=1000&h=600")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://upload.wikimedia.org/jogini.jpg"
    );
    assert_eq!(
        response.headers()[header::CACHE_CONTROL],
        "public, max-age=86400, stale-while-revalidate=604800"
    );
}

#[tokio::test]
async fn test_health_reports_planner_state() {
    let app = app_with(None, None);
    let request = Request::builder().uri("/api/health").body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let health = body_json(response).await;
    assert_eq!(health["status"], "ok");
    assert_eq!(health["plannerConfigured"], false);
}

#[tokio::test]
async fn test_photo_source_error_redirects_to_placeholder() {
    let origin = spawn_upstream(failing_upstream(StatusCode::INTERNAL_SERVER_ERROR)).await;
    let photos = PhotoConfig {
        timeout_seconds: 5,
        wikipedia_url: format!("{origin}/{{lang}}"),
        commons_api_url: format!("{origin}/commons"),
        openverse_api_url: format!("{origin}/openverse"),
        ..PhotoConfig::default()
    };

    let app = app_with_photos(None, &photos, None);
    let request = Request::builder()
        .uri("/api/photo?q=Hadimba%20Devi%20Temple&w=640")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://picsum.photos/seed/Hadimba%20Devi%20Temple/640/600"
    );
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
}

#[tokio::test]
async fn test_photo_with_duplicated_key_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cache = Arc::new(PersistentCache::open(dir.path()).unwrap());
    cache
        .put(
            "photo:800x600:travel",
            "https://upload.wikimedia.org/travel.jpg".to_string(),
            Duration::from_secs(300),
        )
        .await
        .unwrap();

    let app = app_with(None, Some(cache));
    let request = Request::builder()
        .uri("/api/photo?q=Goa&q=Manali")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://upload.wikimedia.org/travel.jpg"
    );
}

#[tokio::test]
async fn test_gemini_rate_limit_gives_fallback_plan() {
    let origin = spawn_upstream(failing_upstream(StatusCode::TOO_MANY_REQUESTS)).await;
    let gemini = GeminiConfig {
        base_url: origin,
        timeout_seconds: 5,
        ..GeminiConfig::default()
    };
    let generator: Arc<dyn TextGenerator> =
        Arc::new(GeminiClient::new(&gemini, "test-key".to_string()).unwrap());

    let app = app_with(Some(generator), None);
    let response = app
        .oneshot(json_request("/api/ai/plan", &manali_form()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let plan = body_json(response).await;
    let days = plan["days"].as_array().unwrap();
    assert_eq!(days.len(), 4);
    assert!(days.iter().all(|d| !d["plan"].as_array().unwrap().is_empty()));
    assert!(!plan["hotels"].as_array().unwrap().is_empty());
    assert_eq!(plan["costHints"]["stayPerNightHintINR"], 0.0);
}
