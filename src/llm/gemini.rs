//! Google Gemini `generateContent` client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use super::TextGenerator;
use crate::config::GeminiConfig;
use crate::{Result, TripPlannerError};

/// Text used when the response carries no candidate
const EMPTY_COMPLETION: &str = "{}";

pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
    api_key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first part of the first candidate.
    pub(crate) fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

impl GeminiClient {
    /// Builds a client; `api_key` must already be resolved from config or env.
    pub fn new(config: &GeminiConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("TripPlanner/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TripPlannerError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url,
            self.model,
            urlencoding::encode(&self.api_key)
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        };

        let start = Instant::now();
        let response = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(|e| TripPlannerError::api(format!("Gemini request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(
                %status,
                detail = %detail.chars().take(300).collect::<String>(),
                "Gemini returned an error status, continuing with fallback plan"
            );
            return Ok(EMPTY_COMPLETION.to_string());
        }

        let parsed: GenerateResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Failed to decode Gemini response: {}", e);
                GenerateResponse::default()
            }
        };

        let text = parsed.first_text().unwrap_or_else(|| {
            debug!("Gemini response had no candidate text");
            EMPTY_COMPLETION.to_string()
        });

        info!(
            "Gemini completion received in {:.3}s ({} chars)",
            start.elapsed().as_secs_f64(),
            text.len()
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: "hello" }],
            }],
            generation_config: GenerationConfig { temperature: 0.6 },
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert!(value["generationConfig"]["temperature"].is_number());
    }

    #[test]
    fn test_first_text_extraction() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"parts": [{"text": "{\"summary\":\"x\"}"}, {"text": "ignored"}]}},
                {"content": {"parts": [{"text": "second candidate"}]}}
            ]
        }))
        .unwrap();
        assert_eq!(response.first_text().as_deref(), Some("{\"summary\":\"x\"}"));
    }

    #[test]
    fn test_missing_candidates_yield_none() {
        let blocked: GenerateResponse =
            serde_json::from_value(json!({"promptFeedback": {"blockReason": "SAFETY"}})).unwrap();
        assert!(blocked.first_text().is_none());

        let no_parts: GenerateResponse =
            serde_json::from_value(json!({"candidates": [{"finishReason": "STOP"}]})).unwrap();
        assert!(no_parts.first_text().is_none());
    }

    #[test]
    fn test_endpoint_format() {
        let config = GeminiConfig {
            base_url: "https://example.test/v1beta/".to_string(),
            ..GeminiConfig::default()
        };
        let client = GeminiClient::new(&config, "k&y".to_string()).unwrap();
        assert_eq!(
            client.endpoint(),
            "https://example.test/v1beta/models/gemini-1.5-flash:generateContent?key=k%26y"
        );
    }

    async fn serve_status(status: axum::http::StatusCode, body: serde_json::Value) -> GeminiConfig {
        use axum::routing::post;
        use axum::{Json, Router};

        let app = Router::new().route(
            "/models/{action}",
            post(move || {
                let body = body.clone();
                async move { (status, Json(body)) }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        GeminiConfig {
            base_url: format!("http://{addr}"),
            timeout_seconds: 5,
            ..GeminiConfig::default()
        }
    }

    #[tokio::test]
    async fn test_error_status_yields_empty_object() {
        let config = serve_status(
            axum::http::StatusCode::TOO_MANY_REQUESTS,
            json!({"error": {"code": 429, "status": "RESOURCE_EXHAUSTED"}}),
        )
        .await;
        let client = GeminiClient::new(&config, "test-key".to_string()).unwrap();
        assert_eq!(client.generate("plan a trip").await.unwrap(), "{}");
    }

    #[tokio::test]
    async fn test_candidate_text_is_returned() {
        let config = serve_status(
            axum::http::StatusCode::OK,
            json!({"candidates": [{"content": {"parts": [{"text": "{\"summary\":\"Goa\"}"}]}}]}),
        )
        .await;
        let client = GeminiClient::new(&config, "test-key".to_string()).unwrap();
        assert_eq!(client.generate("plan a trip").await.unwrap(), r#"{"summary":"Goa"}"#);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_api_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = GeminiConfig {
            base_url: format!("http://{addr}"),
            ..GeminiConfig::default()
        };
        let client = GeminiClient::new(&config, "test-key".to_string()).unwrap();
        assert!(matches!(
            client.generate("plan a trip").await,
            Err(TripPlannerError::Api { .. })
        ));
    }
}
