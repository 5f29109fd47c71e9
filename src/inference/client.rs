//! HTTP client for the inference service
//!
//! One POST per prompt, no retries. The service is a single trusted local
//! process, so a failed request is reported straight back to the caller.

use async_trait::async_trait;
use std::time::Duration;

use super::{InferenceError, TextGenerator};
use crate::types::config::Settings;
use crate::types::generation::{GenerationRequest, GenerationResult, HealthStatus, Prompt};

#[derive(Debug, Clone)]
pub struct InferenceClient {
    http: reqwest::Client,
    generate_url: String,
    health_url: String,
}

impl InferenceClient {
    pub fn new(settings: &Settings) -> Result<Self, InferenceError> {
        let mut builder = reqwest::Client::builder().user_agent("promptline/0.2.0");
        if let Some(secs) = settings.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| InferenceError::Client(e.to_string()))?;

        Ok(Self {
            http,
            generate_url: settings.generate_url(),
            health_url: settings.health_url(),
        })
    }

    /// Probe `GET /health`.
    ///
    /// The service answers 503 with an `unhealthy` body when the model failed
    /// to load, so the body is decoded whatever the status.
    pub async fn health(&self) -> Result<HealthStatus, InferenceError> {
        let response = self.http.get(&self.health_url).send().await?;
        let status = response.status();
        let health: HealthStatus = response.json().await?;
        tracing::debug!(status = %status, health = ?health.status, "Health probe answered");
        Ok(health)
    }
}

#[async_trait]
impl TextGenerator for InferenceClient {
    async fn generate(&self, prompt: &Prompt) -> Result<GenerationResult, InferenceError> {
        let payload = GenerationRequest { text: prompt };

        let response = self
            .http
            .post(&self.generate_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("API request failed: {}", super::error_chain(&e));
                InferenceError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            // handled failures still carry a JSON `detail`
            tracing::warn!("Inference service answered {}", status);
        }

        let result = response.json::<GenerationResult>().await.map_err(|e| {
            tracing::warn!("Failed to decode generation response: {}", super::error_chain(&e));
            InferenceError::from(e)
        })?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::testing::{refused_url, serve_once};
    use crate::text::normalize_prompt;

    fn client_for(url: &str) -> InferenceClient {
        let mut settings = Settings::default();
        settings.api_url = url.to_string();
        settings.request_timeout_secs = Some(5);
        settings.validate();
        InferenceClient::new(&settings).expect("client builds")
    }

    #[tokio::test]
    async fn test_generate_posts_prompt() {
        let (url, server) = serve_once(200, r#"{"text": "Paris."}"#).await;
        let client = client_for(&url);
        let prompt = normalize_prompt("Capital of France").unwrap();

        let result = client.generate(&prompt).await.unwrap();
        assert_eq!(result, GenerationResult::from_text("Paris."));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /generate HTTP/1.1"));
        assert!(request.contains(r#"{"text":"Capital of France."}"#));
    }

    #[tokio::test]
    async fn test_generate_decodes_error_detail() {
        let (url, server) = serve_once(
            503,
            r#"{"detail": "LLM service is unavailable due to GPU initialization failure."}"#,
        )
        .await;
        let client = client_for(&url);
        let prompt = normalize_prompt("hello").unwrap();

        let result = client.generate(&prompt).await.unwrap();
        assert_eq!(
            result,
            GenerationResult::from_detail(
                "LLM service is unavailable due to GPU initialization failure."
            )
        );
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_generate_undecodable_body_is_network_error() {
        let (url, server) = serve_once(500, "Internal Server Error").await;
        let client = client_for(&url);
        let prompt = normalize_prompt("hello").unwrap();

        let err = client.generate(&prompt).await.unwrap_err();
        assert!(matches!(err, InferenceError::Network(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_generate_connection_refused() {
        let client = client_for(&refused_url().await);
        let prompt = normalize_prompt("hello").unwrap();

        let err = client.generate(&prompt).await.unwrap_err();
        assert!(matches!(err, InferenceError::Network(_)));
    }

    #[tokio::test]
    async fn test_health_probe() {
        let (url, server) = serve_once(
            503,
            r#"{"status": "unhealthy", "message": "LLM is not initialized. GPU may not be available."}"#,
        )
        .await;
        let client = client_for(&url);

        let health = client.health().await.unwrap();
        assert!(!health.is_healthy());
        assert!(health.message.contains("GPU"));

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /health HTTP/1.1"));
    }
}
