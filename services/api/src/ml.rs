use std::time::Duration;

use async_trait::async_trait;
use linkshield_common::error::{LinkshieldError, LinkshieldResult};
use linkshield_scoring::ModelPrediction;
use reqwest::Client;
use serde::Serialize;

/// Narrow interface to the pretrained URL classification model.
/// Constructed once at startup and injected into request handlers.
#[async_trait]
pub trait TextClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> LinkshieldResult<ModelPrediction>;
    async fn ready(&self) -> bool;
}

#[derive(Debug, Clone)]
pub struct ModelClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    text: &'a str,
}

impl ModelClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl TextClassifier for ModelClient {
    async fn classify(&self, text: &str) -> LinkshieldResult<ModelPrediction> {
        let url = format!("{}/predict", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&PredictRequest { text })
            .send()
            .await
            .map_err(|e| LinkshieldError::ModelUnavailable(e.to_string()))?;

        let status = response.status();
        if status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(LinkshieldError::ModelUnavailable(format!("{status}: {body}")));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LinkshieldError::Internal(format!(
                "model request rejected: {status}: {body}"
            )));
        }

        let prediction = response
            .json::<ModelPrediction>()
            .await
            .map_err(|e| LinkshieldError::Internal(format!("malformed model response: {e}")))?;

        if !(0.0..=1.0).contains(&prediction.confidence) {
            return Err(LinkshieldError::Internal(format!(
                "model confidence out of range: {}",
                prediction.confidence
            )));
        }

        Ok(prediction)
    }

    async fn ready(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ModelClient {
        ModelClient::new(&server.uri(), 5).expect("client builds")
    }

    #[tokio::test]
    async fn classify_parses_prediction() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .and(body_json(serde_json::json!({ "text": "http://example.com" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "label": 2,
                "confidence": 0.93
            })))
            .mount(&server)
            .await;

        let prediction = client_for(&server)
            .classify("http://example.com")
            .await
            .expect("should classify");
        assert_eq!(prediction.label, 2);
        assert!((prediction.confidence - 0.93).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn server_error_maps_to_model_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(500).set_body_string("cuda out of memory"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .classify("http://example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, LinkshieldError::ModelUnavailable(_)));
    }

    #[tokio::test]
    async fn connection_refused_maps_to_model_unavailable() {
        let client = ModelClient::new("http://127.0.0.1:1", 1).expect("client builds");
        let err = client.classify("http://example.com").await.unwrap_err();
        assert!(matches!(err, LinkshieldError::ModelUnavailable(_)));
    }

    #[tokio::test]
    async fn client_error_fails_fast_as_internal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .classify("http://example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, LinkshieldError::Internal(_)));
    }

    #[tokio::test]
    async fn malformed_body_maps_to_internal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .classify("http://example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, LinkshieldError::Internal(_)));
    }

    #[tokio::test]
    async fn out_of_range_confidence_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "label": 1,
                "confidence": 1.7
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .classify("http://example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, LinkshieldError::Internal(_)));
    }

    #[tokio::test]
    async fn ready_reflects_health_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        assert!(client_for(&server).ready().await);
    }

    #[tokio::test]
    async fn ready_is_false_when_unreachable() {
        let client = ModelClient::new("http://127.0.0.1:1", 1).expect("client builds");
        assert!(!client.ready().await);
    }
}
