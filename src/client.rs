use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::Config;
use crate::detector::{DetectorError, DetectorResult, ScoreBackend};
use crate::resolver::RawScores;

/// HTTP client for the Watson NLP EmotionPredict service.
///
/// One outbound request per `score` call; no caching and no retries.
/// Retry policy, if ever wanted, belongs to the caller.
pub struct EmotionClient {
    client: Client,
    endpoint: String,
    model_id: String,
    api_key: Option<String>,
}

impl EmotionClient {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoint: config.endpoint.clone(),
            model_id: config.model_id.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Extract the per-category mapping from a response body.
    ///
    /// The service answers with `{"emotionPredictions": [{"emotion": {..}}]}`.
    /// A missing `emotionPredictions` field, or a prediction without an
    /// `emotion` object, is a contract mismatch; only an empty prediction
    /// list means the text produced no scores.
    fn parse_scores(body: &Value) -> DetectorResult<Option<RawScores>> {
        let predictions = body
            .get("emotionPredictions")
            .and_then(|p| p.as_array())
            .ok_or_else(|| {
                DetectorError::BackendProtocol(
                    "response has no emotionPredictions field".to_string(),
                )
            })?;

        let first = match predictions.first() {
            Some(first) => first,
            None => return Ok(None),
        };

        let emotion = match first.get("emotion") {
            Some(Value::Object(emotion)) => emotion,
            _ => {
                return Err(DetectorError::BackendProtocol(
                    "prediction has no emotion object".to_string(),
                ))
            }
        };

        let mut scores = RawScores::new();
        for (category, score) in emotion {
            let score = score.as_f64().ok_or_else(|| {
                DetectorError::BackendProtocol(format!(
                    "non-numeric score for category '{category}'"
                ))
            })?;
            scores.insert(category.clone(), score);
        }

        if scores.is_empty() {
            return Ok(None);
        }
        Ok(Some(scores))
    }

    async fn send(&self, text: &str) -> DetectorResult<Option<RawScores>> {
        let payload = json!({
            "raw_document": { "text": text }
        });

        debug!(endpoint = %self.endpoint, "Sending text to emotion service");

        let mut request = self
            .client
            .post(&self.endpoint)
            .header("grpc-metadata-mm-model-id", &self.model_id)
            .header("Content-Type", "application/json")
            .json(&payload);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                warn!("Emotion service request timed out");
            }
            DetectorError::BackendUnavailable(e.to_string())
        })?;

        let status = response.status();
        debug!("Received response from emotion service: {}", status);

        // The service answers 400 for text it cannot score (blank input).
        // That is the expected invalid-input path, not a fault.
        if status == StatusCode::BAD_REQUEST {
            return Ok(None);
        }
        if status.is_server_error() {
            return Err(DetectorError::BackendUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(DetectorError::BackendProtocol(format!("HTTP {status}")));
        }

        let body: Value = response.json().await.map_err(|e| {
            DetectorError::BackendProtocol(format!("failed to parse JSON response: {e}"))
        })?;

        Self::parse_scores(&body)
    }

    /// Probe the service with a canned phrase and report reachability
    pub async fn status(&self) -> BackendStatus {
        match self.send("health check").await {
            Ok(_) => BackendStatus::Available,
            Err(DetectorError::BackendUnavailable(reason)) => BackendStatus::Unavailable(reason),
            Err(DetectorError::BackendProtocol(reason)) => BackendStatus::Error(reason),
        }
    }
}

#[async_trait]
impl ScoreBackend for EmotionClient {
    async fn score(&self, text: &str) -> DetectorResult<Option<RawScores>> {
        self.send(text).await
    }
}

/// Backend reachability as seen by the status probe
#[derive(Debug, Clone)]
pub enum BackendStatus {
    Available,
    Unavailable(String),
    Error(String),
}

impl BackendStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, BackendStatus::Available)
    }
}
