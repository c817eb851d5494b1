use async_trait::async_trait;
use thiserror::Error;

use crate::client::EmotionClient;
use crate::config::Config;
use crate::resolver::{resolve, EmotionScores, RawScores};

/// Hard faults from the backend boundary.
///
/// Unscoreable text is not a fault: it comes back as a normal
/// `EmotionScores` with `dominant_emotion` absent.
#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("Emotion service unreachable: {0}")]
    BackendUnavailable(String),

    #[error("Unexpected emotion service response: {0}")]
    BackendProtocol(String),
}

pub type DetectorResult<T> = Result<T, DetectorError>;

/// One-capability backend boundary: text in, per-category scores out.
///
/// `Ok(None)` is the designated "no scores available" outcome for text the
/// backend cannot score (empty or unparseable input).
#[async_trait]
pub trait ScoreBackend: Send + Sync {
    async fn score(&self, text: &str) -> DetectorResult<Option<RawScores>>;
}

/// The text → emotion pipeline: one backend call, then pure resolution.
///
/// Holds no shared mutable state; a single detector can serve concurrent
/// calls, and each call produces an independently owned result.
pub struct EmotionDetector {
    backend: Box<dyn ScoreBackend>,
}

impl EmotionDetector {
    pub fn new(backend: Box<dyn ScoreBackend>) -> Self {
        Self { backend }
    }

    /// Detector backed by the configured HTTP emotion service
    pub fn with_config(config: &Config) -> Self {
        Self::new(Box::new(EmotionClient::new(config)))
    }

    pub async fn analyze(&self, text: &str) -> DetectorResult<EmotionScores> {
        let raw = self.backend.score(text).await?;
        Ok(resolve(raw.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::Emotion;
    use std::collections::HashMap;

    struct FixedBackend {
        scores: Option<RawScores>,
    }

    #[async_trait]
    impl ScoreBackend for FixedBackend {
        async fn score(&self, _text: &str) -> DetectorResult<Option<RawScores>> {
            Ok(self.scores.clone())
        }
    }

    struct DownBackend;

    #[async_trait]
    impl ScoreBackend for DownBackend {
        async fn score(&self, _text: &str) -> DetectorResult<Option<RawScores>> {
            Err(DetectorError::BackendUnavailable(
                "connection refused".to_string(),
            ))
        }
    }

    fn joyful_scores() -> RawScores {
        let mut map = HashMap::new();
        map.insert("anger".to_string(), 0.01);
        map.insert("disgust".to_string(), 0.01);
        map.insert("fear".to_string(), 0.01);
        map.insert("joy".to_string(), 0.95);
        map.insert("sadness".to_string(), 0.02);
        map
    }

    #[tokio::test]
    async fn test_analyze_resolves_dominant() {
        let detector = EmotionDetector::new(Box::new(FixedBackend {
            scores: Some(joyful_scores()),
        }));

        let result = detector.analyze("I am glad this happened").await.unwrap();

        assert_eq!(result.dominant_emotion, Some(Emotion::Joy));
        assert_eq!(result.joy, 0.95);
    }

    #[tokio::test]
    async fn test_analyze_unscoreable_text_is_invalid() {
        let detector = EmotionDetector::new(Box::new(FixedBackend { scores: None }));

        let result = detector.analyze("").await.unwrap();

        assert!(!result.is_valid());
    }

    #[tokio::test]
    async fn test_backend_fault_propagates() {
        let detector = EmotionDetector::new(Box::new(DownBackend));

        let err = detector.analyze("some text").await.unwrap_err();

        assert!(matches!(err, DetectorError::BackendUnavailable(_)));
    }

    #[tokio::test]
    async fn test_analyze_is_deterministic() {
        let detector = EmotionDetector::new(Box::new(FixedBackend {
            scores: Some(joyful_scores()),
        }));

        let first = detector.analyze("same text").await.unwrap();
        let second = detector.analyze("same text").await.unwrap();

        assert_eq!(first, second);
    }
}
