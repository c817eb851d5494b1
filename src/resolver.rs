use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Per-category scores as returned by the backend, before resolution
pub type RawScores = HashMap<String, f64>;

/// The five recognized emotion categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Anger,
    Disgust,
    Fear,
    Joy,
    Sadness,
}

impl Emotion {
    /// Canonical category order. Ties between equal maximum scores
    /// resolve to the earliest category in this order.
    pub const ALL: [Emotion; 5] = [
        Emotion::Anger,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Joy,
        Emotion::Sadness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Anger => "anger",
            Emotion::Disgust => "disgust",
            Emotion::Fear => "fear",
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized result of one analysis.
///
/// `dominant_emotion` being `None` is the authoritative invalid-input
/// signal; the numeric fields are zeroed and not meaningful in that case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionScores {
    pub anger: f64,    // 0.0 - 1.0
    pub disgust: f64,  // 0.0 - 1.0
    pub fear: f64,     // 0.0 - 1.0
    pub joy: f64,      // 0.0 - 1.0
    pub sadness: f64,  // 0.0 - 1.0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominant_emotion: Option<Emotion>,
}

impl EmotionScores {
    /// Result for text the backend could not score
    pub fn invalid() -> Self {
        Self {
            anger: 0.0,
            disgust: 0.0,
            fear: 0.0,
            joy: 0.0,
            sadness: 0.0,
            dominant_emotion: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.dominant_emotion.is_some()
    }

    pub fn get(&self, emotion: Emotion) -> f64 {
        match emotion {
            Emotion::Anger => self.anger,
            Emotion::Disgust => self.disgust,
            Emotion::Fear => self.fear,
            Emotion::Joy => self.joy,
            Emotion::Sadness => self.sadness,
        }
    }
}

/// Resolve a raw backend mapping into an `EmotionScores`.
///
/// Scores are copied verbatim, without re-normalization. A missing mapping
/// or a mapping that lacks any of the five categories yields the invalid
/// result. Keys outside the five categories are ignored.
pub fn resolve(raw: Option<&RawScores>) -> EmotionScores {
    let raw = match raw {
        Some(raw) => raw,
        None => return EmotionScores::invalid(),
    };

    let mut values = [0.0_f64; 5];
    for (slot, emotion) in values.iter_mut().zip(Emotion::ALL) {
        match raw.get(emotion.as_str()) {
            Some(score) => *slot = *score,
            None => return EmotionScores::invalid(),
        }
    }

    // Strict-greater comparison keeps the earliest category on ties
    let mut dominant = Emotion::ALL[0];
    let mut best = values[0];
    for (value, emotion) in values.iter().zip(Emotion::ALL).skip(1) {
        if *value > best {
            best = *value;
            dominant = emotion;
        }
    }

    EmotionScores {
        anger: values[0],
        disgust: values[1],
        fear: values[2],
        joy: values[3],
        sadness: values[4],
        dominant_emotion: Some(dominant),
    }
}
