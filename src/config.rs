use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_ENDPOINT: &str =
    "https://sn-watson-emotion.labs.skills.network/v1/watson.runtime.nlp.v1/NlpService/EmotionPredict";
const DEFAULT_MODEL_ID: &str = "emotion_aggregated-workflow_lang_en_stock";

/// Backend connection settings, loaded from config.json with environment
/// overrides. The detector receives these by injection; nothing here is a
/// process-wide singleton.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip)]
    pub data_dir: PathBuf,
    pub endpoint: String,
    pub model_id: String,
    pub timeout_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Config {
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("emotion-detector")
        });

        std::fs::create_dir_all(&data_dir).context("Failed to create config directory")?;

        let config_path = data_dir.join("config.json");

        let mut config = if config_path.exists() {
            let config_str =
                std::fs::read_to_string(&config_path).context("Failed to read config.json")?;
            let mut config: Config =
                serde_json::from_str(&config_str).context("Failed to parse config.json")?;
            config.data_dir = data_dir;
            config
        } else {
            let config = Self::default_config(data_dir);
            let json_str = serde_json::to_string_pretty(&config)
                .context("Failed to serialize default config")?;
            std::fs::write(&config_path, json_str).context("Failed to write default config.json")?;
            config
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn default_config(data_dir: PathBuf) -> Self {
        Config {
            data_dir,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            timeout_secs: 30,
            api_key: std::env::var("EMOTION_API_KEY").ok(),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = std::env::var("EMOTION_ENDPOINT") {
            self.endpoint = endpoint;
        }
        if self.api_key.as_ref().map_or(true, |key| key.is_empty()) {
            self.api_key = std::env::var("EMOTION_API_KEY").ok();
        }
    }
}
