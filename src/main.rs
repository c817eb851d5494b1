// main.rs
mod cli;
mod client;
mod config;
mod detector;
mod resolver;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Args, Commands};
use client::EmotionClient;
use config::Config;
use detector::EmotionDetector;
use resolver::EmotionScores;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    match args.command {
        Commands::Analyze { text, data_dir, json } => {
            if let Err(e) = handle_analyze(text, data_dir, json).await {
                eprintln!("❌ Analysis failed: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Status { data_dir } => {
            if let Err(e) = handle_status(data_dir).await {
                eprintln!("❌ Status check failed: {}", e);
                std::process::exit(1);
            }
        }
    }
}

async fn handle_analyze(
    text: Option<String>,
    data_dir: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let config = Config::new(data_dir)?;
    let detector = EmotionDetector::with_config(&config);

    let scores = detector.analyze(effective_text(text.as_deref())).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&scores)?);
    } else {
        println!("{}", format_response(&scores));
    }
    Ok(())
}

/// A missing argument goes through the pipeline as empty text and
/// comes back as the invalid-input result
fn effective_text(text: Option<&str>) -> &str {
    text.unwrap_or("")
}

fn format_response(scores: &EmotionScores) -> String {
    match scores.dominant_emotion {
        Some(dominant) => format!(
            "For the given statement, the system response is \
             'anger': {}, 'disgust': {}, 'fear': {}, 'joy': {} and 'sadness': {}. \
             The dominant emotion is {}.",
            scores.anger, scores.disgust, scores.fear, scores.joy, scores.sadness, dominant
        ),
        None => "Invalid text! Please try again!.".to_string(),
    }
}

async fn handle_status(data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    let client = EmotionClient::new(&config);

    let status = client.status().await;
    if status.is_available() {
        println!("✅ Emotion service is available: {}", config.endpoint);
    } else {
        println!("⚠️  Emotion service is not available: {:?}", status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{resolve, RawScores};

    #[test]
    fn test_format_valid_response() {
        let mut raw = RawScores::new();
        raw.insert("anger".to_string(), 0.01);
        raw.insert("disgust".to_string(), 0.01);
        raw.insert("fear".to_string(), 0.01);
        raw.insert("joy".to_string(), 0.95);
        raw.insert("sadness".to_string(), 0.02);

        let rendered = format_response(&resolve(Some(&raw)));

        assert!(rendered.starts_with("For the given statement"));
        assert!(rendered.ends_with("The dominant emotion is joy."));
        assert!(rendered.contains("'joy': 0.95"));
    }

    #[test]
    fn test_format_invalid_response() {
        let rendered = format_response(&EmotionScores::invalid());

        assert_eq!(rendered, "Invalid text! Please try again!.");
    }

    #[test]
    fn test_effective_text_defaults_to_empty() {
        assert_eq!(effective_text(None), "");
        assert_eq!(effective_text(Some("I am happy")), "I am happy");
    }

    #[tokio::test]
    async fn test_absent_text_reports_invalid_input() {
        use crate::detector::{DetectorResult, EmotionDetector, ScoreBackend};
        use async_trait::async_trait;

        struct NoScoresBackend;

        #[async_trait]
        impl ScoreBackend for NoScoresBackend {
            async fn score(&self, _text: &str) -> DetectorResult<Option<RawScores>> {
                Ok(None)
            }
        }

        let detector = EmotionDetector::new(Box::new(NoScoresBackend));
        let scores = detector.analyze(effective_text(None)).await.unwrap();

        assert_eq!(format_response(&scores), "Invalid text! Please try again!.");
    }
}
