//! Player engagement prediction and basketball metrics exploration
//!
//! Two independent flows share this crate: an engagement-level predictor that
//! encodes a player profile into a fixed feature vector and runs a trained
//! classifier over it, and a metrics explorer that derives shooting and usage
//! ratios from a season of box-score stats.

pub mod artifacts;
pub mod features;
pub mod model;
pub mod predict;
pub mod stats;
pub mod training;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-wide errors
#[derive(Debug, Error)]
pub enum PlayStatsError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Feature vector shape mismatch: expected {expected} features, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Unknown class index {index} (label encoder knows {known} classes)")]
    UnknownClass { index: usize, known: usize },

    #[error("Unknown label: {0}")]
    UnknownLabel(String),

    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    #[error("Artifact error for {path}: {message}")]
    Artifact { path: String, message: String },

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PlayStatsError>;

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub artifacts: ArtifactConfig,
    pub classifier: ClassifierConfig,
    pub training: TrainingConfig,
    pub stats: StatsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// Remote ID of the serialized classifier. Empty means local only.
    pub model_id: String,
    /// Remote ID of the serialized label encoder
    pub encoder_id: String,
    /// Local classifier path (burn appends `.mpk`)
    pub model_path: String,
    pub encoder_path: String,
    /// Download URL with an `{id}` placeholder
    pub url_template: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    pub hidden_dims: Vec<usize>,
    pub dropout: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    pub epochs: usize,
    pub learning_rate: f64,
    pub validation_fraction: f64,
    pub seed: u64,
    /// Epochs without validation improvement before stopping (0 disables)
    pub early_stopping_patience: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    pub csv_path: String,
    /// Rows must have strictly more minutes than this to be kept
    pub min_minutes: f64,
    pub default_x: String,
    pub default_y: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            artifacts: ArtifactConfig {
                // Point these at uploaded `playstats train` output
                model_id: String::new(),
                encoder_id: String::new(),
                model_path: "model/engagement_net".to_string(),
                encoder_path: "model/label_encoder.json".to_string(),
                url_template: "https://drive.google.com/uc?export=download&id={id}".to_string(),
            },
            classifier: ClassifierConfig {
                hidden_dims: vec![64, 32],
                dropout: 0.1,
            },
            training: TrainingConfig {
                epochs: 200,
                learning_rate: 1e-3,
                validation_fraction: 0.2,
                seed: 42,
                early_stopping_patience: 30,
            },
            stats: StatsConfig {
                csv_path: "data/player_stats_2024_cleaned.csv".to_string(),
                min_minutes: stats::derive::MIN_MINUTES,
                default_x: "USG%".to_string(),
                default_y: "TS%".to_string(),
            },
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PlayStatsError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        toml::from_str(&content)
            .map_err(|e| PlayStatsError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PlayStatsError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
