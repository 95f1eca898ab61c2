//! Global configuration types for Versus.
//!
//! `VersusConfig` represents the top-level `config.toml` that controls
//! pipeline limits and the remote content provider.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Loaded from `~/.versus/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersusConfig {
    /// Default number of rows in the "top choices" view.
    #[serde(default = "default_top_choices_limit")]
    pub top_choices_limit: u32,

    /// Largest `limit` a caller may request for top choices.
    #[serde(default = "default_max_top_choices_limit")]
    pub max_top_choices_limit: u32,

    /// Number of top choices used to seed recommendations.
    #[serde(default = "default_recommendation_seed_limit")]
    pub recommendation_seed_limit: u32,

    /// Number of candidates kept after similarity expansion.
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: u32,

    /// Number of keyword themes taken from the submotivation report.
    #[serde(default = "default_content_query_themes")]
    pub content_query_themes: u32,

    /// Remote content catalog settings.
    #[serde(default)]
    pub content_provider: ContentProviderConfig,
}

fn default_top_choices_limit() -> u32 {
    6
}

fn default_max_top_choices_limit() -> u32 {
    100
}

fn default_recommendation_seed_limit() -> u32 {
    100
}

fn default_recommendation_limit() -> u32 {
    10
}

fn default_content_query_themes() -> u32 {
    3
}

impl Default for VersusConfig {
    fn default() -> Self {
        Self {
            top_choices_limit: default_top_choices_limit(),
            max_top_choices_limit: default_max_top_choices_limit(),
            recommendation_seed_limit: default_recommendation_seed_limit(),
            recommendation_limit: default_recommendation_limit(),
            content_query_themes: default_content_query_themes(),
            content_provider: ContentProviderConfig::default(),
        }
    }
}

/// Connection settings for the remote content catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Client id header sent with every request. The bearer token is read from
    /// the `VERSUS_CONTENT_TOKEN` environment variable, never from this file.
    #[serde(default)]
    pub client_id: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.igdb.com/v4".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ContentProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            client_id: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}
