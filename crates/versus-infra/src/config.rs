//! Configuration loader for Versus.
//!
//! Reads `config.toml` from the data directory (`~/.versus/` by default) and
//! deserializes it into [`VersusConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::{Path, PathBuf};

use versus_core::service::taste::TasteLimits;
use versus_types::config::VersusConfig;
use versus_types::taste::RecommendationList;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "VERSUS_DATA_DIR";

const CONFIG_FILE: &str = "config.toml";

/// Load configuration from `{data_dir}/config.toml`.
///
/// - Missing file: [`VersusConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
pub async fn load_config(data_dir: &Path) -> VersusConfig {
    let config_path = data_dir.join(CONFIG_FILE);

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return VersusConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return VersusConfig::default();
        }
    };

    match toml::from_str::<VersusConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            VersusConfig::default()
        }
    }
}

/// Resolve the data directory.
///
/// Priority:
/// 1. `VERSUS_DATA_DIR` environment variable
/// 2. `~/.versus`
/// 3. `.versus` in the current directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".versus");
    }

    PathBuf::from(".versus")
}

/// Turn configured limits into the pipeline's [`TasteLimits`].
///
/// Every limit is at least 1. The default view never exceeds the caller
/// maximum, and recommendations never exceed [`RecommendationList::MAX_LEN`].
pub fn resolve_limits(config: &VersusConfig) -> TasteLimits {
    let floor = |value: u32| (value as usize).max(1);

    let max_top_choices = floor(config.max_top_choices_limit);
    let recommendation = floor(config.recommendation_limit).min(RecommendationList::MAX_LEN);
    if recommendation as u32 != config.recommendation_limit {
        tracing::warn!(
            configured = config.recommendation_limit,
            using = recommendation,
            "recommendation_limit out of range, clamped"
        );
    }

    TasteLimits {
        top_choices: floor(config.top_choices_limit).min(max_top_choices),
        max_top_choices,
        recommendation_seed: floor(config.recommendation_seed_limit),
        recommendation,
        content_query_themes: floor(config.content_query_themes),
    }
}
