use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, TalentoError};

/// Top-level configuration for the Talento backend.
///
/// Loaded from `~/.talento/config.toml` by default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TalentoConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub actions: ActionsConfig,
    #[serde(default)]
    pub documents: DocumentsConfig,
}

impl TalentoConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: TalentoConfig = toml::from_str(&content)?;
        config.validate()?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| TalentoError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Reject values that would make the action layer misbehave.
    pub fn validate(&self) -> Result<()> {
        if self.actions.max_search_limit == 0 {
            return Err(TalentoError::Config(
                "actions.max_search_limit must be at least 1".to_string(),
            ));
        }
        if self.actions.default_search_limit == 0
            || self.actions.default_search_limit > self.actions.max_search_limit
        {
            return Err(TalentoError::Config(format!(
                "actions.default_search_limit must be between 1 and {}",
                self.actions.max_search_limit
            )));
        }
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Data directory for corpus files and local state.
    pub data_dir: String,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: "~/.talento".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// What the registry does when two modules register the same action name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The later registration replaces the earlier one.
    #[default]
    LastWriterWins,
    /// Registration fails on a duplicate name.
    Reject,
}

/// Action layer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionsConfig {
    /// Results returned by document search when no limit is requested.
    pub default_search_limit: usize,
    /// Upper bound applied to any requested search limit.
    pub max_search_limit: usize,
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for ActionsConfig {
    fn default() -> Self {
        Self {
            default_search_limit: 5,
            max_search_limit: 20,
            duplicate_policy: DuplicatePolicy::LastWriterWins,
        }
    }
}

/// Document corpus settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentsConfig {
    /// JSON file with the documents to serve. No corpus means an empty store.
    pub corpus_path: Option<String>,
}
