use std::path::Path;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::logging::LogFormat;

/// Application configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub chat: ChatConfig,
    pub assistant: AssistantConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: Option<String>,
    /// Console format, "text" or "json"
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    pub assistant_name: String,
    pub max_message_length: usize,
    pub max_search_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    pub enabled: bool,
    /// Fixes the canned-response sequence when set
    pub rng_seed: Option<u64>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: None,
            format: "text".to_string(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            assistant_name: "Assistente Virtual".to_string(),
            max_message_length: 2000,
            max_search_length: 100,
        }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rng_seed: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence
    pub fn load() -> Result<Self> {
        Self::build(
            Config::builder()
                .add_source(File::with_name("config/default").required(false))
                .add_source(File::with_name("config/local").required(false))
                .add_source(File::with_name("config").required(false)),
        )
    }

    /// Load defaults overlaid with a single explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::build(Config::builder().add_source(File::from(path).required(true)))
    }

    fn build(sources: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        let defaults = Config::try_from(&Self::default())
            .map_err(|e| anyhow::anyhow!("Failed to build default configuration: {}", e))?;

        let config = Config::builder()
            .add_source(defaults)
            .add_source(
                sources
                    .build()
                    .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?,
            )
            // Add environment variables with prefix
            .add_source(
                Environment::with_prefix("MINDCARE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

        let app_config: Self = config
            .try_deserialize()
            .map_err(|e| anyhow::anyhow!("Failed to deserialize configuration: {}", e))?;

        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level: {}. Must be one of: {:?}",
                self.logging.level,
                valid_levels
            ));
        }

        self.log_format()?;

        if self.chat.assistant_name.trim().is_empty() {
            return Err(anyhow::anyhow!("assistant_name cannot be empty"));
        }
        if self.chat.max_message_length == 0 {
            return Err(anyhow::anyhow!("max_message_length must be greater than 0"));
        }
        if self.chat.max_search_length == 0 {
            return Err(anyhow::anyhow!("max_search_length must be greater than 0"));
        }

        Ok(())
    }

    /// Parsed console log format
    pub fn log_format(&self) -> Result<LogFormat> {
        self.logging.format.parse()
    }

    /// Get log level from environment or config
    pub fn get_log_level(&self) -> String {
        std::env::var("RUST_LOG").unwrap_or_else(|_| self.logging.level.clone())
    }
}
