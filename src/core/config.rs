//! Service configuration with documented defaults
//!
//! Settings are layered: built-in defaults, then an optional TOML file,
//! then `APP_*` environment variables. Command-line flags are applied on
//! top of that by the binary.

use crate::command::extractor::Vocabulary;
use crate::core::error::{Result, TodoError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level settings for the service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Deployment environment name, reported by `/health`
    pub environment: String,

    /// Service name used in logs and health responses
    pub service_name: String,

    /// Version reported by `/health`
    pub version: String,

    /// Interface to bind the HTTP listener on
    pub host: String,

    /// Port to bind the HTTP listener on
    pub port: u16,

    /// Rolling context settings
    pub context: ContextConfig,

    /// Verb/topic table and continuation markers
    pub vocabulary: Vocabulary,
}

/// Settings for the rolling topic context
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Maximum number of topics remembered at once
    ///
    /// Must be at least the number of distinct vocabulary topics, so
    /// every topic keeps its entry for the life of the process.
    pub max_topics: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self { max_topics: 8 }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            environment: "development".into(),
            service_name: "todo-agent".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            host: "0.0.0.0".into(),
            port: 8086,
            context: ContextConfig::default(),
            vocabulary: Vocabulary::default(),
        }
    }
}

impl AppSettings {
    /// Load settings from an optional TOML file plus the process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        settings.apply_env(|key| std::env::var(key).ok())?;
        settings
            .validate()
            .map_err(TodoError::Config)?;
        Ok(settings)
    }

    /// Parse settings from a TOML file; missing keys keep their defaults
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Override fields from `APP_*` variables
    ///
    /// `lookup` is the variable source, normally `std::env::var`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(environment) = lookup("APP_ENVIRONMENT") {
            self.environment = environment;
        }
        if let Some(name) = lookup("APP_SERVICE_NAME") {
            self.service_name = name;
        }
        if let Some(version) = lookup("APP_VERSION") {
            self.version = version;
        }
        if let Some(host) = lookup("APP_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("APP_PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|e| TodoError::Config(format!("APP_PORT '{}': {}", port, e)))?;
        }
        Ok(())
    }

    /// Address string for the HTTP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.service_name.trim().is_empty() {
            return Err("service_name must not be empty".into());
        }

        if self.context.max_topics == 0 {
            return Err("context.max_topics must be at least 1".into());
        }

        // Every topic must fit so that no context entry is ever evicted
        let topics = self.vocabulary.topic_count();
        if self.context.max_topics < topics {
            return Err(format!(
                "context.max_topics ({}) must be >= the number of vocabulary topics ({})",
                self.context.max_topics, topics
            ));
        }

        self.vocabulary.validate()
    }
}
