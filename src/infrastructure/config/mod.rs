//! Configuration management

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use crate::application::errors::ConfigError;
use crate::application::services::{DEFAULT_REPLY_LENGTH, DEFAULT_TITLE};
use crate::domain::entities::SearchResult;

/// Narrowest dialog the console surface can lay out
pub const MIN_WIDTH: usize = 24;

/// Dialog configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub page: PageConfig,
    pub dialog: DialogConfig,
    pub reply: ReplyConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct PageConfig {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DialogConfig {
    pub heading: String,
    pub badge: String,
    pub placeholder: String,
    pub width: usize,
    pub viewport_lines: usize,
    pub date_format: String,
    pub command_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ReplyConfig {
    pub delay_ms: u64,
    pub length: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SearchConfig {
    pub results: Vec<SearchResult>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page: PageConfig::default(),
            dialog: DialogConfig::default(),
            reply: ReplyConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            heading: "Ask AI".to_string(),
            badge: "Q&A Beta".to_string(),
            placeholder: "Ask a question...".to_string(),
            width: 72,
            viewport_lines: 16,
            date_format: "%Y/%m/%d".to_string(),
            command_prefix: "/".to_string(),
        }
    }
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            delay_ms: 1000,
            length: DEFAULT_REPLY_LENGTH,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            results: SearchResult::defaults(),
        }
    }
}

impl ReplyConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    pub fn load_env() -> Self {
        Config::default().with_env()
    }

    /// Apply environment overrides on top of this config
    pub fn with_env(mut self) -> Self {
        if let Ok(title) = std::env::var("ASK_AI_TITLE") {
            self.page.title = title;
        }

        if let Ok(delay) = std::env::var("ASK_AI_REPLY_DELAY_MS") {
            match delay.parse() {
                Ok(ms) => self.reply.delay_ms = ms,
                Err(_) => tracing::warn!("Ignoring ASK_AI_REPLY_DELAY_MS={}: not a number", delay),
            }
        }

        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reply.length == 0 {
            return Err(ConfigError::InvalidValue("reply.length must be at least 1".to_string()));
        }
        if self.dialog.width < MIN_WIDTH {
            return Err(ConfigError::InvalidValue(format!("dialog.width must be at least {}", MIN_WIDTH)));
        }
        if self.dialog.viewport_lines == 0 {
            return Err(ConfigError::InvalidValue("dialog.viewport-lines must be at least 1".to_string()));
        }
        if StrftimeItems::new(&self.dialog.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::InvalidValue(format!("dialog.date-format is not a valid pattern: {}", self.dialog.date_format)));
        }
        if self.dialog.command_prefix.trim().is_empty() {
            return Err(ConfigError::InvalidValue("dialog.command-prefix must not be blank".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.page.title, "我的项目");
        assert_eq!(config.dialog.heading, "Ask AI");
        assert_eq!(config.reply.delay(), Duration::from_millis(1000));
        assert_eq!(config.reply.length, 50);
        assert_eq!(config.search.results.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("page:\n  title: Docs\nreply:\n  delay-ms: 250\n").unwrap();
        assert_eq!(config.page.title, "Docs");
        assert_eq!(config.reply.delay_ms, 250);
        assert_eq!(config.reply.length, 50);
        assert_eq!(config.dialog, DialogConfig::default());
    }

    #[test]
    fn test_default_yaml_loads_back() {
        let yaml = Config::default().to_yaml().unwrap();
        assert!(yaml.contains("viewport-lines"));
        assert_eq!(Config::from_yaml(&yaml).unwrap(), Config::default());
    }

    #[test]
    fn test_custom_search_results() {
        let yaml = "search:\n  results:\n    - icon: \"📄\"\n      label: Onboarding\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.search.results, vec![SearchResult::new("📄", "Onboarding")]);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(Config::from_yaml("reply:\n  length: 0\n"), Err(ConfigError::InvalidValue(_))));
        assert!(matches!(Config::from_yaml("dialog:\n  width: 10\n"), Err(ConfigError::InvalidValue(_))));
        assert!(matches!(Config::from_yaml("dialog:\n  viewport-lines: 0\n"), Err(ConfigError::InvalidValue(_))));
        assert!(matches!(Config::from_yaml("dialog:\n  date-format: \"%Q\"\n"), Err(ConfigError::InvalidValue(_))));
        assert!(matches!(Config::from_yaml("reply: [1, 2]\n"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("ask-ai-missing-config.yaml");
        assert!(matches!(Config::load(path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("ask-ai-config-{}.yaml", std::process::id()));
        std::fs::write(&path, "dialog:\n  heading: Help\n").unwrap();
        let config = Config::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.dialog.heading, "Help");
    }
}
