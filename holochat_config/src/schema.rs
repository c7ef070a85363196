use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// Base URL of the chat backend, without a trailing slash.
    #[serde(default = "Config::default_base_url")]
    pub base_url: String,
    /// Bound on one whole request cycle, in seconds.
    #[serde(default = "Config::default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Replaces the built-in greeting when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greeting: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            request_timeout_secs: Self::default_request_timeout_secs(),
            greeting: None,
        }
    }
}

impl Config {
    fn default_base_url() -> String {
        "http://127.0.0.1:8000".to_string()
    }

    const fn default_request_timeout_secs() -> u64 {
        30
    }

    /// Load `~/holochat/config.json`, falling back to defaults when the
    /// file does not exist yet. A present-but-broken file is an error; a
    /// silent fallback there would hide typos from the user.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = serde_json::from_str(&content)?;

        Ok(config)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("holochat");

        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    /// Write a default config file, refusing to clobber an existing one.
    pub fn create_config() -> anyhow::Result<PathBuf> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            anyhow::bail!("Config already exists at: {}", config_path.display());
        }

        Self::ensure_config_dir()?;
        let content = serde_json::to_string_pretty(&Self::default())?;
        std::fs::write(&config_path, content)?;

        Ok(config_path)
    }

    /// Where the persistent identity token lives, next to the config.
    pub fn identity_path() -> anyhow::Result<PathBuf> {
        Ok(Self::holochat_dir()?.join("user_id"))
    }

    fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::holochat_dir()?.join("config.json"))
    }

    fn holochat_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("holochat"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_parses_to_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();

        assert_eq!(config.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.greeting.is_none());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"base_url":"https://chat.example.com"}"#).unwrap();

        assert_eq!(config.base_url, "https://chat.example.com");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn unset_greeting_is_not_serialized() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(!json.contains("greeting"));
    }
}
