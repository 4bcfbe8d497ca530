//! Configuration file handling.
//!
//! This module provides loading and saving of depscan configuration
//! from a TOML file.
//!
//! # Configuration Location
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/depscan/config.toml`
//! - macOS: `~/Library/Application Support/depscan/config.toml`
//! - Windows: `%APPDATA%\depscan\config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! scanner_command = "safety"
//! source_language = "en"
//! request_timeout_secs = 30
//! strict_translation = true
//! translate_url = "https://translate.googleapis.com"
//!
//! [registries]
//! pypi = "https://pypi.org"
//! npm = "https://registry.npmjs.org"
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration.
///
/// # Example
///
/// ```no_run
/// use depscan::Config;
///
/// // Load from file (or use defaults if file doesn't exist)
/// let config = Config::load().unwrap();
///
/// println!("Scanner: {}", config.scanner_command);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Vulnerability scanner executable. Invoked as
    /// `<command> check --file=<manifest> --json`.
    ///
    /// Default: "safety"
    pub scanner_command: String,

    /// Language advisories are written in.
    ///
    /// Default: "en"
    pub source_language: String,

    /// Timeout for every registry and translation request, in seconds.
    /// `0` disables the timeout.
    ///
    /// Default: 30
    pub request_timeout_secs: u64,

    /// Abort the scan when an advisory cannot be translated.
    ///
    /// When false the untranslated advisory is kept and a warning is logged.
    /// Default: true
    pub strict_translation: bool,

    /// Base URL of the translation service.
    pub translate_url: String,

    /// Registry base URLs.
    #[serde(default)]
    pub registries: RegistryEndpoints,
}

/// Base URLs of the package registries used for latest-version lookups.
///
/// Overriding these points lookups at a mirror.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryEndpoints {
    pub pypi: String,
    pub npm: String,
    pub rubygems: String,
    pub packagist: String,
    pub go_proxy: String,
    pub crates: String,
    pub maven: String,
}

impl RegistryEndpoints {
    /// Points every registry at the same base URL.
    pub fn all(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            pypi: base.clone(),
            npm: base.clone(),
            rubygems: base.clone(),
            packagist: base.clone(),
            go_proxy: base.clone(),
            crates: base.clone(),
            maven: base,
        }
    }
}

impl Default for RegistryEndpoints {
    fn default() -> Self {
        Self {
            pypi: "https://pypi.org".to_string(),
            npm: "https://registry.npmjs.org".to_string(),
            rubygems: "https://rubygems.org".to_string(),
            packagist: "https://repo.packagist.org".to_string(),
            go_proxy: "https://proxy.golang.org".to_string(),
            crates: "https://crates.io".to_string(),
            maven: "https://search.maven.org".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scanner_command: "safety".to_string(),
            source_language: "en".to_string(),
            request_timeout_secs: 30,
            strict_translation: true,
            translate_url: "https://translate.googleapis.com".to_string(),
            registries: RegistryEndpoints::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the config file.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves the configuration to the config file.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Returns the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("depscan")
            .join("config.toml")
    }

    /// Generates a string containing the default configuration.
    pub fn generate_default_config() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }

    /// Request timeout, or `None` when disabled.
    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.scanner_command, "safety");
        assert_eq!(config.source_language, "en");
        assert!(config.strict_translation);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.registries.pypi, "https://pypi.org");
        assert_eq!(config.registries.maven, "https://search.maven.org");
    }

    #[test]
    fn test_config_partial_file() {
        let config: Config = toml::from_str(
            r#"
            strict_translation = false
            request_timeout_secs = 0

            [registries]
            npm = "https://npm.example.com"
            "#,
        )
        .unwrap();

        assert!(!config.strict_translation);
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.scanner_command, "safety");
        assert_eq!(config.registries.npm, "https://npm.example.com");
        assert_eq!(config.registries.crates, "https://crates.io");
    }

    #[test]
    fn test_generate_default_config_parses_back() {
        let text = Config::generate_default_config();
        let config: Config = toml::from_str(&text).unwrap();

        assert_eq!(config.registries, RegistryEndpoints::default());
        assert_eq!(config.translate_url, "https://translate.googleapis.com");
    }

    #[test]
    fn test_registry_endpoints_all() {
        let endpoints = RegistryEndpoints::all("http://127.0.0.1:8080");
        assert_eq!(endpoints.go_proxy, "http://127.0.0.1:8080");
        assert_eq!(endpoints.packagist, "http://127.0.0.1:8080");
    }
}
