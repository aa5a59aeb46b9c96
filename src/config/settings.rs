// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Settings management for GreenLoop
//!
//! Handles loading and saving settings from ~/.greenloop/settings.json

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod io;
mod validation;

/// Main settings structure, stored in ~/.greenloop/settings.json
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Generative-AI provider configurations
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Auth backend settings
    #[serde(default)]
    pub auth: AuthConfig,

    /// Local credential storage settings
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Configuration for generative-AI providers
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProvidersConfig {
    /// Google Gemini configuration
    #[serde(default)]
    pub gemini: GeminiConfig,
}

/// Gemini-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key (if stored directly, not recommended)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Environment variable name for API key
    #[serde(default = "default_gemini_api_key_env")]
    pub api_key_env: String,

    /// Model used for both chat and vision requests
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// Base URL for API (for custom endpoints)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Sampling temperature for chat replies
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

/// Auth backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Base URL of the GreenLoop API (login/register live under `/auth`)
    #[serde(default = "default_auth_base_url")]
    pub base_url: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Credential storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Override for the credentials file (defaults to ~/.greenloop/credentials.json)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials_path: Option<PathBuf>,
}

fn default_gemini_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_auth_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: default_gemini_api_key_env(),
            model: default_gemini_model(),
            base_url: None,
            temperature: default_temperature(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            base_url: default_auth_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_gemini_config_default() {
        let config = GeminiConfig::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.api_key_env, "GEMINI_API_KEY");
        assert!(config.model.contains("gemini"));
        assert!((config.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_auth_config_default() {
        let config = AuthConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000/api");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{"auth": {"base_url": "https://api.greenloop.vn"}}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.auth.base_url, "https://api.greenloop.vn");
        assert_eq!(settings.auth.timeout_secs, 30);
        assert_eq!(settings.providers.gemini.model, "gemini-2.5-flash");
        assert!(settings.storage.credentials_path.is_none());
    }

    #[test]
    fn test_api_key_not_serialized_when_absent() {
        let settings = Settings::default();
        let json = serde_json::to_string(&settings).unwrap();
        assert!(!json.contains("\"api_key\""));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("settings.json");

        let mut settings = Settings::default();
        settings.auth.timeout_secs = 5;
        settings.providers.gemini.model = "gemini-2.0-flash".to_string();
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.auth.timeout_secs, 5);
        assert_eq!(loaded.providers.gemini.model, "gemini-2.0-flash");
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.json");
        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.auth.base_url, AuthConfig::default().base_url);
    }

    #[test]
    fn test_load_corrupt_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(Settings::load_from(&path).is_err());
    }
}
