// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use super::Settings;

/// Fallback variable name used by the web frontend build.
const LEGACY_API_KEY_ENV: &str = "API_KEY";

impl Settings {
    /// Get the API key for Gemini, checking env vars first.
    ///
    /// Empty values count as absent at every level, so a blank variable
    /// falls through to the next source.
    pub fn get_gemini_api_key(&self) -> Option<String> {
        // Priority: configured env var > legacy env var > config file.
        non_blank(std::env::var(&self.providers.gemini.api_key_env).ok())
            .or_else(|| non_blank(std::env::var(LEGACY_API_KEY_ENV).ok()))
            .or_else(|| non_blank(self.providers.gemini.api_key.clone()))
    }

    /// Check whether the generative-AI provider has a credential.
    pub fn is_assistant_configured(&self) -> bool {
        self.get_gemini_api_key().is_some()
    }

    /// Get the auth backend base URL, checking env var first.
    pub fn get_auth_base_url(&self) -> String {
        // Priority: env var > config file.
        std::env::var("GREENLOOP_API_URL")
            .ok()
            .unwrap_or_else(|| self.auth.base_url.clone())
            .trim_end_matches('/')
            .to_string()
    }
}

fn non_blank(key: Option<String>) -> Option<String> {
    key.filter(|key| !key.trim().is_empty())
}
