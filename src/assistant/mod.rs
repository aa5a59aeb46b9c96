// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! GreenLoop AI assistant
//!
//! Wraps a generative provider with two total operations: a chat reply and
//! a waste-photo classification. Neither returns an error. Failures map to
//! fixed fallbacks:
//! - no credential: maintenance reply / demo classification, no I/O
//! - provider error: busy reply / "unrecognized" classification
//! - unparseable classification: "still analyzing" record echoing the text

pub mod classification;
pub mod prompts;

use regex::Regex;
use std::sync::{Arc, OnceLock};

use crate::config::Settings;
use crate::llm::provider::{GenerateRequest, GenerativeProvider, InlineImage};
use crate::llm::providers::GeminiProvider;

pub use classification::{extract_json_object, parse_classification, ClassificationResult};
use prompts::{
    BUSY_REPLY, CHAT_SYSTEM_INSTRUCTION, CHAT_TEMPERATURE, CLASSIFY_INSTRUCTION, EMPTY_REPLY,
    MAINTENANCE_REPLY,
};

/// MIME type assumed for bare base64 input
const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Chat and classification front end over a generative provider
pub struct Assistant {
    provider: Arc<dyn GenerativeProvider>,
    temperature: f32,
}

impl Assistant {
    /// Create an assistant over any provider
    pub fn new(provider: Arc<dyn GenerativeProvider>) -> Self {
        Self {
            provider,
            temperature: CHAT_TEMPERATURE,
        }
    }

    /// Create a Gemini-backed assistant from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(Arc::new(GeminiProvider::from_settings(settings)))
            .with_temperature(settings.providers.gemini.temperature)
    }

    /// Override the chat temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature.clamp(0.0, 2.0);
        self
    }

    /// Whether requests will reach the provider
    pub fn is_available(&self) -> bool {
        self.provider.is_configured()
    }

    /// Answer a chat message. Never fails.
    pub async fn chat_reply(&self, message: &str) -> String {
        if !self.provider.is_configured() {
            tracing::debug!(target: "greenloop.assistant", "no provider credential; maintenance reply");
            return MAINTENANCE_REPLY.to_string();
        }

        let request = GenerateRequest::new(message)
            .with_system(CHAT_SYSTEM_INSTRUCTION)
            .with_temperature(self.temperature);

        match self.provider.generate(request).await {
            Ok(text) if text.trim().is_empty() => EMPTY_REPLY.to_string(),
            Ok(text) => text,
            Err(error) => {
                tracing::error!(
                    target: "greenloop.assistant",
                    provider = self.provider.name(),
                    %error,
                    "chat request failed"
                );
                BUSY_REPLY.to_string()
            }
        }
    }

    /// Classify a base64 waste photo (bare or `data:` URL). Never fails.
    pub async fn classify_waste_image(&self, image_base64: &str) -> ClassificationResult {
        if !self.provider.is_configured() {
            tracing::debug!(target: "greenloop.assistant", "no provider credential; demo classification");
            return ClassificationResult::demo();
        }

        let request = GenerateRequest::new(CLASSIFY_INSTRUCTION).with_image(inline_image(image_base64));

        match self.provider.generate(request).await {
            Ok(text) => parse_classification(&text),
            Err(error) => {
                tracing::error!(
                    target: "greenloop.assistant",
                    provider = self.provider.name(),
                    %error,
                    "classification request failed"
                );
                ClassificationResult::unrecognized()
            }
        }
    }
}

/// Split an optional `data:<mime>;base64,` prefix off the payload
pub fn inline_image(input: &str) -> InlineImage {
    static DATA_URL: OnceLock<Regex> = OnceLock::new();
    let regex = DATA_URL.get_or_init(|| Regex::new(r"^data:([\w.+-]+/[\w.+-]+);base64,").unwrap());

    let input = input.trim();
    match regex.captures(input) {
        Some(caps) => {
            let prefix_len = caps.get(0).map_or(0, |m| m.end());
            InlineImage {
                mime_type: caps[1].to_string(),
                data: input[prefix_len..].to_string(),
            }
        }
        None => InlineImage {
            mime_type: DEFAULT_IMAGE_MIME.to_string(),
            data: input.to_string(),
        },
    }
}
