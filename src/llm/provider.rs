// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Generative provider trait and related types
//!
//! Defines the abstraction layer over text/vision generation backends.

use async_trait::async_trait;

use crate::error::Result;

/// Main trait for generative-AI providers
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Get the provider name (e.g., "gemini")
    fn name(&self) -> &str;

    /// Whether a credential is available.
    ///
    /// Callers check this before `generate`; an unconfigured provider is an
    /// expected runtime state, not an error.
    fn is_configured(&self) -> bool;

    /// Generate a single text response
    async fn generate(&self, request: GenerateRequest) -> Result<String>;
}

/// Request for a single generation
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    /// System instruction (persona and task framing)
    pub system: Option<String>,

    /// User text
    pub prompt: String,

    /// Optional image sent alongside the prompt
    pub image: Option<InlineImage>,

    /// Sampling temperature (provider default when unset)
    pub temperature: Option<f32>,
}

/// Base64-encoded image payload
#[derive(Debug, Clone, PartialEq)]
pub struct InlineImage {
    /// MIME type, e.g. "image/jpeg"
    pub mime_type: String,

    /// Base64 data without any data-URL prefix
    pub data: String,
}

impl GenerateRequest {
    /// Create a text-only request
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            system: None,
            prompt: prompt.into(),
            image: None,
            temperature: None,
        }
    }

    /// Set the system instruction
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Attach an image
    pub fn with_image(mut self, image: InlineImage) -> Self {
        self.image = Some(image);
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_builder() {
        let request = GenerateRequest::new("hello")
            .with_system("be brief")
            .with_temperature(0.3)
            .with_image(InlineImage {
                mime_type: "image/png".to_string(),
                data: "AAAA".to_string(),
            });

        assert_eq!(request.prompt, "hello");
        assert_eq!(request.system.as_deref(), Some("be brief"));
        assert_eq!(request.temperature, Some(0.3));
        assert_eq!(request.image.unwrap().mime_type, "image/png");
    }

    #[test]
    fn test_generate_request_defaults() {
        let request = GenerateRequest::new("hi");
        assert!(request.system.is_none());
        assert!(request.image.is_none());
        assert!(request.temperature.is_none());
    }
}
