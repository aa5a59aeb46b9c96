// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Google Gemini API provider implementation
//!
//! Implements the GenerativeProvider trait over the `generateContent`
//! REST endpoint.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::error::{transport_error, ApiError, GreenLoopError, Result};
use crate::llm::provider::{GenerateRequest, GenerativeProvider};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Google Gemini provider
pub struct GeminiProvider {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider. `None` leaves it unconfigured.
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
            base_url: GEMINI_API_URL.to_string(),
        }
    }

    /// Create with a custom base URL
    pub fn with_base_url(
        api_key: Option<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let mut provider = Self::new(api_key, model);
        provider.base_url = base_url.into().trim_end_matches('/').to_string();
        provider
    }

    /// Create from settings; a missing key yields an unconfigured provider
    pub fn from_settings(settings: &Settings) -> Self {
        let config = &settings.providers.gemini;
        let api_key = settings.get_gemini_api_key();
        match config.base_url {
            Some(ref base_url) => Self::with_base_url(api_key, &config.model, base_url),
            None => Self::new(api_key, &config.model),
        }
    }

    /// Build the request body
    fn build_request(&self, request: &GenerateRequest) -> GeminiRequest {
        let mut parts = Vec::new();
        if !request.prompt.is_empty() {
            parts.push(GeminiPart::Text {
                text: request.prompt.clone(),
            });
        }
        if let Some(image) = &request.image {
            parts.push(GeminiPart::InlineData {
                inline_data: GeminiInlineData {
                    mime_type: image.mime_type.clone(),
                    data: image.data.clone(),
                },
            });
        }

        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts,
            }],
            system_instruction: request.system.as_ref().map(|text| GeminiContent {
                role: None,
                parts: vec![GeminiPart::Text { text: text.clone() }],
            }),
            generation_config: request.temperature.map(|temperature| GenerationConfig {
                temperature: Some(temperature),
            }),
        }
    }

    /// Parse an error response
    fn parse_error(status: u16, body: &str, retry_after: Option<u64>) -> GreenLoopError {
        let message = serde_json::from_str::<GeminiErrorWrapper>(body)
            .ok()
            .and_then(|wrapper| {
                let msg = wrapper.error.message?;
                Some(match wrapper.error.status {
                    Some(status_text) if !status_text.is_empty() => {
                        format!("{}: {}", status_text, msg)
                    }
                    _ => msg,
                })
            })
            .unwrap_or_else(|| body.to_string());

        match status {
            401 | 403 => GreenLoopError::Api(ApiError::AuthenticationFailed),
            429 => {
                // Use Retry-After header if available, otherwise default to 10 seconds
                let retry_secs = retry_after.unwrap_or(10) as u32;
                GreenLoopError::Api(ApiError::RateLimited(retry_secs))
            }
            _ => GreenLoopError::Api(ApiError::ServerError { status, message }),
        }
    }
}

/// Parse numeric Retry-After header (seconds).
fn parse_retry_after_seconds(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok())
}

/// Concatenate the text parts of the first candidate
fn extract_text(response: GeminiResponse) -> String {
    response
        .candidates
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}

#[async_trait]
impl GenerativeProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, request: GenerateRequest) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            GreenLoopError::Config("No Gemini API key found. Set GEMINI_API_KEY.".to_string())
        })?;

        let body = self.build_request(&request);
        let url = format!("{}/{}:generateContent", self.base_url, self.model);

        tracing::debug!(
            target: "greenloop.llm",
            model = %self.model,
            has_image = request.image.is_some(),
            "sending generateContent request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();

        if !response.status().is_success() {
            // Extract Retry-After header before consuming response body
            let retry_after = parse_retry_after_seconds(response.headers());
            let body = response.text().await.unwrap_or_default();
            return Err(Self::parse_error(status, &body, retry_after));
        }

        let api_response: GeminiResponse = response.json().await.map_err(|e| {
            GreenLoopError::Api(ApiError::InvalidResponse(format!(
                "failed to parse Gemini response: {}",
                e.without_url()
            )))
        })?;

        Ok(extract_text(api_response))
    }
}

// Gemini API types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum GeminiPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: GeminiInlineData,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorWrapper {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: Option<String>,
    status: Option<String>,
}
