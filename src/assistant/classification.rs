// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Waste classification results
//!
//! Turns free-form model text into a complete `ClassificationResult`.
//! Extraction is best-effort: anything that does not yield a complete
//! record becomes the "still analyzing" fallback.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Maximum characters of raw model text echoed in the analyzing fallback
pub const RAW_ECHO_LIMIT: usize = 100;

/// Outcome of classifying a waste photo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Human-readable waste category
    #[serde(rename = "type")]
    pub waste_type: String,

    /// Confidence as a percentage string, e.g. "80%"
    #[serde(deserialize_with = "deserialize_confidence")]
    pub confidence: String,

    /// Estimated reward points
    #[serde(deserialize_with = "deserialize_points")]
    pub points: u32,

    /// Short advisory for the user
    pub message: String,
}

impl ClassificationResult {
    /// Canned result shown when no provider credential is configured
    pub fn demo() -> Self {
        Self {
            waste_type: "Rác Tái Chế (Nhựa)".to_string(),
            confidence: "95%".to_string(),
            points: 50,
            message: "Chai nhựa có thể tái chế. Hãy rửa sạch và bỏ vào thùng rác tái chế."
                .to_string(),
        }
    }

    /// Result when the model answered but no record could be parsed.
    ///
    /// Echoes up to `RAW_ECHO_LIMIT` characters of the raw text.
    pub fn analyzing(raw: &str) -> Self {
        Self {
            waste_type: "Đang phân tích".to_string(),
            confidence: "N/A".to_string(),
            points: 0,
            message: raw.chars().take(RAW_ECHO_LIMIT).collect(),
        }
    }

    /// Result when the provider call itself failed
    pub fn unrecognized() -> Self {
        Self {
            waste_type: "Không xác định".to_string(),
            confidence: "0%".to_string(),
            points: 0,
            message: "Không thể nhận diện ảnh.".to_string(),
        }
    }
}

/// Parse model output into a classification. Never fails.
pub fn parse_classification(raw: &str) -> ClassificationResult {
    let Some(json) = extract_json_object(raw) else {
        tracing::debug!(target: "greenloop.assistant", "no JSON object in classification reply");
        return ClassificationResult::analyzing(raw);
    };

    match serde_json::from_str::<ClassificationResult>(json) {
        Ok(result) => result,
        Err(error) => {
            tracing::warn!(
                target: "greenloop.assistant",
                %error,
                "classification JSON did not parse"
            );
            ClassificationResult::analyzing(raw)
        }
    }
}

/// Find the first balanced `{...}` span in `text`.
///
/// Braces inside JSON string literals are ignored. Returns `None` when
/// there is no `{` or the first object never closes.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Accept a percentage string as-is, or a non-negative number (fraction or percent)
fn deserialize_confidence<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => {
            let value = n
                .as_f64()
                .ok_or_else(|| de::Error::custom("confidence out of range"))?;
            if !value.is_finite() || value < 0.0 {
                return Err(de::Error::custom(format!(
                    "confidence out of range: {}",
                    value
                )));
            }
            let percent = if value <= 1.0 { value * 100.0 } else { value };
            Ok(format!("{}%", percent.round() as i64))
        }
        other => Err(de::Error::custom(format!(
            "confidence must be a string or number, got {}",
            other
        ))),
    }
}

/// Accept a non-negative integer, a non-negative float (rounded), or a numeric string
fn deserialize_points<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| de::Error::custom("points out of range"))?,
        serde_json::Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("points is not numeric: {:?}", s)))?,
        other => {
            return Err(de::Error::custom(format!(
                "points must be a number, got {}",
                other
            )))
        }
    };

    if !value.is_finite() || value < 0.0 || value > u32::MAX as f64 {
        return Err(de::Error::custom(format!("points out of range: {}", value)));
    }
    Ok(value.round() as u32)
}
