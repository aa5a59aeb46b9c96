// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Error types for GreenLoop
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Main error type for GreenLoop operations
#[derive(Error, Debug)]
pub enum GreenLoopError {
    /// Generative-AI provider or backend API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Authentication rejected by the backend
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Session used in an invalid state
    #[error("Session error: {0}")]
    Session(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Persisted credential store errors
    #[error("Store error: {0}")]
    Store(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// API-specific error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Authentication failed (invalid API key)
    #[error("Authentication failed: invalid API key")]
    AuthenticationFailed,

    /// Rate limited by the API
    #[error("Rate limited: retry after {0} seconds")]
    RateLimited(u32),

    /// Network connectivity error
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid response from API
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// API returned an error
    #[error("API error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Timeout waiting for response
    #[error("Request timed out")]
    Timeout,
}

/// Errors returned by the auth backend for a login or registration attempt
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Email/password pair rejected
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Registration with an email that already has an account
    #[error("An account with this email already exists")]
    EmailTaken,

    /// Any other client-side rejection, with the backend's message
    #[error("Request rejected: {0}")]
    Rejected(String),
}

/// Result type alias for GreenLoop operations
pub type Result<T> = std::result::Result<T, GreenLoopError>;

/// Classify a reqwest failure that happened before any response arrived.
///
/// The request URL is stripped so credentials in it never reach error text or logs.
pub(crate) fn transport_error(err: reqwest::Error) -> GreenLoopError {
    let err = err.without_url();
    if err.is_timeout() {
        GreenLoopError::Api(ApiError::Timeout)
    } else if err.is_connect() {
        GreenLoopError::Api(ApiError::Network(err.to_string()))
    } else {
        GreenLoopError::Http(err)
    }
}
