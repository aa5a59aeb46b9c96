// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use greenloop::error::{ApiError, AuthError, GreenLoopError};
use std::io;

#[test]
fn test_io_error_conversion() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
    let error: GreenLoopError = io_error.into();

    match error {
        GreenLoopError::Io(_) => {} // Expected
        _ => panic!("Expected Io error, got different error type"),
    }
}

#[test]
fn test_config_error_display() {
    let error = GreenLoopError::Config("Missing API key".to_string());
    assert_eq!(error.to_string(), "Configuration error: Missing API key");
}

#[test]
fn test_invalid_input_display() {
    let error = GreenLoopError::InvalidInput("empty image".to_string());
    assert_eq!(error.to_string(), "Invalid input: empty image");
}

#[test]
fn test_api_rate_limited_error() {
    let error = ApiError::RateLimited(30);
    assert_eq!(error.to_string(), "Rate limited: retry after 30 seconds");
}

#[test]
fn test_api_authentication_error() {
    let error = ApiError::AuthenticationFailed;
    assert_eq!(error.to_string(), "Authentication failed: invalid API key");
}

#[test]
fn test_api_network_error() {
    let error = ApiError::Network("connection refused".to_string());
    assert_eq!(error.to_string(), "Network error: connection refused");
}

#[test]
fn test_auth_error_display() {
    assert_eq!(
        AuthError::EmailTaken.to_string(),
        "An account with this email already exists"
    );
    assert_eq!(
        AuthError::Rejected("Password too short".to_string()).to_string(),
        "Request rejected: Password too short"
    );
}

#[test]
fn test_auth_error_wraps_into_main_error() {
    let error: GreenLoopError = AuthError::InvalidCredentials.into();
    assert_eq!(error.to_string(), "Auth error: Invalid email or password");
}
