// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Authentication collaborator for the session manager
//!
//! Defines the user/auth wire types shared with the GreenLoop API, the
//! `AuthService` abstraction the session manager depends on, and the
//! default HTTP + credential-file implementation.

pub mod http;
pub mod store;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use http::HttpAuthService;
pub use store::CredentialStore;

/// A GreenLoop account as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Display name in "First Last" form
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Successful login/registration payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: User,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// Body of `POST /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/register`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Network authentication plus local credential persistence.
///
/// The read and logout methods are synchronous: they only touch the local
/// store. `logout` cannot fail from the caller's point of view; store
/// errors are logged by the implementation.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Read the persisted user profile
    fn get_user(&self) -> Result<Option<User>>;

    /// Read the persisted access token
    fn get_token(&self) -> Result<Option<String>>;

    /// Authenticate with email and password
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse>;

    /// Create an account and authenticate as it
    async fn register(&self, request: RegisterRequest) -> Result<AuthResponse>;

    /// Clear the persisted profile and token
    fn logout(&self);
}
