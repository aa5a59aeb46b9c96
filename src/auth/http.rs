// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! HTTP implementation of `AuthService`
//!
//! Talks to the GreenLoop API (`/auth/login`, `/auth/register`) and keeps
//! the resulting token and profile in a `CredentialStore`.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::auth::{AuthResponse, AuthService, CredentialStore, LoginRequest, RegisterRequest, User};
use crate::config::Settings;
use crate::error::{transport_error, ApiError, AuthError, GreenLoopError, Result};

/// Auth service backed by the GreenLoop REST API
pub struct HttpAuthService {
    client: Client,
    base_url: String,
    store: CredentialStore,
}

/// Error body returned by the API (`{"message": ...}` or `{"error": ...}`)
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl HttpAuthService {
    /// Create a service for the given API base URL
    pub fn new(base_url: impl Into<String>, store: CredentialStore) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
        }
    }

    /// Create a service from settings (base URL, timeout, credentials file)
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.auth.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.get_auth_base_url(),
            store: CredentialStore::open(settings.credentials_path()),
        })
    }

    /// The credential store this service persists into
    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(target: "greenloop.auth", %url, "sending auth request");

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status().as_u16();

        match status {
            200..=299 => response.json::<T>().await.map_err(|e| {
                GreenLoopError::Api(ApiError::InvalidResponse(format!(
                    "unexpected auth response body: {}",
                    e
                )))
            }),
            401 => Err(AuthError::InvalidCredentials.into()),
            409 => Err(AuthError::EmailTaken.into()),
            400..=499 => {
                let body = response.text().await.unwrap_or_default();
                Err(AuthError::Rejected(error_message(&body, "Client error")).into())
            }
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(GreenLoopError::Api(ApiError::ServerError {
                    status,
                    message: error_message(&body, "Server error"),
                }))
            }
        }
    }

    fn persist(&self, auth: &AuthResponse) -> Result<()> {
        self.store.save(&auth.access_token, &auth.user)
    }
}

/// Pull a human-readable message out of an error body
fn error_message(body: &str, fallback: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.message.or(parsed.error) {
            return message;
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

#[async_trait]
impl AuthService for HttpAuthService {
    fn get_user(&self) -> Result<Option<User>> {
        self.store.user()
    }

    fn get_token(&self) -> Result<Option<String>> {
        self.store.token()
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let auth: AuthResponse = self.post("/auth/login", &body).await?;
        self.persist(&auth)?;
        tracing::info!(target: "greenloop.auth", user_id = auth.user.id, "login succeeded");
        Ok(auth)
    }

    async fn register(&self, request: RegisterRequest) -> Result<AuthResponse> {
        let auth: AuthResponse = self.post("/auth/register", &request).await?;
        self.persist(&auth)?;
        tracing::info!(target: "greenloop.auth", user_id = auth.user.id, "registration succeeded");
        Ok(auth)
    }

    fn logout(&self) {
        if let Err(error) = self.store.clear() {
            tracing::warn!(target: "greenloop.auth", %error, "failed to clear persisted credentials");
        }
    }
}
