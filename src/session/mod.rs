// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Session management
//!
//! `SessionManager` is the single source of truth for who is logged in.
//! It is built once at startup around an `AuthService` and handed to
//! whatever needs it; consumers read snapshots or subscribe to changes.
//!
//! Failure policy:
//! - `restore_session` never fails; unreadable persisted state is cleared
//!   and the session settles as anonymous.
//! - `login` / `register` propagate the auth service error unchanged.
//! - Every operation releases `is_loading` when it settles.

mod state;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

use crate::auth::{AuthService, RegisterRequest, User};
use crate::error::{GreenLoopError, Result};

pub use state::{Session, SessionPhase};
use state::LoadingGuard;

/// Owns the authenticated-user state of a running client
pub struct SessionManager {
    auth: Arc<dyn AuthService>,
    state: watch::Sender<Session>,
    restore_started: AtomicBool,
}

impl SessionManager {
    /// Create a manager in the initial `Unknown` phase
    pub fn new(auth: Arc<dyn AuthService>) -> Self {
        let (state, _) = watch::channel(Session::initial());
        Self {
            auth,
            state,
            restore_started: AtomicBool::new(false),
        }
    }

    /// Copy of the current session
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Receive every subsequent session change
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// The signed-in user, if any
    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// The signed-in user, or an error if the session has not been restored yet.
    pub fn current_user(&self) -> Result<Option<User>> {
        let session = self.state.borrow();
        match session.phase {
            SessionPhase::Unknown | SessionPhase::Restoring => Err(GreenLoopError::Session(
                "session used before restore completed".to_string(),
            )),
            _ => Ok(session.user.clone()),
        }
    }

    /// Restore the session from persisted credentials.
    ///
    /// Runs once per manager; later calls are ignored.
    pub async fn restore_session(&self) {
        if self.restore_started.swap(true, Ordering::SeqCst) {
            tracing::debug!(target: "greenloop.session", "restore already performed, skipping");
            return;
        }

        let _loading = LoadingGuard::enter(&self.state, SessionPhase::Restoring);

        match self.read_persisted() {
            Ok(Some(user)) => {
                tracing::info!(target: "greenloop.session", user_id = user.id, "session restored");
                self.state.send_modify(|session| session.user = Some(user));
            }
            Ok(None) => {
                tracing::debug!(target: "greenloop.session", "no persisted session");
                self.state.send_modify(|session| session.user = None);
            }
            Err(error) => {
                tracing::warn!(
                    target: "greenloop.session",
                    %error,
                    "failed to read persisted session; clearing it"
                );
                self.auth.logout();
                self.state.send_modify(|session| session.user = None);
            }
        }
    }

    /// Log in with email and password.
    ///
    /// The previous user stays visible while the request is in flight.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let _loading = LoadingGuard::enter(&self.state, SessionPhase::Authenticating);

        match self.auth.login(email, password).await {
            Ok(auth) => {
                tracing::info!(target: "greenloop.session", user_id = auth.user.id, "logged in");
                self.state
                    .send_modify(|session| session.user = Some(auth.user.clone()));
                Ok(auth.user)
            }
            Err(error) => {
                tracing::warn!(target: "greenloop.session", %error, "login failed");
                Err(error)
            }
        }
    }

    /// Register a new account and log in as it
    pub async fn register(&self, request: RegisterRequest) -> Result<User> {
        let _loading = LoadingGuard::enter(&self.state, SessionPhase::Authenticating);

        match self.auth.register(request).await {
            Ok(auth) => {
                tracing::info!(target: "greenloop.session", user_id = auth.user.id, "registered");
                self.state
                    .send_modify(|session| session.user = Some(auth.user.clone()));
                Ok(auth.user)
            }
            Err(error) => {
                tracing::warn!(target: "greenloop.session", %error, "registration failed");
                Err(error)
            }
        }
    }

    /// Log out. Safe to call when nobody is logged in.
    pub fn logout(&self) {
        self.auth.logout();
        self.state.send_modify(|session| {
            session.user = None;
            session.settle();
        });
        tracing::debug!(target: "greenloop.session", "logged out");
    }

    /// Persisted user, only when both the profile and a token exist
    fn read_persisted(&self) -> Result<Option<User>> {
        let user = self.auth.get_user()?;
        let token = self.auth.get_token()?;
        Ok(match (user, token) {
            (Some(user), Some(_)) => Some(user),
            _ => None,
        })
    }
}
