// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Session snapshot and lifecycle phases

use tokio::sync::watch;

use crate::auth::User;

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Process just started; nothing has been read yet
    Unknown,
    /// Reading persisted credentials
    Restoring,
    /// A login or registration is in flight
    Authenticating,
    /// A user is signed in
    Authenticated,
    /// Nobody is signed in
    Anonymous,
}

impl SessionPhase {
    /// Whether this phase has an operation in flight
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            SessionPhase::Unknown | SessionPhase::Restoring | SessionPhase::Authenticating
        )
    }
}

/// Snapshot of who is logged in
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// The signed-in user, if any
    pub user: Option<User>,
    /// True while a restore, login or registration is in flight
    pub is_loading: bool,
    /// Lifecycle phase
    pub phase: SessionPhase,
}

impl Session {
    /// State at process start
    pub fn initial() -> Self {
        Self {
            user: None,
            is_loading: true,
            phase: SessionPhase::Unknown,
        }
    }

    /// True iff a user is present
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Release the loading flag and derive the resting phase from `user`.
    pub(crate) fn settle(&mut self) {
        self.is_loading = false;
        self.phase = if self.user.is_some() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Anonymous
        };
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::initial()
    }
}

/// Marks the session as loading for its lifetime and settles it on drop.
///
/// Settling on drop covers the error paths and a caller dropping the
/// future mid-request, so `is_loading` can never stay stuck at true.
pub(crate) struct LoadingGuard<'a> {
    state: &'a watch::Sender<Session>,
}

impl<'a> LoadingGuard<'a> {
    pub(crate) fn enter(state: &'a watch::Sender<Session>, phase: SessionPhase) -> Self {
        state.send_modify(|session| {
            session.is_loading = true;
            session.phase = phase;
        });
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(Session::settle);
    }
}
