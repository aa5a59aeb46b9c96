// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! GreenLoop - client core for the waste-collection rewards marketplace.
//!
//! This crate exposes the logic shared by GreenLoop clients and the
//! `greenloop` CLI (`src/main.rs`):
//! - `session`: who is logged in, restored from persisted credentials
//! - `auth`: the auth backend collaborator and local credential store
//! - `assistant`: chat replies and waste-photo classification that never fail
//! - `llm`: generative provider abstraction and the Gemini implementation
//! - `config`: settings file and environment overrides

pub mod assistant;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod session;

pub use error::{GreenLoopError, Result};
