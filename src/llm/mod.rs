// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! LLM module for GreenLoop
//!
//! Provides abstraction over generative-AI providers.

pub mod mock_provider;
pub mod provider;
pub mod providers;

pub use provider::*;
