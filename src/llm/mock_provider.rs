// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Mock generative provider for testing
//!
//! Provides a configurable mock implementation of the GenerativeProvider
//! trait that can be used in tests without making real API calls.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{ApiError, GreenLoopError, Result};
use crate::llm::provider::{GenerateRequest, GenerativeProvider};

/// A mock provider for testing
#[derive(Clone)]
pub struct MockProvider {
    /// Provider name
    name: String,
    /// Whether the provider reports a credential
    configured: bool,
    /// Configured responses
    responses: Arc<Mutex<Vec<MockResponse>>>,
    /// Call counter
    call_count: Arc<AtomicUsize>,
    /// Recorded requests
    recorded_requests: Arc<Mutex<Vec<GenerateRequest>>>,
}

/// A pre-configured outcome for the mock provider
#[derive(Clone, Debug)]
pub enum MockResponse {
    /// Return this text
    Text(String),
    /// Fail as if the network were down
    NetworkError(String),
}

impl Default for MockResponse {
    fn default() -> Self {
        MockResponse::Text("Mock response".to_string())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!("Mock provider lock was poisoned, recovering");
            poisoned.into_inner()
        }
    }
}

impl MockProvider {
    /// Create a new configured mock provider
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            configured: true,
            responses: Arc::new(Mutex::new(vec![MockResponse::default()])),
            call_count: Arc::new(AtomicUsize::new(0)),
            recorded_requests: Arc::new(Mutex::new(vec![])),
        }
    }

    /// Create a mock provider that reports no credential
    pub fn unconfigured() -> Self {
        let mut provider = Self::new();
        provider.configured = false;
        provider
    }

    /// Set the text response
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.with_outcomes(vec![MockResponse::Text(text.into())])
    }

    /// Queue multiple responses (returned in order)
    pub fn with_responses(self, texts: Vec<String>) -> Self {
        self.with_outcomes(texts.into_iter().map(MockResponse::Text).collect())
    }

    /// Fail every call with a network error
    pub fn with_network_error(self, message: impl Into<String>) -> Self {
        self.with_outcomes(vec![MockResponse::NetworkError(message.into())])
    }

    /// Queue arbitrary outcomes (returned in order)
    pub fn with_outcomes(self, outcomes: Vec<MockResponse>) -> Self {
        {
            let mut responses = lock(&self.responses);
            responses.clear();
            responses.extend(outcomes);
        }
        self
    }

    /// Get the number of times generate() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Get all recorded requests
    pub fn recorded_requests(&self) -> Vec<GenerateRequest> {
        lock(&self.recorded_requests).clone()
    }

    /// Get the last request made
    pub fn last_request(&self) -> Option<GenerateRequest> {
        lock(&self.recorded_requests).last().cloned()
    }

    /// Reset call count and recorded requests
    pub fn reset(&self) {
        self.call_count.store(0, Ordering::SeqCst);
        lock(&self.recorded_requests).clear();
    }

    /// Get the next response
    fn next_response(&self) -> MockResponse {
        let count = self.call_count.fetch_add(1, Ordering::SeqCst);
        let responses = lock(&self.responses);
        // Cycle through responses or return the last one
        if responses.is_empty() {
            MockResponse::default()
        } else {
            responses[count.min(responses.len() - 1)].clone()
        }
    }
}

#[async_trait]
impl GenerativeProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn generate(&self, request: GenerateRequest) -> Result<String> {
        lock(&self.recorded_requests).push(request);

        match self.next_response() {
            MockResponse::Text(text) => Ok(text),
            MockResponse::NetworkError(message) => {
                Err(GreenLoopError::Api(ApiError::Network(message)))
            }
        }
    }
}
