//! Sat Bara Inference Layer
//!
//! Implementations of the `InferenceProvider` trait from `satbara-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing, records every request
//! - `OllamaProvider`: Local Ollama `/api/generate` integration
//!
//! # Examples
//!
//! ```
//! use satbara_domain::InferenceProvider;
//! use satbara_llm::MockProvider;
//!
//! let provider = MockProvider::new(r#"{"district":"Pune"}"#).with_model_name("gemma3:27b");
//! assert_eq!(provider.model_name(), "gemma3:27b");
//! assert_eq!(provider.call_count(), 0);
//! ```

#![warn(missing_docs)]

pub mod ollama;

use satbara_domain::{InferenceProvider, InferenceRequest};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

pub use ollama::OllamaProvider;

/// Errors that can occur while talking to the inference endpoint
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// Connection refused, timeout, or any other failure to complete the request
    #[error("Communication error: {0}")]
    Communication(String),

    /// The endpoint answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// Status code
        status: u16,
        /// Response body, as returned
        body: String,
    },

    /// The endpoint does not serve the configured model
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// A 2xx body that is not a generate response
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A 2xx response with no text in it
    #[error("Empty response from model")]
    EmptyResponse,
}

/// Mock inference provider for deterministic testing
///
/// Returns a fixed outcome without any network traffic and keeps a log of
/// the requests it received, so tests can assert that nothing was sent.
///
/// # Examples
///
/// ```
/// use satbara_llm::{LlmError, MockProvider};
///
/// let provider = MockProvider::failing(LlmError::EmptyResponse);
/// assert_eq!(provider.call_count(), 0);
/// assert!(provider.requests().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    outcome: Result<String, LlmError>,
    model: String,
    requests: Arc<Mutex<Vec<InferenceRequest>>>,
}

impl MockProvider {
    /// Create a MockProvider that answers every request with `response`
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            outcome: Ok(response.into()),
            model: "mock".to_string(),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a MockProvider that fails every request with `error`
    pub fn failing(error: LlmError) -> Self {
        Self {
            outcome: Err(error),
            ..Self::default()
        }
    }

    /// Override the reported model name
    pub fn with_model_name(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Number of times `infer` was called
    pub fn call_count(&self) -> usize {
        self.log().len()
    }

    /// Copies of every request received so far
    pub fn requests(&self) -> Vec<InferenceRequest> {
        self.log().clone()
    }

    /// Forget all recorded requests
    pub fn reset(&self) {
        self.log().clear();
    }

    fn log(&self) -> MutexGuard<'_, Vec<InferenceRequest>> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl InferenceProvider for MockProvider {
    type Error = LlmError;

    async fn infer(&self, request: &InferenceRequest) -> Result<String, Self::Error> {
        self.log().push(request.clone());
        self.outcome.clone()
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
