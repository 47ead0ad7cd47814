//! Ollama Provider Implementation
//!
//! Sends one non-streaming request to Ollama's `/api/generate` endpoint with
//! the document attached as a base64 image.
//!
//! # Examples
//!
//! ```no_run
//! use satbara_llm::OllamaProvider;
//! use std::time::Duration;
//!
//! let provider = OllamaProvider::new("http://localhost:11434", "gemma3:27b")
//!     .with_timeout(Duration::from_secs(120));
//! ```

use crate::LlmError;
use satbara_domain::{InferenceProvider, InferenceRequest};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default model; must be a vision-capable model
pub const DEFAULT_MODEL: &str = "gemma3:27b";

/// Default timeout for a single inference request (5 minutes)
///
/// Vision inference on a local machine is slow; a full-page scan regularly
/// takes more than a minute.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Ollama API provider for local multimodal inference
pub struct OllamaProvider {
    endpoint: String,
    model: String,
    client: reqwest::Client,
    timeout: Duration,
}

/// Request body for Ollama generate API
#[derive(Debug, Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    images: &'a [String],
    stream: bool,
}

/// Response from Ollama generate API
#[derive(Debug, Deserialize)]
struct OllamaGenerateResponse {
    response: String,
    #[serde(default)]
    #[allow(dead_code)]
    done: bool,
}

impl OllamaProvider {
    /// Create a new Ollama provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama base URL (e.g., "http://localhost:11434")
    /// - `model`: Vision model to use (e.g., "gemma3:27b", "llava")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create a provider against `http://localhost:11434`
    pub fn default_endpoint(model: impl Into<String>) -> Self {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Endpoint base URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one generate request and return the model's text
    ///
    /// # Errors
    ///
    /// - `Communication` if Ollama is not reachable or the request times out
    /// - `ModelNotAvailable` on HTTP 404
    /// - `HttpStatus` on any other non-2xx status
    /// - `InvalidResponse` if the body is not a generate response
    /// - `EmptyResponse` if the model returned no text
    pub async fn generate(&self, request: &InferenceRequest) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.endpoint);

        let body = OllamaGenerateRequest {
            model: &self.model,
            prompt: compose_prompt(request),
            images: &request.images,
            stream: false,
        };

        debug!(
            "POST {} (model {}, {} image(s))",
            url,
            self.model,
            request.images.len()
        );

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Communication(format!("Request timed out after {:?}", self.timeout))
                } else {
                    LlmError::Communication(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::Communication(format!("Failed to read response body: {}", e)))?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.model.clone()));
        }
        if !status.is_success() {
            return Err(LlmError::HttpStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        parse_generate_body(&text)
    }
}

/// Join the fixed instructions into the single prompt the generate API takes
fn compose_prompt(request: &InferenceRequest) -> String {
    format!(
        "{}\n\n{}",
        request.system_instruction.trim(),
        request.user_instruction.trim()
    )
}

fn parse_generate_body(text: &str) -> Result<String, LlmError> {
    if text.trim().is_empty() {
        return Err(LlmError::EmptyResponse);
    }

    let parsed: OllamaGenerateResponse = serde_json::from_str(text)
        .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    if parsed.response.trim().is_empty() {
        return Err(LlmError::EmptyResponse);
    }

    Ok(parsed.response)
}

impl InferenceProvider for OllamaProvider {
    type Error = LlmError;

    async fn infer(&self, request: &InferenceRequest) -> Result<String, Self::Error> {
        self.generate(request).await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(images: Vec<String>) -> InferenceRequest {
        InferenceRequest {
            system_instruction: "  Return ONLY JSON.\n".to_string(),
            user_instruction: "Extract the data.".to_string(),
            images,
        }
    }

    #[test]
    fn test_ollama_provider_creation() {
        let provider = OllamaProvider::new("http://localhost:11434/", "gemma3:27b");
        assert_eq!(provider.endpoint(), "http://localhost:11434");
        assert_eq!(provider.model_name(), "gemma3:27b");
        assert_eq!(provider.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_ollama_provider_default_endpoint() {
        let provider = OllamaProvider::default_endpoint("llava");
        assert_eq!(provider.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(provider.model_name(), "llava");
    }

    #[test]
    fn test_ollama_provider_with_timeout() {
        let provider =
            OllamaProvider::default_endpoint("llava").with_timeout(Duration::from_secs(5));
        assert_eq!(provider.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_compose_prompt() {
        let prompt = compose_prompt(&request(vec![]));
        assert_eq!(prompt, "Return ONLY JSON.\n\nExtract the data.");
    }

    #[test]
    fn test_request_body_shape() {
        let req = request(vec!["aGVsbG8=".to_string()]);
        let body = OllamaGenerateRequest {
            model: "gemma3:27b",
            prompt: compose_prompt(&req),
            images: &req.images,
            stream: false,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], "gemma3:27b");
        assert_eq!(value["stream"], false);
        assert_eq!(value["images"][0], "aGVsbG8=");
    }

    #[test]
    fn test_request_body_omits_empty_images() {
        let req = request(vec![]);
        let body = OllamaGenerateRequest {
            model: "gemma3:27b",
            prompt: compose_prompt(&req),
            images: &req.images,
            stream: false,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("images").is_none());
    }

    #[test]
    fn test_parse_generate_body() {
        let text = r#"{"model":"gemma3:27b","response":"{\"district\":\"Pune\"}","done":true}"#;
        assert_eq!(parse_generate_body(text).unwrap(), r#"{"district":"Pune"}"#);
    }

    #[test]
    fn test_parse_generate_body_empty() {
        assert_eq!(parse_generate_body("   "), Err(LlmError::EmptyResponse));
        assert_eq!(
            parse_generate_body(r#"{"response":"  \n","done":true}"#),
            Err(LlmError::EmptyResponse)
        );
    }

    #[test]
    fn test_parse_generate_body_invalid() {
        assert!(matches!(
            parse_generate_body("<html>proxy error</html>"),
            Err(LlmError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_ollama_connection_refused() {
        // Port 1 is reserved; nothing listens there
        let provider = OllamaProvider::new("http://127.0.0.1:1", "gemma3:27b")
            .with_timeout(Duration::from_secs(2));

        let result = provider.generate(&request(vec![])).await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }

    #[tokio::test]
    #[ignore] // Only run when Ollama is available
    async fn test_ollama_generate_integration() {
        let provider = OllamaProvider::default_endpoint(DEFAULT_MODEL);
        let result = provider.generate(&request(vec![])).await;
        if let Ok(text) = result {
            assert!(!text.is_empty());
        }
    }
}
