//! Error types for the extraction pipeline

use satbara_llm::LlmError;
use thiserror::Error;

/// Errors that can end an extraction
///
/// Every failure leaving `Extractor::extract` is one of the first five kinds.
/// None of them is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractorError {
    /// The document's mime type is neither an image nor a PDF
    #[error("Unsupported format: {mime_type}")]
    UnsupportedFormat {
        /// Declared mime type
        mime_type: String,
    },

    /// The inference endpoint could not be reached or answered with an error
    #[error("Transport error: {message}")]
    Transport {
        /// Short description
        message: String,
        /// Raw detail for logs
        diagnostic: String,
    },

    /// The endpoint answered successfully with no text
    #[error("Empty response from model")]
    EmptyResponse,

    /// No JSON object could be recovered from the model text
    #[error("Extraction failed: {reason}")]
    ExtractionFailed {
        /// Why the text was rejected
        reason: String,
        /// The model text, verbatim
        raw: String,
    },

    /// The recovered JSON is not an object
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Configuration error
    ///
    /// Raised only by `ExtractorConfig::validate` and `ExtractorConfig::from_toml`
    /// before an extractor is built. `Extractor::extract` never returns it.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExtractorError {
    /// Message to show the person who uploaded the document
    pub fn user_message(&self) -> &'static str {
        match self {
            ExtractorError::UnsupportedFormat { .. } => {
                "Unsupported file type. Please upload an image (PNG, JPEG, ...) or a PDF."
            }
            ExtractorError::Transport { .. } => {
                "Could not reach the local AI model. Make sure Ollama is running and the model is pulled, then try again."
            }
            ExtractorError::EmptyResponse => {
                "The AI model returned an empty response. Try again, or use a clearer scan."
            }
            ExtractorError::ExtractionFailed { .. } => {
                "The AI model's response did not contain readable data. The document may be unclear or in an unexpected format."
            }
            ExtractorError::ValidationFailed(_) => {
                "The AI model returned data in an unexpected shape. Please try the extraction again."
            }
            ExtractorError::Config(_) => {
                "The extractor is misconfigured. Check the endpoint and model settings."
            }
        }
    }

    /// Raw text worth logging, when the failure carries any
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            ExtractorError::Transport { diagnostic, .. } => Some(diagnostic),
            ExtractorError::ExtractionFailed { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

impl From<LlmError> for ExtractorError {
    /// A blank answer stays `EmptyResponse`; every other inference failure
    /// is a transport failure carrying the endpoint's own text.
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::EmptyResponse => ExtractorError::EmptyResponse,
            LlmError::HttpStatus { status, body } => ExtractorError::Transport {
                message: format!("inference endpoint returned HTTP {}", status),
                diagnostic: body,
            },
            LlmError::ModelNotAvailable(model) => ExtractorError::Transport {
                message: format!("model '{}' is not available", model),
                diagnostic: format!("HTTP 404 for model {}", model),
            },
            other => ExtractorError::Transport {
                message: other.to_string(),
                diagnostic: format!("{:?}", other),
            },
        }
    }
}
