//! Sat Bara Extractor
//!
//! Turns a scanned 7/12 land-record document into a structured
//! `SatBaraData` using a local multimodal model.
//!
//! # Overview
//!
//! The document is base64 encoded and sent, together with a fixed
//! instruction describing the expected JSON shape, to an inference
//! provider. The model's free-form answer is then narrowed to a single JSON
//! object and coerced field by field into the canonical record.
//!
//! # Architecture
//!
//! ```text
//! SourceDocument → Encoder → PromptBuilder → InferenceProvider
//!                                                  ↓
//!                 SatBaraData ← Coercer ← Normalizer
//! ```
//!
//! Every stage returns a typed `ExtractorError`; the first failure ends the
//! extraction. Nothing is retried and nothing is persisted here. Saving a
//! record is the caller's decision.
//!
//! # Example Usage
//!
//! ```no_run
//! use satbara_extractor::{Extractor, ExtractorConfig, SourceDocument};
//! use satbara_llm::OllamaProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ExtractorConfig::default();
//! let provider = OllamaProvider::new(&config.endpoint, &config.model)
//!     .with_timeout(config.request_timeout());
//! let extractor = Extractor::new(provider, config);
//!
//! let document = SourceDocument::from_path("712.jpg").await?;
//! if let Some(advisory) = extractor.advisory_for(&document) {
//!     eprintln!("{}", advisory);
//! }
//!
//! match extractor.extract(&document).await {
//!     Ok(outcome) => println!("Village: {:?}", outcome.record.village_name),
//!     Err(e) => eprintln!("{}", e.user_message()),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod encoder;
mod error;
mod extractor;
mod parser;
mod prompt;
mod types;
mod validator;


pub use config::ExtractorConfig;
pub use encoder::{encode_document, DocumentKind, EncodedDocument};
pub use error::ExtractorError;
pub use extractor::{Extractor, PDF_ADVISORY};
pub use parser::{normalize_response, Normalized};
pub use prompt::{PromptBuilder, SCHEMA_VERSION, SYSTEM_INSTRUCTION, USER_INSTRUCTION};
pub use types::{ExtractionMetadata, ExtractionOutcome, SourceDocument};
pub use validator::coerce_record;
