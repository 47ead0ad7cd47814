//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::encoder::{encode_document, DocumentKind};
use crate::error::ExtractorError;
use crate::parser::normalize_response;
use crate::prompt::PromptBuilder;
use crate::types::{ExtractionMetadata, ExtractionOutcome, SourceDocument};
use crate::validator::coerce_record;
use satbara_domain::InferenceProvider;
use satbara_llm::LlmError;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Shown to the user whenever a PDF is selected; extraction still runs
pub const PDF_ADVISORY: &str = "Note: Extracting data from PDFs using the current AI model setup is experimental. The model may not interpret PDF format correctly, potentially leading to errors or poor extraction results (e.g., 'unknown format' errors).";

/// The Extractor turns one uploaded document into one `SatBaraData`
///
/// Each call to [`Extractor::extract`] is a single request to the provider.
/// Nothing is retried and nothing is persisted.
pub struct Extractor<P>
where
    P: InferenceProvider<Error = LlmError>,
{
    provider: P,
    config: ExtractorConfig,
}

impl<P> Extractor<P>
where
    P: InferenceProvider<Error = LlmError>,
{
    /// Create a new Extractor
    pub fn new(provider: P, config: ExtractorConfig) -> Self {
        Self { provider, config }
    }

    /// The provider requests are sent to
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Advisory to show before extraction starts, if the document needs one
    pub fn advisory_for(&self, document: &SourceDocument) -> Option<&'static str> {
        match DocumentKind::from_mime(&document.mime_type) {
            DocumentKind::Pdf => Some(PDF_ADVISORY),
            _ => None,
        }
    }

    /// Extract a record from a document
    ///
    /// Encodes the document, sends one inference request bounded by the
    /// configured timeout, then normalizes and coerces the answer. The
    /// first failing stage ends the extraction.
    ///
    /// Dropping the returned future abandons the in-flight request.
    pub async fn extract(
        &self,
        document: &SourceDocument,
    ) -> Result<ExtractionOutcome, ExtractorError> {
        let start_time = Instant::now();

        info!(
            "Starting extraction for '{}' ({}, {} bytes)",
            document.file_name,
            document.mime_type,
            document.bytes.len()
        );

        let advisory = self.advisory_for(document);
        if advisory.is_some() {
            warn!("'{}' is a PDF; extraction quality may be poor", document.file_name);
        }

        let encoded = encode_document(document).inspect_err(|e| warn!("{}", e))?;
        let request = PromptBuilder::new(&encoded).build();

        let raw = timeout(self.config.request_timeout(), self.provider.infer(&request))
            .await
            .map_err(|_| ExtractorError::Transport {
                message: "inference request timed out".to_string(),
                diagnostic: format!(
                    "no answer from {} within {}s",
                    self.config.endpoint, self.config.request_timeout_secs
                ),
            })?
            .map_err(ExtractorError::from)
            .inspect_err(|e| {
                warn!("Inference failed: {}", e);
                if let Some(diagnostic) = e.diagnostic() {
                    debug!("Inference diagnostic: {}", diagnostic);
                }
            })?;

        debug!("Model response ({} chars): {}", raw.len(), raw);

        let normalized = normalize_response(&raw)?;
        if normalized.repaired {
            info!("Model response needed JSON repair");
        }

        let record = coerce_record(&normalized.value).inspect_err(|e| warn!("{}", e))?;

        let processing_time_ms = start_time.elapsed().as_millis() as u64;

        info!(
            "Extraction complete for '{}': {} occupant(s), {} crop(s), {} encumbrance(s) in {}ms",
            document.file_name,
            record.occupant_details.len(),
            record.crop_details.len(),
            record.encumbrances.len(),
            processing_time_ms
        );

        Ok(ExtractionOutcome {
            record,
            advisory,
            metadata: ExtractionMetadata {
                file_name: document.file_name.clone(),
                kind: encoded.kind,
                model_name: self.provider.model_name().to_string(),
                payload_bytes: encoded.base64_payload.len(),
                repaired: normalized.repaired,
                processing_time_ms,
            },
        })
    }
}
