//! Document encoding: raw bytes → base64 transport payload

use crate::error::ExtractorError;
use crate::types::SourceDocument;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fmt;
use tracing::debug;

/// How a document is treated by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Any `image/*` type; sent unchanged
    Image,
    /// `application/pdf`; sent unchanged but interpreted with lower confidence
    Pdf,
    /// Anything else; never sent
    Unsupported,
}

impl DocumentKind {
    /// Classify a declared mime type
    ///
    /// Parameters (`; charset=...`) and letter case are ignored.
    pub fn from_mime(mime_type: &str) -> Self {
        let essence = mime_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if essence == "application/pdf" {
            DocumentKind::Pdf
        } else if essence.strip_prefix("image/").is_some_and(|sub| !sub.is_empty()) {
            DocumentKind::Image
        } else {
            DocumentKind::Unsupported
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DocumentKind::Image => "image",
            DocumentKind::Pdf => "pdf",
            DocumentKind::Unsupported => "unsupported",
        })
    }
}

/// A document ready to be attached to an inference request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedDocument {
    /// Standard base64 of the file bytes
    pub base64_payload: String,

    /// Classification; never `Unsupported`
    pub kind: DocumentKind,
}

/// Encode a document for transport
///
/// Fails with `UnsupportedFormat` for anything that is not an image or a
/// PDF, before any network activity.
pub fn encode_document(document: &SourceDocument) -> Result<EncodedDocument, ExtractorError> {
    let kind = DocumentKind::from_mime(&document.mime_type);
    if kind == DocumentKind::Unsupported {
        return Err(ExtractorError::UnsupportedFormat {
            mime_type: document.mime_type.clone(),
        });
    }

    let base64_payload = STANDARD.encode(&document.bytes);
    debug!(
        "Encoded {} ({}) → {} bytes base64",
        document.file_name,
        kind,
        base64_payload.len()
    );

    Ok(EncodedDocument {
        base64_payload,
        kind,
    })
}
