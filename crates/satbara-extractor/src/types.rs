//! Request and response types for extraction

use crate::encoder::DocumentKind;
use satbara_domain::SatBaraData;
use std::path::Path;

/// A document handed over by the file-selection collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Original file name, used only for display and persistence
    pub file_name: String,

    /// Declared mime type
    pub mime_type: String,

    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl SourceDocument {
    /// Create a document from bytes and a declared mime type
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read a file, declaring its mime type from the extension
    ///
    /// Files without a recognised extension are declared as
    /// `application/octet-stream` and will be rejected by the encoder.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }
}

/// Result of a successful extraction
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    /// The validated record, without identity
    pub record: SatBaraData,

    /// Non-fatal notice shown to the user (PDF inputs)
    pub advisory: Option<&'static str>,

    /// Metadata about the extraction
    pub metadata: ExtractionMetadata,
}

/// Metadata about an extraction operation
#[derive(Debug, Clone)]
pub struct ExtractionMetadata {
    /// Source file name
    pub file_name: String,

    /// How the document was classified
    pub kind: DocumentKind,

    /// Name of the model that answered
    pub model_name: String,

    /// Size of the base64 payload sent
    pub payload_bytes: usize,

    /// Whether the bounded repair pass was needed to parse the response
    pub repaired: bool,

    /// Wall-clock time in milliseconds
    pub processing_time_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_from_path_guesses_mime_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("satbara.png");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"\x89PNG\r\n\x1a\n")
            .unwrap();

        let doc = SourceDocument::from_path(&path).await.unwrap();
        assert_eq!(doc.file_name, "satbara.png");
        assert_eq!(doc.mime_type, "image/png");
        assert_eq!(doc.bytes.len(), 8);
    }

    #[tokio::test]
    async fn test_from_path_pdf_and_unknown() {
        let dir = tempfile::tempdir().unwrap();

        let pdf = dir.path().join("712.pdf");
        std::fs::write(&pdf, b"%PDF-1.7").unwrap();
        assert_eq!(
            SourceDocument::from_path(&pdf).await.unwrap().mime_type,
            "application/pdf"
        );

        let unknown = dir.path().join("scan.zzz-unknown");
        std::fs::write(&unknown, b"??").unwrap();
        assert_eq!(
            SourceDocument::from_path(&unknown).await.unwrap().mime_type,
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn test_from_path_missing_file() {
        let result = SourceDocument::from_path("/definitely/not/here.png").await;
        assert!(result.is_err());
    }
}
