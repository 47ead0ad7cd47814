//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the extraction pipeline and
//! infrastructure. Implementations live in other crates.

use crate::{SatBaraData, StoredRecord};

/// A single request to a multimodal inference endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceRequest {
    /// Fixed instruction describing the expected output
    pub system_instruction: String,

    /// Fixed instruction asking for the extraction
    pub user_instruction: String,

    /// Base64-encoded documents attached to the request
    pub images: Vec<String>,
}

/// Trait for multimodal inference operations
///
/// Implemented by the infrastructure layer (satbara-llm). One call is one
/// outbound request; implementations do not retry.
#[allow(async_fn_in_trait)]
pub trait InferenceProvider {
    /// Error type for inference operations
    type Error;

    /// Send the request and return the model's raw text response
    async fn infer(&self, request: &InferenceRequest) -> Result<String, Self::Error>;

    /// Name of the model serving requests
    fn model_name(&self) -> &str;
}

/// Trait for persisting confirmed records
///
/// Implemented by the infrastructure layer (satbara-store). The store only
/// appends, lists and clears; it never edits a record.
pub trait RecordStore {
    /// Error type for store operations
    type Error;

    /// Attach identity and timestamp to the record and append it
    fn append(
        &mut self,
        data: SatBaraData,
        file_name: Option<String>,
    ) -> Result<StoredRecord, Self::Error>;

    /// All stored records in insertion order
    fn list(&self) -> Result<Vec<StoredRecord>, Self::Error>;

    /// Remove every record, returning how many were removed
    fn clear(&mut self) -> Result<usize, Self::Error>;
}
