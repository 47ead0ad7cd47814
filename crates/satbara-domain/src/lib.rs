//! Sat Bara Domain Layer
//!
//! This crate contains the canonical land-record model produced by the
//! extraction pipeline, and the trait interfaces that the infrastructure
//! crates implement.
//!
//! ## Key Concepts
//!
//! - **SatBaraData**: The typed contents of a 7/12 extract
//! - **StoredRecord**: A confirmed record with identity and timestamp attached
//! - **InferenceProvider**: The seam to a multimodal model endpoint
//! - **RecordStore**: The seam to the append/list/clear record store
//!
//! ## Architecture
//!
//! - Pure data types and trait definitions only
//! - No I/O; infrastructure implementations live in other crates
//! - Dependencies are limited to `uuid` (identifiers), `serde` and
//!   `serde_json::Number` (the record shape is shared with the model contract
//!   and the store)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod record;
pub mod record_id;
pub mod traits;

// Re-exports for convenience
pub use record::{
    CropDetail, Encumbrance, LandArea, LandRevenue, OccupantDetail, SatBaraData, StoredRecord,
};
pub use record_id::RecordId;
pub use traits::{InferenceProvider, InferenceRequest, RecordStore};
