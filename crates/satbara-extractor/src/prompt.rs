//! The fixed prompt contract with the vision model
//!
//! The instruction text is part of the external interface: the normalizer
//! and the coercer assume a single JSON object with exactly these keys.
//! Changing the text is a breaking change; bump `SCHEMA_VERSION` and re-run
//! the recorded-response tests when doing so.

use crate::encoder::EncodedDocument;
use satbara_domain::InferenceRequest;

/// Version label of the instruction text below
pub const SCHEMA_VERSION: &str = "sat-bara-712/1";

/// Builds the inference request for an encoded document
pub struct PromptBuilder<'a> {
    document: &'a EncodedDocument,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(document: &'a EncodedDocument) -> Self {
        Self { document }
    }

    /// Build the complete request
    ///
    /// Only the attachment varies between calls; both instructions are
    /// constants.
    pub fn build(&self) -> InferenceRequest {
        InferenceRequest {
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            user_instruction: USER_INSTRUCTION.to_string(),
            images: vec![self.document.base64_payload.clone()],
        }
    }
}

/// Instruction describing the target JSON shape
pub const SYSTEM_INSTRUCTION: &str = r#"You are an expert system designed to extract information from Indian land record documents, specifically the 'Sat Bara Utara' (7/12 extract) from Maharashtra, India.
Analyze the provided image or document content.
Return the information ONLY as a valid JSON object. Do not include any explanatory text, comments, or markdown formatting like ```json ... ``` around the JSON object itself.
The JSON object should adhere to the following structure:
{
  "villageName": "string | null",
  "taluka": "string | null",
  "district": "string | null",
  "surveyNumber": "string | null",
  "subdivisionNumber": "string | null",
  "totalLandArea": {
    "hectare": "number | null",
    "r": "number | null",
    "sqMeter": "number | null" // Always included, use null if not available
  } | null,
  "landRevenue": "string | number | null", // Use string if currency symbols or non-numeric chars are present, otherwise number
  "occupantDetails": [
    {
      "name": "string",
      "occupancyType": "string | null",
      "areaShare": "string | null"
    }
  ],
  "cropDetails": [
    {
      "season": "string | null",
      "cropName": "string",
      "area": "string | null"
    }
  ],
  "encumbrances": [
    {
      "type": "string",
      "details": "string",
      "mutationEntryNumber": "string | null"
    }
  ],
  "otherRights": "string | null",
  "mutationEntries": ["string"]
}

If any piece of information is not found or not clear, use null for its value. For arrays like occupantDetails, cropDetails, encumbrances, and mutationEntries, if no relevant information is found, return an empty array []. Never omit a key.
Ensure all string values are properly escaped if they contain special characters.
Focus on extracting the data accurately as per the fields specified.
Convert numeric values for land area and revenue to numbers if possible, otherwise represent them as strings if they include units or non-numeric characters that cannot be cleanly separated."#;

/// Instruction asking for the extraction
pub const USER_INSTRUCTION: &str = "Extract the data from this Sat Bara document.";
