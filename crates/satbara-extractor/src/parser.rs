//! Recover a single JSON object from untrusted model text
//!
//! Models wrap their answer in prose or code fences often enough that the
//! text is scanned for the outermost braces instead of being parsed as-is.
//! A single bounded repair pass handles the two malformations seen in
//! practice; anything else is rejected.

use crate::error::ExtractorError;
use serde_json::Value;
use tracing::{debug, warn};

/// Characters of raw model text included in log lines
const LOG_PREVIEW_CHARS: usize = 200;

/// A JSON value recovered from model text
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// The parsed value
    pub value: Value,

    /// Whether the repair pass was needed
    pub repaired: bool,
}

/// Isolate and parse the JSON object in `raw`
///
/// The candidate runs from the first `{` to the last `}`. If it does not
/// parse, trailing commas and raw newlines inside strings are repaired once
/// and parsing is retried.
///
/// # Errors
///
/// `ExtractionFailed`, carrying `raw` verbatim, when there is no candidate
/// or the repaired candidate still does not parse.
pub fn normalize_response(raw: &str) -> Result<Normalized, ExtractorError> {
    let candidate = candidate_slice(raw).ok_or_else(|| {
        warn!("No JSON object in model response: {}", preview(raw));
        extraction_failed("no JSON object found in model response", raw)
    })?;

    match serde_json::from_str::<Value>(candidate) {
        Ok(value) => {
            return Ok(Normalized {
                value,
                repaired: false,
            })
        }
        Err(e) => debug!("Candidate JSON did not parse ({}), attempting repair", e),
    }

    let repaired = repair_json(candidate);
    serde_json::from_str::<Value>(&repaired)
        .map(|value| Normalized {
            value,
            repaired: true,
        })
        .map_err(|e| {
            warn!("Model response is not valid JSON after repair: {}", preview(raw));
            extraction_failed(&format!("invalid JSON after repair: {}", e), raw)
        })
}

fn extraction_failed(reason: &str, raw: &str) -> ExtractorError {
    ExtractorError::ExtractionFailed {
        reason: reason.to_string(),
        raw: raw.to_string(),
    }
}

/// Text from the first `{` through the last `}`, if they are in that order
fn candidate_slice(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (start < end).then(|| &raw[start..=end])
}

/// The bounded repair pass
///
/// Drops commas that directly precede `}` or `]`, and escapes CR/LF that
/// appear inside string literals. Nothing else is touched.
fn repair_json(candidate: &str) -> String {
    let mut out = String::with_capacity(candidate.len() + 16);
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in candidate.char_indices() {
        if in_string {
            match ch {
                _ if escaped => {
                    escaped = false;
                    out.push(ch);
                }
                '\\' => {
                    escaped = true;
                    out.push(ch);
                }
                '"' => {
                    in_string = false;
                    out.push(ch);
                }
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                _ => out.push(ch),
            }
            continue;
        }

        match ch {
            '"' => {
                in_string = true;
                out.push(ch);
            }
            ',' if closes_next(&candidate[idx + 1..]) => {}
            _ => out.push(ch),
        }
    }

    out
}

fn closes_next(rest: &str) -> bool {
    rest.trim_start().starts_with(['}', ']'])
}

fn preview(raw: &str) -> String {
    let mut preview: String = raw.chars().take(LOG_PREVIEW_CHARS).collect();
    if raw.chars().count() > LOG_PREVIEW_CHARS {
        preview.push('…');
    }
    preview
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    proptest! {
        /// Surrounding prose and fences do not change the recovered object
        #[test]
        fn test_decoration_does_not_change_result(
            village in "[A-Za-z ]{0,20}",
            survey in "[0-9/]{1,8}",
            prefix in "[A-Za-z .:!\n]{0,40}",
            suffix in "[A-Za-z .:!\n]{0,40}",
            fenced in any::<bool>(),
        ) {
            let object = json!({"villageName": village, "surveyNumber": survey});
            let bare = object.to_string();
            let body = if fenced {
                format!("```json\n{}\n```", bare)
            } else {
                bare.clone()
            };
            let decorated = format!("{}{}{}", prefix, body, suffix);

            let plain = normalize_response(&bare).unwrap().value;
            let recovered = normalize_response(&decorated).unwrap().value;
            prop_assert_eq!(&recovered, &plain);
            prop_assert_eq!(recovered, object);
        }
    }
}
