//! Coerce a parsed JSON value into a `SatBaraData`
//!
//! Model output is loosely typed. Every field is coerced on its own so that
//! one bad field never costs the rest of the record; only a top-level value
//! that is not an object is rejected.

use crate::error::ExtractorError;
use satbara_domain::{
    CropDetail, Encumbrance, LandArea, LandRevenue, OccupantDetail, SatBaraData,
};
use serde_json::{Map, Number, Value};
use tracing::debug;

/// Build the canonical record from a parsed model response
///
/// # Errors
///
/// `ValidationFailed` if `value` is not a JSON object.
pub fn coerce_record(value: &Value) -> Result<SatBaraData, ExtractorError> {
    let obj = value.as_object().ok_or_else(|| {
        ExtractorError::ValidationFailed(format!(
            "expected a JSON object at the top level, got {}",
            json_type(value)
        ))
    })?;

    Ok(SatBaraData {
        village_name: string_field(obj, "villageName"),
        taluka: string_field(obj, "taluka"),
        district: string_field(obj, "district"),
        survey_number: string_field(obj, "surveyNumber"),
        subdivision_number: string_field(obj, "subdivisionNumber"),
        total_land_area: obj.get("totalLandArea").and_then(coerce_land_area),
        land_revenue: obj.get("landRevenue").and_then(coerce_land_revenue),
        occupant_details: collect_items(obj, "occupantDetails", coerce_occupant),
        crop_details: collect_items(obj, "cropDetails", coerce_crop),
        encumbrances: collect_items(obj, "encumbrances", coerce_encumbrance),
        other_rights: string_field(obj, "otherRights"),
        mutation_entries: collect_items(obj, "mutationEntries", coerce_string),
    })
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(coerce_string)
}

/// Optional text; blank strings become `None`, other scalars are stringified
///
/// Non-blank strings are kept exactly as the model wrote them.
fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Numbers pass through untouched; numeric strings are parsed
///
/// Parsing goes through the JSON number grammar so `"30"` becomes the integer
/// `30` rather than `30.0`.
fn coerce_number(value: &Value) -> Option<Number> {
    match value {
        Value::Number(n) => Some(n.clone()),
        Value::String(s) => serde_json::from_str::<Number>(s.trim()).ok(),
        _ => None,
    }
}

fn coerce_land_area(value: &Value) -> Option<LandArea> {
    let obj = value.as_object()?;
    Some(LandArea {
        hectare: obj.get("hectare").and_then(coerce_number),
        r: obj.get("r").and_then(coerce_number),
        sq_meter: obj.get("sqMeter").and_then(coerce_number),
    })
}

fn coerce_land_revenue(value: &Value) -> Option<LandRevenue> {
    match value {
        Value::Number(n) => Some(LandRevenue::Amount(n.clone())),
        other => coerce_string(other).map(LandRevenue::Text),
    }
}

fn coerce_occupant(value: &Value) -> Option<OccupantDetail> {
    let obj = value.as_object()?;
    Some(OccupantDetail {
        name: string_field(obj, "name")?,
        occupancy_type: string_field(obj, "occupancyType"),
        area_share: string_field(obj, "areaShare"),
    })
}

fn coerce_crop(value: &Value) -> Option<CropDetail> {
    let obj = value.as_object()?;
    Some(CropDetail {
        season: string_field(obj, "season"),
        crop_name: string_field(obj, "cropName")?,
        area: string_field(obj, "area"),
    })
}

fn coerce_encumbrance(value: &Value) -> Option<Encumbrance> {
    let obj = value.as_object()?;
    Some(Encumbrance {
        kind: string_field(obj, "type")?,
        details: string_field(obj, "details")?,
        mutation_entry_number: string_field(obj, "mutationEntryNumber"),
    })
}

/// Coerce each element of an array field, dropping the ones that fail
///
/// A missing or non-array field yields an empty list.
fn collect_items<T>(
    obj: &Map<String, Value>,
    key: &str,
    coerce: impl Fn(&Value) -> Option<T>,
) -> Vec<T> {
    let Some(items) = obj.get(key).and_then(Value::as_array) else {
        return Vec::new();
    };

    let kept: Vec<T> = items.iter().filter_map(coerce).collect();
    if kept.len() < items.len() {
        debug!(
            "Dropped {} of {} '{}' entries missing required fields",
            items.len() - kept.len(),
            items.len(),
            key
        );
    }
    kept
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
