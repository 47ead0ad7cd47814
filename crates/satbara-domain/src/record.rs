//! The canonical Sat Bara Utara (7/12 extract) record

use crate::RecordId;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

/// Land area split into its three customary units
///
/// `sq_meter` is never skipped during serialization: consumers distinguish a
/// missing key from a known-absent value. Values keep the number form they
/// were read in, so `30` stays an integer and `30.5` a decimal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandArea {
    /// Hectares
    pub hectare: Option<Number>,

    /// Ares ("R")
    pub r: Option<Number>,

    /// Square meters
    #[serde(default)]
    pub sq_meter: Option<Number>,
}

/// Assessed land revenue
///
/// The extract often prints revenue with a currency symbol or unit, so a
/// value that is not a plain number is kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LandRevenue {
    /// A plain numeric amount
    Amount(Number),
    /// The text as printed on the document
    Text(String),
}

impl fmt::Display for LandRevenue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LandRevenue::Amount(amount) => write!(f, "{}", amount),
            LandRevenue::Text(text) => f.write_str(text),
        }
    }
}

/// A person holding a recorded right or share in the parcel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupantDetail {
    /// Occupant name
    pub name: String,

    /// Kind of occupancy (e.g. "Bhogvatadar Varg 1")
    #[serde(default)]
    pub occupancy_type: Option<String>,

    /// Share of the total area held by this occupant
    #[serde(default)]
    pub area_share: Option<String>,
}

/// A crop recorded against the parcel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropDetail {
    /// Season (kharif, rabi, ...)
    #[serde(default)]
    pub season: Option<String>,

    /// Crop name
    pub crop_name: String,

    /// Area under the crop
    #[serde(default)]
    pub area: Option<String>,
}

/// A recorded legal charge or restriction against the parcel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Encumbrance {
    /// Kind of encumbrance (loan, lease, ...)
    #[serde(rename = "type")]
    pub kind: String,

    /// Free-text details
    pub details: String,

    /// Mutation entry that recorded the encumbrance
    #[serde(default)]
    pub mutation_entry_number: Option<String>,
}

/// The typed contents of a 7/12 extract
///
/// Every collection is always present (possibly empty) and every optional
/// scalar is `None` rather than an empty string. Records are produced once
/// by the extraction pipeline and are not mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SatBaraData {
    /// Village (gaon)
    pub village_name: Option<String>,

    /// Taluka
    pub taluka: Option<String>,

    /// District (jilha)
    pub district: Option<String>,

    /// Survey (gat) number
    pub survey_number: Option<String>,

    /// Subdivision (hissa) number
    pub subdivision_number: Option<String>,

    /// Total cultivable area
    pub total_land_area: Option<LandArea>,

    /// Assessed land revenue
    pub land_revenue: Option<LandRevenue>,

    /// Occupants in document order
    #[serde(default)]
    pub occupant_details: Vec<OccupantDetail>,

    /// Crops in document order
    #[serde(default)]
    pub crop_details: Vec<CropDetail>,

    /// Encumbrances in document order
    #[serde(default)]
    pub encumbrances: Vec<Encumbrance>,

    /// Other rights recorded on the extract
    pub other_rights: Option<String>,

    /// Mutation entry references in document order
    #[serde(default)]
    pub mutation_entries: Vec<String>,
}

/// A confirmed record together with the identity the store assigned to it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecord {
    /// Identifier assigned on append
    pub id: RecordId,

    /// Name of the source file
    pub file_name: Option<String>,

    /// When the record was stored (Unix seconds)
    pub extraction_timestamp: u64,

    /// The extracted data
    #[serde(flatten)]
    pub data: SatBaraData,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_default_record_serializes_every_key() {
        let value = serde_json::to_value(SatBaraData::default()).unwrap();
        let obj = value.as_object().unwrap();

        for key in [
            "villageName",
            "taluka",
            "district",
            "surveyNumber",
            "subdivisionNumber",
            "totalLandArea",
            "landRevenue",
            "otherRights",
        ] {
            assert_eq!(obj.get(key), Some(&Value::Null), "{} should be null", key);
        }
        for key in ["occupantDetails", "cropDetails", "encumbrances", "mutationEntries"] {
            assert_eq!(obj.get(key), Some(&json!([])), "{} should be []", key);
        }
    }

    #[test]
    fn test_sq_meter_key_always_present() {
        let area = LandArea {
            hectare: Number::from_f64(1.5),
            r: None,
            sq_meter: None,
        };
        let value = serde_json::to_value(&area).unwrap();
        assert_eq!(value, json!({"hectare": 1.5, "r": null, "sqMeter": null}));
    }

    #[test]
    fn test_land_revenue_untagged() {
        assert_eq!(
            serde_json::to_value(LandRevenue::Amount(40.into())).unwrap(),
            json!(40)
        );
        assert_eq!(
            serde_json::to_value(LandRevenue::Text("₹ 12.50".into())).unwrap(),
            json!("₹ 12.50")
        );

        let parsed: LandRevenue = serde_json::from_value(json!("Rs. 40")).unwrap();
        assert_eq!(parsed, LandRevenue::Text("Rs. 40".into()));

        let parsed: LandRevenue = serde_json::from_value(json!(12.5)).unwrap();
        assert_eq!(parsed.to_string(), "12.5");
    }

    #[test]
    fn test_land_revenue_display() {
        assert_eq!(LandRevenue::Amount(40.into()).to_string(), "40");
        assert_eq!(LandRevenue::Text("Rs. 40".into()).to_string(), "Rs. 40");
    }

    #[test]
    fn test_encumbrance_type_key() {
        let enc = Encumbrance {
            kind: "Loan".into(),
            details: "Bank of Maharashtra".into(),
            mutation_entry_number: None,
        };
        let value = serde_json::to_value(&enc).unwrap();
        assert_eq!(value["type"], "Loan");
        assert_eq!(value["mutationEntryNumber"], Value::Null);
    }

    #[test]
    fn test_stored_record_is_flat() {
        let record = StoredRecord {
            id: RecordId::from_bytes([7; 16]),
            file_name: Some("712.png".into()),
            extraction_timestamp: 1_700_000_000,
            data: SatBaraData {
                district: Some("Pune".into()),
                ..Default::default()
            },
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["fileName"], "712.png");
        assert_eq!(value["district"], "Pune");
        assert_eq!(value["extractionTimestamp"], 1_700_000_000u64);
        assert_eq!(value["occupantDetails"], json!([]));
    }

    #[test]
    fn test_record_deserializes_with_missing_collections() {
        let data: SatBaraData = serde_json::from_value(json!({
            "villageName": "Wadgaon"
        }))
        .unwrap();
        assert_eq!(data.village_name.as_deref(), Some("Wadgaon"));
        assert!(data.occupant_details.is_empty());
        assert!(data.mutation_entries.is_empty());
    }
}
