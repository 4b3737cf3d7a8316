use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient::{optional_string_or_number, string_or_number};

/// A medical center as returned by the directory's `/data` endpoint.
///
/// Field names follow the directory's JSON keys, and a `null` text field
/// reads as empty. Anything the directory sends beyond the known fields is
/// kept in `extra` so that a booking snapshot serializes back to the same
/// record it was built from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Center {
    #[serde(rename = "Hospital Name", default, deserialize_with = "string_or_number")]
    pub hospital_name: String,

    #[serde(rename = "Address", default, deserialize_with = "string_or_number")]
    pub address: String,

    #[serde(rename = "City", default, deserialize_with = "string_or_number")]
    pub city: String,

    #[serde(rename = "State", default, deserialize_with = "string_or_number")]
    pub state: String,

    #[serde(rename = "ZIP Code", default, deserialize_with = "string_or_number")]
    pub zip_code: String,

    #[serde(
        rename = "Hospital overall rating",
        default,
        deserialize_with = "optional_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub overall_rating: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Center {
    /// `Address, City, State ZIP` as shown under the hospital name.
    pub fn display_address(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.address, self.city, self.state, self.zip_code
        )
    }

    pub fn rating_label(&self) -> &str {
        match self.overall_rating.as_deref() {
            Some(rating) if !rating.is_empty() => rating,
            _ => "N/A",
        }
    }
}
