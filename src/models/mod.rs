//! Typed mirrors of the API's JSON envelopes
//!
//! Resources are consumed as the server shapes them and never
//! mutated locally. Response keys are not uniform: detail responses
//! use space-separated keys (`"phone number"`, `"bag volume"`) while
//! request payloads use underscored ones, and a few numeric fields
//! arrive either as numbers or strings depending on how the record
//! was last written.

pub mod medicament;
pub mod nurse;
pub mod patient;

pub use medicament::{
    Medicament, MedicamentEnvelope, MedicamentPayload, MedicationListEnvelope, MedicationRef,
};
pub use nurse::{Nurse, NurseEnvelope, NurseListEnvelope, NursePayload, NurseSummary};
pub use patient::{Patient, PatientEnvelope, PatientListEnvelope, PatientPayload, PatientSummary};

use serde::{Deserialize, Deserializer};

/// Hypermedia link supplied by the server. `href` is a
/// server-relative path and must be resolved against the configured
/// base URL before use.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Link {
    #[serde(default)]
    pub title: Option<String>,
    pub rel: String,
    pub href: String,
}

/// Trailing path segment of a resource href, e.g.
/// `/hospital/api/nurses/nur-1/` yields `nur-1`. Used when a
/// response omits an explicit identifier.
pub fn id_from_href(href: &str) -> String {
    href.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

/// Deserialize a field the server stores as either a JSON number or
/// a string into a `String`.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(StringOrNumber::deserialize(deserializer)?.into_string())
}

pub(crate) fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(StringOrNumber::into_string))
}

/// Form fields are only included in a payload when non-empty.
pub(crate) fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("/hospital/api/nurses/nur-1/", "nur-1"; "trailing slash")]
    #[test_case("/hospital/api/nurses/nur-1", "nur-1"; "no trailing slash")]
    #[test_case("/hospital/api/nurses/nur-0/patients/pat-1/", "pat-1"; "nested resource")]
    #[test_case("", ""; "empty href")]
    fn id_from_href_takes_last_segment(href: &str, expected: &str) {
        assert_eq!(id_from_href(href), expected);
    }

    #[test]
    fn link_deserializes_with_and_without_title() {
        let bare: Link = serde_json::from_str(r#"{"rel": "self", "href": "/x/"}"#).unwrap();
        assert_eq!(bare.title, None);
        assert_eq!(bare.href, "/x/");

        let titled: Link =
            serde_json::from_str(r#"{"title": "patient list", "rel": "related", "href": "/y/"}"#)
                .unwrap();
        assert_eq!(titled.title.as_deref(), Some("patient list"));
    }

    #[test]
    fn non_empty_drops_empty_fields() {
        assert_eq!(non_empty(""), None);
        assert_eq!(non_empty("1408"), Some("1408".to_string()));
    }
}
