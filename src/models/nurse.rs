use serde::{Deserialize, Serialize};

use super::{id_from_href, non_empty, opt_string_or_number, Link};

/// One entry of the `nurses_list` collection envelope. The link
/// points at the nurse's detail resource.
#[derive(Debug, Clone, Deserialize)]
pub struct NurseSummary {
    pub name: String,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub nurse_id: Option<String>,
    pub link: Link,
}

impl NurseSummary {
    /// Identifier of the nurse, falling back to the trailing segment
    /// of the detail href when the server omits `nurse_id`.
    pub fn id(&self) -> String {
        self.nurse_id
            .clone()
            .unwrap_or_else(|| id_from_href(&self.link.href))
    }
}

/// `{ "nurses_list": [...] }`
#[derive(Debug, Clone, Deserialize)]
pub struct NurseListEnvelope {
    pub nurses_list: Vec<NurseSummary>,
}

/// Nurse detail as returned under the `nurse` envelope key. The
/// embedded link leads to this nurse's patient list.
#[derive(Debug, Clone, Deserialize)]
pub struct Nurse {
    pub name: String,
    pub surname: String,
    #[serde(
        rename = "phone number",
        default,
        deserialize_with = "opt_string_or_number"
    )]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub link: Link,
}

/// `{ "nurse": {...}, "link": {...} }`
#[derive(Debug, Clone, Deserialize)]
pub struct NurseEnvelope {
    pub nurse: Nurse,
    #[serde(default)]
    pub link: Option<Link>,
}

/// Outgoing nurse payload for create and update. Only fields the
/// operator actually filled in are serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NursePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl NursePayload {
    pub fn from_form(name: &str, surname: &str, phone_number: &str, address: &str) -> Self {
        Self {
            name: non_empty(name),
            surname: non_empty(surname),
            phone_number: non_empty(phone_number),
            address: non_empty(address),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_envelope_parses_entries_in_order() {
        let envelope: NurseListEnvelope = serde_json::from_value(json!({
            "nurses_list": [
                {"name": "Mateo", "surname": "Gil",
                 "link": {"rel": "self", "href": "/hospital/api/nurses/nur-0/"}},
                {"name": "Jussi", "surname": "Hiltunen",
                 "link": {"rel": "self", "href": "/hospital/api/nurses/nur-1/"}}
            ]
        }))
        .unwrap();

        let names: Vec<_> = envelope.nurses_list.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["Mateo", "Jussi"]);
    }

    #[test]
    fn summary_id_falls_back_to_href_segment() {
        let summary: NurseSummary = serde_json::from_value(json!({
            "name": "Mateo",
            "link": {"rel": "self", "href": "/hospital/api/nurses/nur-0/"}
        }))
        .unwrap();
        assert_eq!(summary.id(), "nur-0");

        let with_id: NurseSummary = serde_json::from_value(json!({
            "name": "Mateo",
            "nurse_id": "nur-7",
            "link": {"rel": "self", "href": "/hospital/api/nurses/nur-0/"}
        }))
        .unwrap();
        assert_eq!(with_id.id(), "nur-7");
    }

    #[test]
    fn detail_reads_spaced_phone_key_as_number_or_string() {
        let numeric: Nurse = serde_json::from_value(json!({
            "name": "Mateo", "surname": "Gil",
            "phone number": 987654321,
            "address": "Bahia Pikachu N 4",
            "link": {"title": "patient list", "rel": "related",
                     "href": "/hospital/api/nurses/nur-0/patients/"}
        }))
        .unwrap();
        assert_eq!(numeric.phone_number.as_deref(), Some("987654321"));

        let textual: Nurse = serde_json::from_value(json!({
            "name": "Mateo", "surname": "Gil",
            "phone number": "987 654 321",
            "link": {"rel": "related", "href": "/hospital/api/nurses/nur-0/patients/"}
        }))
        .unwrap();
        assert_eq!(textual.phone_number.as_deref(), Some("987 654 321"));
        assert_eq!(textual.address, None);
    }

    #[test]
    fn payload_serializes_only_filled_fields() {
        let payload = NursePayload::from_form("Mateo", "", "", "");
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"name": "Mateo"})
        );

        let full = NursePayload::from_form("Mateo", "Gil", "987654321", "Bahia Pikachu N 4");
        assert_eq!(
            serde_json::to_value(&full).unwrap(),
            json!({
                "name": "Mateo",
                "surname": "Gil",
                "phone_number": "987654321",
                "address": "Bahia Pikachu N 4"
            })
        );
    }
}
