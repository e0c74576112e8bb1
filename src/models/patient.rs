use serde::{Deserialize, Serialize};

use super::{non_empty, opt_string_or_number, string_or_number, Link};

/// One entry of a nurse's `nurses_patient_list` envelope. The link
/// points at the patient's detail resource.
#[derive(Debug, Clone, Deserialize)]
pub struct PatientSummary {
    pub name: String,
    pub surname: String,
    #[serde(deserialize_with = "string_or_number")]
    pub room: String,
    #[serde(rename = "doctor id", default)]
    pub doctor_id: Option<String>,
    pub link: Link,
}

/// `{ "nurses_patient_list": [...], "link": {...} }`
#[derive(Debug, Clone, Deserialize)]
pub struct PatientListEnvelope {
    pub nurses_patient_list: Vec<PatientSummary>,
    #[serde(default)]
    pub link: Option<Link>,
}

/// Patient detail as returned under the `patient` envelope key. The
/// embedded link leads to this patient's medication list; the
/// `"nurse id"` and `"doctor id"` keys are back-links to owning
/// staff records.
#[derive(Debug, Clone, Deserialize)]
pub struct Patient {
    pub name: String,
    pub surname: String,
    #[serde(deserialize_with = "string_or_number")]
    pub room: String,
    #[serde(
        rename = "phone number",
        default,
        deserialize_with = "opt_string_or_number"
    )]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(rename = "nurse id", default)]
    pub nurse_id: Option<String>,
    #[serde(rename = "doctor id", default)]
    pub doctor_id: Option<String>,
    pub link: Link,
}

/// `{ "patient": {...}, "link": {...} }`
#[derive(Debug, Clone, Deserialize)]
pub struct PatientEnvelope {
    pub patient: Patient,
    #[serde(default)]
    pub link: Option<Link>,
}

/// Outgoing patient payload for update. Only filled fields are
/// serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatientPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl PatientPayload {
    pub fn from_form(
        name: &str,
        surname: &str,
        room: &str,
        phone_number: &str,
        address: &str,
    ) -> Self {
        Self {
            name: non_empty(name),
            surname: non_empty(surname),
            room: non_empty(room),
            phone_number: non_empty(phone_number),
            address: non_empty(address),
        }
    }
}
