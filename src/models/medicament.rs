use serde::{Deserialize, Serialize};

use super::{non_empty, Link};

/// One entry of a patient's `patient_medication_list` envelope. Only
/// the name and the detail link are listed; everything else requires
/// a follow-up fetch.
#[derive(Debug, Clone, Deserialize)]
pub struct MedicationRef {
    pub name: String,
    pub link: Link,
}

/// `{ "patient_medication_list": [...], "link": {...} }`
#[derive(Debug, Clone, Deserialize)]
pub struct MedicationListEnvelope {
    pub patient_medication_list: Vec<MedicationRef>,
    #[serde(default)]
    pub link: Option<Link>,
}

/// Medicament detail as returned under the `medicament` envelope
/// key. `"patient id"` is the back-link to the owning patient.
#[derive(Debug, Clone, Deserialize)]
pub struct Medicament {
    pub name: String,
    pub dosage: String,
    pub duration: String,
    pub hours: String,
    #[serde(rename = "bag volume")]
    pub bag_volume: String,
    pub administration: String,
    #[serde(rename = "patient id", default)]
    pub patient_id: Option<String>,
}

/// `{ "medicament": {...}, "link": {...} }`
#[derive(Debug, Clone, Deserialize)]
pub struct MedicamentEnvelope {
    pub medicament: Medicament,
    #[serde(default)]
    pub link: Option<Link>,
}

/// Outgoing medicament payload. Only filled fields are serialized;
/// creation additionally requires the owning patient's id under the
/// `patientid` key.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MedicamentPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bag_volume: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub administration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patientid: Option<String>,
}

impl MedicamentPayload {
    pub fn from_form(
        name: &str,
        dosage: &str,
        duration: &str,
        hours: &str,
        bag_volume: &str,
        administration: &str,
    ) -> Self {
        Self {
            name: non_empty(name),
            dosage: non_empty(dosage),
            duration: non_empty(duration),
            hours: non_empty(hours),
            bag_volume: non_empty(bag_volume),
            administration: non_empty(administration),
            patientid: None,
        }
    }

    /// Attach the owning patient's id, required by the server on
    /// creation.
    pub fn with_patient(mut self, patient_id: String) -> Self {
        self.patientid = Some(patient_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detail_reads_spaced_bag_volume_key() {
        let envelope: MedicamentEnvelope = serde_json::from_value(json!({
            "medicament": {
                "name": "Paracetamol",
                "dosage": "1gr",
                "duration": "1 week",
                "hours": "every 8 hours",
                "bag volume": "100 ml",
                "administration": "intravenous",
                "patient id": "pat-1"
            },
            "link": {"title": "medication list", "rel": "related",
                     "href": "/hospital/api/nurses/nur-0/patients/pat-1/medication/"}
        }))
        .unwrap();

        let medicament = envelope.medicament;
        assert_eq!(medicament.bag_volume, "100 ml");
        assert_eq!(medicament.patient_id.as_deref(), Some("pat-1"));
    }

    #[test]
    fn list_envelope_parses_refs() {
        let envelope: MedicationListEnvelope = serde_json::from_value(json!({
            "patient_medication_list": [
                {"name": "Paracetamol",
                 "link": {"rel": "self",
                          "href": "/hospital/api/nurses/nur-0/patients/pat-1/medication/med-0/"}},
                {"name": "Betadine",
                 "link": {"rel": "self",
                          "href": "/hospital/api/nurses/nur-0/patients/pat-1/medication/med-1/"}}
            ]
        }))
        .unwrap();
        assert_eq!(envelope.patient_medication_list.len(), 2);
    }

    #[test]
    fn creation_payload_carries_patient_id() {
        let payload = MedicamentPayload::from_form(
            "Betadine",
            "20ml",
            "2 days",
            "every 6 hours",
            "",
            "cutaneous",
        )
        .with_patient("pat-1".to_string());

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "name": "Betadine",
                "dosage": "20ml",
                "duration": "2 days",
                "hours": "every 6 hours",
                "administration": "cutaneous",
                "patientid": "pat-1"
            })
        );
    }
}
