//! Rendered console state
//!
//! The browser original kept all of this in the page DOM; here it is
//! held explicitly and re-rendered after each action. Panel
//! visibility maps to `Option` presence, and user-facing notices
//! (the original's alert dialogs) are buffered until the menu loop
//! drains them.

use crate::models::{id_from_href, Medicament, Nurse, Patient};

#[derive(Debug, Default)]
pub struct ConsoleView {
    pub nurse_list: Vec<NurseEntry>,
    pub selected: Option<usize>,
    pub detail: Option<NurseDetail>,
    notices: Vec<String>,
}

/// One line of the nurse list panel.
#[derive(Debug, Clone)]
pub struct NurseEntry {
    pub id: String,
    pub label: String,
    pub href: String,
}

/// The detail panel for the selected nurse: her profile form fields
/// plus the cascaded patient and medicament cards.
#[derive(Debug, Default)]
pub struct NurseDetail {
    pub nurse_href: String,
    pub name: String,
    pub surname: String,
    pub phone_number: String,
    pub address: String,
    pub patients_href: String,
    pub patient_count: usize,
    pub patients: Vec<PatientCard>,
    pub medicament_count: usize,
    pub medicaments: Vec<MedicamentCard>,
}

#[derive(Debug, Clone)]
pub struct PatientCard {
    pub href: String,
    pub name: String,
    pub surname: String,
    pub room: String,
    pub medication_href: String,
}

#[derive(Debug, Clone)]
pub struct MedicamentCard {
    pub href: String,
    pub name: String,
    pub dosage: String,
    pub duration: String,
    pub hours: String,
    pub bag_volume: String,
    pub administration: String,
    pub patient_name: String,
    pub patient_surname: String,
    pub patient_room: String,
    pub patient_href: String,
    pub nurse_href: String,
}

impl ConsoleView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a nurse entry. When the caller only has an href (the
    /// Location of a freshly created nurse) the id is derived from
    /// its trailing segment and doubles as the label.
    pub fn append_nurse(&mut self, href: &str, id: Option<String>, name: Option<&str>) -> usize {
        let id = id.unwrap_or_else(|| id_from_href(href));
        let label = name.map(str::to_string).unwrap_or_else(|| id.clone());
        self.nurse_list.push(NurseEntry {
            id,
            label,
            href: href.to_string(),
        });
        self.nurse_list.len() - 1
    }

    /// Populate the detail panel from a nurse detail response,
    /// making the panel visible.
    pub fn set_detail(&mut self, nurse_href: &str, nurse: &Nurse) {
        self.detail = Some(NurseDetail {
            nurse_href: nurse_href.to_string(),
            name: nurse.name.clone(),
            surname: nurse.surname.clone(),
            phone_number: nurse.phone_number.clone().unwrap_or_default(),
            address: nurse.address.clone().unwrap_or_default(),
            patients_href: nurse.link.href.clone(),
            patient_count: 0,
            patients: Vec::new(),
            medicament_count: 0,
            medicaments: Vec::new(),
        });
    }

    pub fn append_patient(&mut self, href: &str, patient: &Patient) {
        if let Some(detail) = self.detail.as_mut() {
            detail.patients.push(PatientCard {
                href: href.to_string(),
                name: patient.name.clone(),
                surname: patient.surname.clone(),
                room: patient.room.clone(),
                medication_href: patient.link.href.clone(),
            });
        }
    }

    pub fn append_medicament(
        &mut self,
        href: &str,
        medicament: &Medicament,
        patient: &PatientCard,
    ) {
        if let Some(detail) = self.detail.as_mut() {
            let nurse_href = detail.nurse_href.clone();
            detail.medicaments.push(MedicamentCard {
                href: href.to_string(),
                name: medicament.name.clone(),
                dosage: medicament.dosage.clone(),
                duration: medicament.duration.clone(),
                hours: medicament.hours.clone(),
                bag_volume: medicament.bag_volume.clone(),
                administration: medicament.administration.clone(),
                patient_name: patient.name.clone(),
                patient_surname: patient.surname.clone(),
                patient_room: patient.room.clone(),
                patient_href: patient.href.clone(),
                nurse_href,
            });
            detail.medicament_count = detail.medicaments.len();
        }
    }

    /// Clear the detail panel, hiding it. The nurse list itself is
    /// untouched.
    pub fn clear_nurse_info(&mut self) {
        self.detail = None;
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Buffer a user-facing notice. The menu loop prints buffered
    /// notices after the action that produced them finishes, so a
    /// partially failed fan-out reports every failure exactly once.
    pub fn alert(&mut self, message: impl Into<String>) {
        self.notices.push(message.into());
    }

    pub fn drain_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    pub fn render_nurse_list(&self) {
        println!();
        println!("Nurses ({})", self.nurse_list.len());
        for (index, entry) in self.nurse_list.iter().enumerate() {
            let marker = if self.selected == Some(index) { ">" } else { " " };
            println!("{marker} {} [{}]", entry.label, entry.id);
        }
    }

    pub fn render_detail(&self) {
        let Some(detail) = &self.detail else {
            return;
        };
        println!();
        println!("Nurse: {} {}", detail.name, detail.surname);
        println!("  Phone:   {}", detail.phone_number);
        println!("  Address: {}", detail.address);
        println!();
        println!("Patients ({})", detail.patient_count);
        for patient in &detail.patients {
            println!(
                "  {} {} (room {})",
                patient.name, patient.surname, patient.room
            );
        }
        println!();
        println!("Medication ({})", detail.medicament_count);
        for medicament in &detail.medicaments {
            println!(
                "  {} for {} {} (room {}): {} during {} {}, {} via {}",
                medicament.name,
                medicament.patient_name,
                medicament.patient_surname,
                medicament.patient_room,
                medicament.dosage,
                medicament.duration,
                medicament.hours,
                medicament.bag_volume,
                medicament.administration
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Link;

    fn nurse() -> Nurse {
        Nurse {
            name: "Mateo".into(),
            surname: "Gil".into(),
            phone_number: Some("987654321".into()),
            address: None,
            link: Link {
                title: Some("patient list".into()),
                rel: "related".into(),
                href: "/hospital/api/nurses/nur-0/patients/".into(),
            },
        }
    }

    #[test]
    fn append_nurse_derives_id_and_label_from_href() {
        let mut view = ConsoleView::new();
        let index = view.append_nurse("/hospital/api/nurses/nur-2/", None, None);
        assert_eq!(index, 0);
        assert_eq!(view.nurse_list[0].id, "nur-2");
        assert_eq!(view.nurse_list[0].label, "nur-2");

        view.append_nurse("/hospital/api/nurses/nur-3/", None, Some("Jussi"));
        assert_eq!(view.nurse_list[1].label, "Jussi");
    }

    #[test]
    fn set_detail_snapshots_form_fields() {
        let mut view = ConsoleView::new();
        view.set_detail("/hospital/api/nurses/nur-0/", &nurse());

        let detail = view.detail.as_ref().unwrap();
        assert_eq!(detail.name, "Mateo");
        assert_eq!(detail.phone_number, "987654321");
        assert_eq!(detail.address, "");
        assert_eq!(detail.patients_href, "/hospital/api/nurses/nur-0/patients/");
    }

    #[test]
    fn clear_nurse_info_hides_detail_panel() {
        let mut view = ConsoleView::new();
        view.set_detail("/hospital/api/nurses/nur-0/", &nurse());
        view.clear_nurse_info();
        assert!(view.detail.is_none());
    }

    #[test]
    fn notices_drain_once() {
        let mut view = ConsoleView::new();
        view.alert("Could not create new nurse");
        view.alert("Nurse successfully added");
        assert_eq!(view.drain_notices().len(), 2);
        assert!(view.drain_notices().is_empty());
    }
}
