//! Handler layer between the menu loop and the API client
//!
//! One async function per user action. Each action is a single
//! request/response round trip (or a cascade of them) followed by
//! view mutation and, on failure, a user-facing notice. Failures of
//! sub-requests in a cascade notify independently and do not roll
//! back sibling successes.

use futures::future;
use tracing::debug;

use crate::api::HospitalClient;
use crate::models::{
    id_from_href, Medicament, MedicamentPayload, NursePayload, Patient, PatientPayload,
};
use crate::ui::view::ConsoleView;

/// Re-fetch the nurse list. The list and the detail panel are
/// cleared up front, so a failed fetch leaves an empty list behind.
pub async fn refresh_nurse_list(client: &HospitalClient, view: &mut ConsoleView) {
    view.nurse_list.clear();
    view.deselect();
    view.clear_nurse_info();

    match client.nurses_list().await {
        Ok(nurses) => {
            for nurse in &nurses {
                view.append_nurse(&nurse.link.href, Some(nurse.id()), Some(&nurse.name));
            }
        }
        Err(error) => {
            debug!(%error, "nurse list fetch failed");
            view.alert("Could not fetch the list of nurses. Please, try again");
        }
    }
}

/// Select a nurse from the list: fetch her profile, populate the
/// detail panel, then cascade into her patients and their
/// medications. On profile failure the selection is reverted and the
/// panel stays hidden.
pub async fn select_nurse(client: &HospitalClient, view: &mut ConsoleView, index: usize) {
    let Some(entry) = view.nurse_list.get(index) else {
        return;
    };
    let href = entry.href.clone();
    view.selected = Some(index);
    view.clear_nurse_info();

    match client.nurse(&href).await {
        Ok(envelope) => {
            view.set_detail(&href, &envelope.nurse);
            let patients_href = envelope.nurse.link.href.clone();
            load_patients(client, view, &patients_href).await;
        }
        Err(error) => {
            debug!(%error, "nurse detail fetch failed");
            view.alert("Cannot extract information about this nurse from the hospital service.");
            view.deselect();
            view.clear_nurse_info();
        }
    }
}

/// Re-run the selection for the currently selected nurse so the
/// panel reflects authoritative server state.
pub async fn reload_nurse_data(client: &HospitalClient, view: &mut ConsoleView) {
    let Some(index) = view.selected else {
        return;
    };
    select_nurse(client, view, index).await;
}

/// Create a nurse from form input. On success the new entry is
/// appended using the server-returned location and selected, like
/// the original's synthetic click on the fresh list item.
pub async fn create_nurse(client: &HospitalClient, view: &mut ConsoleView, payload: NursePayload) {
    match client.create_nurse(&payload).await {
        Ok(location) => {
            view.alert("Nurse successfully added");
            let index = view.append_nurse(&location, None, payload.name.as_deref());
            select_nurse(client, view, index).await;
        }
        Err(error) => {
            debug!(%error, "nurse creation failed");
            view.alert("Could not create new nurse");
        }
    }
}

/// Send the changed (non-empty) profile fields of the selected
/// nurse. A failed edit reloads the nurse so the panel does not keep
/// unsaved values.
pub async fn edit_nurse(client: &HospitalClient, view: &mut ConsoleView, payload: NursePayload) {
    let Some(href) = view.detail.as_ref().map(|d| d.nurse_href.clone()) else {
        return;
    };
    match client.update_nurse(&href, &payload).await {
        Ok(()) => view.alert("Nurse's profile successfully edited"),
        Err(error) => {
            debug!(%error, "nurse edit failed");
            view.alert("Could not edit the nurse's profile");
            reload_nurse_data(client, view).await;
        }
    }
}

/// Delete the selected nurse and, on success, re-fetch the owning
/// list.
pub async fn delete_nurse(client: &HospitalClient, view: &mut ConsoleView) {
    let Some(href) = view.detail.as_ref().map(|d| d.nurse_href.clone()) else {
        return;
    };
    match client.delete_nurse(&href).await {
        Ok(()) => {
            view.alert("The nurse has been deleted from the database");
            refresh_nurse_list(client, view).await;
        }
        Err(error) => {
            debug!(%error, "nurse deletion failed");
            view.alert("The nurse could not be deleted from the database");
        }
    }
}

/// Send the changed (non-empty) fields of a patient, then reload the
/// nurse's data so the cards reflect the server.
pub async fn edit_patient(
    client: &HospitalClient,
    view: &mut ConsoleView,
    patient_href: &str,
    payload: PatientPayload,
) {
    match client.update_patient(patient_href, &payload).await {
        Ok(()) => {
            view.alert("Patient's profile successfully edited");
            reload_nurse_data(client, view).await;
        }
        Err(error) => {
            debug!(%error, "patient edit failed");
            view.alert("Could not edit the patient's profile");
        }
    }
}

/// Delete a patient and, on success, reload the selected nurse's
/// data.
pub async fn delete_patient(client: &HospitalClient, view: &mut ConsoleView, patient_href: &str) {
    match client.delete_patient(patient_href).await {
        Ok(()) => {
            view.alert("The patient was deleted successfully");
            reload_nurse_data(client, view).await;
        }
        Err(error) => {
            debug!(%error, "patient deletion failed");
            view.alert("Could not delete the patient");
        }
    }
}

/// Create a medicament for one of the selected nurse's patients. The
/// request goes to that patient's own medication-list href and
/// carries the patient's id, which the server requires. On success
/// the created medicament is fetched via the returned location and
/// appended to the panel.
pub async fn add_medicament(
    client: &HospitalClient,
    view: &mut ConsoleView,
    patient_href: &str,
    payload: MedicamentPayload,
) {
    let Some(card) = view
        .detail
        .as_ref()
        .and_then(|d| d.patients.iter().find(|p| p.href == patient_href))
        .cloned()
    else {
        return;
    };

    let payload = payload.with_patient(id_from_href(&card.href));
    match client.create_medicament(&card.medication_href, &payload).await {
        Ok(location) => {
            view.alert("Medicament successfully added");
            match client.medicament(&location).await {
                Ok(envelope) => view.append_medicament(&location, &envelope.medicament, &card),
                Err(error) => {
                    debug!(%error, "medicament detail fetch failed");
                    view.alert(format!("Cannot get information from medicament: {location}"));
                }
            }
        }
        Err(error) => {
            debug!(%error, "medicament creation failed");
            view.alert("Could not create new medicament");
        }
    }
}

/// Send the changed (non-empty) fields of a medicament, then reload
/// the nurse's data.
pub async fn edit_medicament(
    client: &HospitalClient,
    view: &mut ConsoleView,
    medicament_href: &str,
    payload: MedicamentPayload,
) {
    match client.update_medicament(medicament_href, &payload).await {
        Ok(()) => {
            view.alert("Medicament successfully edited");
            reload_nurse_data(client, view).await;
        }
        Err(error) => {
            debug!(%error, "medicament edit failed");
            view.alert("Could not edit the medicament");
        }
    }
}

/// Delete a medicament and, on success, reload the selected nurse's
/// data.
pub async fn delete_medicament(
    client: &HospitalClient,
    view: &mut ConsoleView,
    medicament_href: &str,
) {
    match client.delete_medicament(medicament_href).await {
        Ok(()) => {
            view.alert("The medicament was deleted successfully");
            reload_nurse_data(client, view).await;
        }
        Err(error) => {
            debug!(%error, "medicament deletion failed");
            view.alert("Could not delete the medicament");
        }
    }
}

/// Everything one patient contributes to the detail panel, gathered
/// concurrently with the other patients of the same nurse.
#[derive(Default)]
struct PatientLoad {
    patient: Option<(String, Patient)>,
    medicaments: Vec<(String, Medicament)>,
    notices: Vec<String>,
}

async fn load_patients(client: &HospitalClient, view: &mut ConsoleView, patients_href: &str) {
    match client.nurse_patients(patients_href).await {
        Ok(envelope) => {
            if let Some(detail) = view.detail.as_mut() {
                detail.patient_count = envelope.nurses_patient_list.len();
            }

            // Fan out: every patient's detail and medication chain is
            // fetched without waiting on its siblings.
            let loads = envelope
                .nurses_patient_list
                .iter()
                .map(|summary| load_patient(client, summary.link.href.clone()));

            for load in future::join_all(loads).await {
                for notice in load.notices {
                    view.alert(notice);
                }
                if let Some((href, patient)) = load.patient {
                    view.append_patient(&href, &patient);
                    let card = view
                        .detail
                        .as_ref()
                        .and_then(|d| d.patients.last())
                        .cloned();
                    if let Some(card) = card {
                        for (medicament_href, medicament) in &load.medicaments {
                            view.append_medicament(medicament_href, medicament, &card);
                        }
                    }
                }
            }
        }
        Err(error) => {
            debug!(%error, "patient list fetch failed");
            view.alert("Could not fetch the nurse's patients list. Please, try again");
        }
    }
}

async fn load_patient(client: &HospitalClient, href: String) -> PatientLoad {
    let mut load = PatientLoad::default();

    let patient = match client.patient(&href).await {
        Ok(envelope) => envelope.patient,
        Err(error) => {
            debug!(%error, "patient detail fetch failed");
            load.notices
                .push(format!("Cannot get information from patient: {href}"));
            return load;
        }
    };

    let medication_href = patient.link.href.clone();
    load.patient = Some((href, patient));

    match client.patient_medication(&medication_href).await {
        Ok(envelope) => {
            let fetches = envelope.patient_medication_list.iter().map(|entry| {
                let medicament_href = entry.link.href.clone();
                async move {
                    let result = client.medicament(&medicament_href).await;
                    (medicament_href, result)
                }
            });

            for (medicament_href, result) in future::join_all(fetches).await {
                match result {
                    Ok(envelope) => load.medicaments.push((medicament_href, envelope.medicament)),
                    Err(error) => {
                        debug!(%error, "medicament detail fetch failed");
                        load.notices.push(format!(
                            "Cannot get information from medicament: {medicament_href}"
                        ));
                    }
                }
            }
        }
        Err(error) => {
            debug!(%error, "medication list fetch failed");
            load.notices
                .push("Could not fetch the patient medication list. Please, try again".to_string());
        }
    }

    load
}
