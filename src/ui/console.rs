//! Interactive menu loop
//!
//! Drives the view through the action layer with inquire prompts.
//! Form prompts accept empty input, which omits the field from the
//! outgoing payload.

use anyhow::Result;
use inquire::{Confirm, InquireError, Select, Text};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::api::HospitalClient;
use crate::models::{MedicamentPayload, NursePayload, PatientPayload};
use crate::ui::actions;
use crate::ui::view::{ConsoleView, MedicamentCard, PatientCard};

pub struct Console {
    client: HospitalClient,
    view: ConsoleView,
}

#[derive(Display, EnumIter)]
enum MainChoice {
    #[strum(to_string = "Refresh the nurse list")]
    RefreshList,
    #[strum(to_string = "Select a nurse")]
    SelectNurse,
    #[strum(to_string = "Add a nurse")]
    AddNurse,
    #[strum(to_string = "Quit")]
    Quit,
}

#[derive(Display, EnumIter)]
enum NurseChoice {
    #[strum(to_string = "Edit the nurse's profile")]
    EditProfile,
    #[strum(to_string = "Delete this nurse")]
    DeleteNurse,
    #[strum(to_string = "Edit a patient")]
    EditPatient,
    #[strum(to_string = "Delete a patient")]
    DeletePatient,
    #[strum(to_string = "Add a medicament")]
    AddMedicament,
    #[strum(to_string = "Edit a medicament")]
    EditMedicament,
    #[strum(to_string = "Delete a medicament")]
    DeleteMedicament,
    #[strum(to_string = "Back to the nurse list")]
    Back,
}

impl Console {
    pub fn new(client: HospitalClient) -> Self {
        Self {
            client,
            view: ConsoleView::new(),
        }
    }

    /// Fetch the initial nurse list and enter the main menu.
    pub async fn run(&mut self) -> Result<()> {
        println!("Welcome to the hospital admin console.");
        actions::refresh_nurse_list(&self.client, &mut self.view).await;
        self.flush_notices();

        loop {
            self.view.render_nurse_list();
            match Select::new("What would you like to do?", MainChoice::iter().collect())
                .prompt()?
            {
                MainChoice::RefreshList => {
                    actions::refresh_nurse_list(&self.client, &mut self.view).await;
                }
                MainChoice::SelectNurse => {
                    if let Some(index) = self.pick_nurse()? {
                        actions::select_nurse(&self.client, &mut self.view, index).await;
                        self.flush_notices();
                        self.nurse_menu().await?;
                    }
                }
                MainChoice::AddNurse => {
                    let payload = prompt_nurse_form("", "", "", "")?;
                    actions::create_nurse(&self.client, &mut self.view, payload).await;
                    self.flush_notices();
                    if self.view.detail.is_some() {
                        self.nurse_menu().await?;
                    }
                }
                MainChoice::Quit => break,
            }
            self.flush_notices();
        }
        Ok(())
    }

    /// Menu for the selected nurse. Exits when the operator goes
    /// back or the detail panel disappears (nurse deleted, or her
    /// data could no longer be loaded).
    async fn nurse_menu(&mut self) -> Result<()> {
        loop {
            if self.view.detail.is_none() {
                return Ok(());
            }
            self.view.render_detail();
            match Select::new("What would you like to do?", NurseChoice::iter().collect())
                .prompt()?
            {
                NurseChoice::EditProfile => {
                    let initial = self.view.detail.as_ref().map(|d| {
                        (
                            d.name.clone(),
                            d.surname.clone(),
                            d.phone_number.clone(),
                            d.address.clone(),
                        )
                    });
                    let Some((name, surname, phone_number, address)) = initial else {
                        return Ok(());
                    };
                    let payload = prompt_nurse_form(&name, &surname, &phone_number, &address)?;
                    actions::edit_nurse(&self.client, &mut self.view, payload).await;
                }
                NurseChoice::DeleteNurse => {
                    if Confirm::new("Really delete this nurse?")
                        .with_default(false)
                        .prompt()?
                    {
                        actions::delete_nurse(&self.client, &mut self.view).await;
                    }
                }
                NurseChoice::EditPatient => {
                    if let Some(patient) = self.pick_patient()? {
                        let payload =
                            prompt_patient_form(&patient.name, &patient.surname, &patient.room)?;
                        actions::edit_patient(&self.client, &mut self.view, &patient.href, payload)
                            .await;
                    }
                }
                NurseChoice::DeletePatient => {
                    if let Some(patient) = self.pick_patient()? {
                        if Confirm::new("Really delete this patient?")
                            .with_default(false)
                            .prompt()?
                        {
                            actions::delete_patient(&self.client, &mut self.view, &patient.href)
                                .await;
                        }
                    }
                }
                NurseChoice::AddMedicament => {
                    if let Some(patient) = self.pick_patient()? {
                        let payload = prompt_medicament_form(None)?;
                        actions::add_medicament(
                            &self.client,
                            &mut self.view,
                            &patient.href,
                            payload,
                        )
                        .await;
                    }
                }
                NurseChoice::EditMedicament => {
                    if let Some(medicament) = self.pick_medicament()? {
                        let payload = prompt_medicament_form(Some(&medicament))?;
                        actions::edit_medicament(
                            &self.client,
                            &mut self.view,
                            &medicament.href,
                            payload,
                        )
                        .await;
                    }
                }
                NurseChoice::DeleteMedicament => {
                    if let Some(medicament) = self.pick_medicament()? {
                        if Confirm::new("Really delete this medicament?")
                            .with_default(false)
                            .prompt()?
                        {
                            actions::delete_medicament(
                                &self.client,
                                &mut self.view,
                                &medicament.href,
                            )
                            .await;
                        }
                    }
                }
                NurseChoice::Back => return Ok(()),
            }
            self.flush_notices();
        }
    }

    fn pick_nurse(&self) -> Result<Option<usize>> {
        if self.view.nurse_list.is_empty() {
            println!("[*] There are no nurses in the list");
            return Ok(None);
        }
        let labels: Vec<String> = self
            .view
            .nurse_list
            .iter()
            .map(|entry| format!("{} [{}]", entry.label, entry.id))
            .collect();
        let choice = raw_select_skippable(Select::new("Choose a nurse:", labels))?;
        Ok(choice.map(|option| option.index))
    }

    fn pick_patient(&self) -> Result<Option<PatientCard>> {
        let patients = self
            .view
            .detail
            .as_ref()
            .map(|d| d.patients.clone())
            .unwrap_or_default();
        if patients.is_empty() {
            println!("[*] There are no patients for this nurse");
            return Ok(None);
        }
        let labels: Vec<String> = patients
            .iter()
            .map(|p| format!("{} {} (room {})", p.name, p.surname, p.room))
            .collect();
        let choice = raw_select_skippable(Select::new("Choose a patient:", labels))?;
        Ok(choice.and_then(|option| patients.get(option.index).cloned()))
    }

    fn pick_medicament(&self) -> Result<Option<MedicamentCard>> {
        let medicaments = self
            .view
            .detail
            .as_ref()
            .map(|d| d.medicaments.clone())
            .unwrap_or_default();
        if medicaments.is_empty() {
            println!("[*] There are no medicaments in this nurse's lists");
            return Ok(None);
        }
        let labels: Vec<String> = medicaments
            .iter()
            .map(|m| {
                format!(
                    "{} for {} {} (room {})",
                    m.name, m.patient_name, m.patient_surname, m.patient_room
                )
            })
            .collect();
        let choice = raw_select_skippable(Select::new("Choose a medicament:", labels))?;
        Ok(choice.and_then(|option| medicaments.get(option.index).cloned()))
    }

    fn flush_notices(&mut self) {
        for notice in self.view.drain_notices() {
            println!("[*] {notice}");
        }
    }
}

fn raw_select_skippable<T: std::fmt::Display>(
    select: Select<T>,
) -> Result<Option<inquire::list_option::ListOption<T>>, InquireError> {
    match select.raw_prompt() {
        Ok(option) => Ok(Some(option)),
        Err(InquireError::OperationCanceled) => Ok(None),
        Err(err) => Err(err),
    }
}

fn form_field(prompt: &str, initial: &str) -> Result<String, InquireError> {
    Text::new(prompt).with_initial_value(initial).prompt()
}

fn prompt_nurse_form(
    name: &str,
    surname: &str,
    phone_number: &str,
    address: &str,
) -> Result<NursePayload> {
    let name = form_field("Name:", name)?;
    let surname = form_field("Surname:", surname)?;
    let phone_number = form_field("Phone number:", phone_number)?;
    let address = form_field("Address:", address)?;
    Ok(NursePayload::from_form(
        &name,
        &surname,
        &phone_number,
        &address,
    ))
}

fn prompt_patient_form(name: &str, surname: &str, room: &str) -> Result<PatientPayload> {
    let name = form_field("Name:", name)?;
    let surname = form_field("Surname:", surname)?;
    let room = form_field("Room:", room)?;
    let phone_number = form_field("Phone number:", "")?;
    let address = form_field("Address:", "")?;
    Ok(PatientPayload::from_form(
        &name,
        &surname,
        &room,
        &phone_number,
        &address,
    ))
}

fn prompt_medicament_form(initial: Option<&MedicamentCard>) -> Result<MedicamentPayload> {
    let name = form_field("Name:", initial.map(|m| m.name.as_str()).unwrap_or(""))?;
    let dosage = form_field("Dosage:", initial.map(|m| m.dosage.as_str()).unwrap_or(""))?;
    let duration = form_field(
        "Duration:",
        initial.map(|m| m.duration.as_str()).unwrap_or(""),
    )?;
    let hours = form_field("Hours:", initial.map(|m| m.hours.as_str()).unwrap_or(""))?;
    let bag_volume = form_field(
        "Bag volume:",
        initial.map(|m| m.bag_volume.as_str()).unwrap_or(""),
    )?;
    let administration = form_field(
        "Administration route:",
        initial.map(|m| m.administration.as_str()).unwrap_or(""),
    )?;
    Ok(MedicamentPayload::from_form(
        &name,
        &dosage,
        &duration,
        &hours,
        &bag_volume,
        &administration,
    ))
}
