//! Patient form state shared by the add and detail pages.
//!
//! DESIGN
//! ======
//! Inputs are kept as typed text in a `PatientDraft`; conversion into wire
//! types happens once, on submit, so a half-typed number never reaches the
//! backend. `PatientFields` renders the inputs for both pages.

#[cfg(test)]
#[path = "patient_form_test.rs"]
mod patient_form_test;

use leptos::prelude::*;

use crate::net::types::{NewPatient, Patient, PatientUpdate, Vitals};

pub const GENDERS: [&str; 3] = ["male", "female", "other"];
pub const EDITABLE_STATUSES: [&str; 3] = ["active", "recovered", "critical"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("Please enter the patient's name")]
    MissingName,
    #[error("Please enter a valid age")]
    InvalidAge,
    #[error("Please select a gender")]
    MissingGender,
    #[error("Please enter a valid {0}")]
    InvalidVital(&'static str),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatientDraft {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub status: String,
    pub condition: String,
    pub diagnosis: String,
    pub treatment: String,
    pub medical_history: String,
    pub blood_pressure: String,
    pub heart_rate: String,
    pub temperature: String,
    pub oxygen_level: String,
}

impl Default for PatientDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: String::new(),
            gender: String::new(),
            status: EDITABLE_STATUSES[0].to_owned(),
            condition: String::new(),
            diagnosis: String::new(),
            treatment: String::new(),
            medical_history: String::new(),
            blood_pressure: String::new(),
            heart_rate: String::new(),
            temperature: String::new(),
            oxygen_level: String::new(),
        }
    }
}

impl PatientDraft {
    /// Prefill from a stored record for editing.
    #[must_use]
    pub fn from_patient(patient: &Patient) -> Self {
        let vitals = patient.vitals.clone().unwrap_or_default();
        Self {
            name: patient.name.clone(),
            age: patient.age.to_string(),
            gender: normalize_gender(&patient.gender),
            status: patient.status.clone(),
            condition: patient.condition.clone().unwrap_or_default(),
            diagnosis: patient.diagnosis.clone().unwrap_or_default(),
            treatment: patient.treatment.clone().unwrap_or_default(),
            medical_history: patient.medical_history.clone().unwrap_or_default(),
            blood_pressure: vitals.blood_pressure.unwrap_or_default(),
            heart_rate: vitals.heart_rate.map(|v| v.to_string()).unwrap_or_default(),
            temperature: vitals.temperature.map(|v| v.to_string()).unwrap_or_default(),
            oxygen_level: vitals.oxygen_level.map(|v| v.to_string()).unwrap_or_default(),
        }
    }

    fn personal(&self) -> Result<(String, u32, String), DraftError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DraftError::MissingName);
        }
        let age = self.age.trim().parse::<u32>().ok().filter(|a| *a <= 150).ok_or(DraftError::InvalidAge)?;
        let gender = self.gender.trim();
        if gender.is_empty() {
            return Err(DraftError::MissingGender);
        }
        Ok((name.to_owned(), age, gender.to_owned()))
    }

    /// Blank readings become `None`.
    ///
    /// # Errors
    ///
    /// `DraftError::InvalidVital` naming the first unparsable reading.
    pub fn vitals(&self) -> Result<Vitals, DraftError> {
        Ok(Vitals {
            blood_pressure: non_blank(&self.blood_pressure),
            heart_rate: parse_optional(&self.heart_rate, "heart rate")?,
            temperature: parse_optional(&self.temperature, "temperature")?,
            oxygen_level: parse_optional(&self.oxygen_level, "oxygen level")?,
        })
    }

    /// # Errors
    ///
    /// Returns a `DraftError` for missing personal fields or unparsable vitals.
    pub fn to_new_patient(&self) -> Result<NewPatient, DraftError> {
        let (name, age, gender) = self.personal()?;
        Ok(NewPatient {
            name,
            age,
            gender,
            condition: self.condition.trim().to_owned(),
            diagnosis: self.diagnosis.trim().to_owned(),
            treatment: self.treatment.trim().to_owned(),
            medical_history: self.medical_history.trim().to_owned(),
            vitals: self.vitals()?,
        })
    }

    /// Update body plus vitals, validated together so a bad reading blocks
    /// the whole save.
    ///
    /// # Errors
    ///
    /// Returns a `DraftError` for missing personal fields or unparsable vitals.
    pub fn to_update(&self) -> Result<(PatientUpdate, Vitals), DraftError> {
        let (name, age, gender) = self.personal()?;
        let update = PatientUpdate {
            name,
            age,
            gender,
            status: self.status.trim().to_owned(),
            condition: self.condition.trim().to_owned(),
            diagnosis: self.diagnosis.trim().to_owned(),
            treatment: self.treatment.trim().to_owned(),
            medical_history: self.medical_history.trim().to_owned(),
        };
        Ok((update, self.vitals()?))
    }
}

/// Known genders map onto the select's lowercase values; anything else is
/// kept verbatim.
fn normalize_gender(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    if GENDERS.contains(&lower.as_str()) { lower } else { raw.to_owned() }
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

fn parse_optional<T: std::str::FromStr>(raw: &str, what: &'static str) -> Result<Option<T>, DraftError> {
    non_blank(raw).map(|v| v.parse::<T>().map_err(|_| DraftError::InvalidVital(what))).transpose()
}

// =============================================================================
// VIEW
// =============================================================================

type Getter = fn(&PatientDraft) -> String;
type Setter = fn(&mut PatientDraft, String);

#[component]
fn DraftInput(
    draft: RwSignal<PatientDraft>,
    id: &'static str,
    label: &'static str,
    get: Getter,
    set: Setter,
    #[prop(default = "text")] kind: &'static str,
    #[prop(default = "")] placeholder: &'static str,
    #[prop(default = false)] required: bool,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label for=id>{label}</label>
            <input
                id=id
                type=kind
                placeholder=placeholder
                required=required
                prop:value=move || draft.with(get)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    draft.update(|d| set(d, value));
                }
            />
        </div>
    }
}

#[component]
fn DraftTextArea(
    draft: RwSignal<PatientDraft>,
    id: &'static str,
    label: &'static str,
    get: Getter,
    set: Setter,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label for=id>{label}</label>
            <textarea
                id=id
                rows="3"
                prop:value=move || draft.with(get)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    draft.update(|d| set(d, value));
                }
            ></textarea>
        </div>
    }
}

#[component]
fn DraftSelect(
    draft: RwSignal<PatientDraft>,
    id: &'static str,
    label: &'static str,
    options: &'static [&'static str],
    get: Getter,
    set: Setter,
    #[prop(optional)] placeholder: Option<&'static str>,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label for=id>{label}</label>
            <select
                id=id
                prop:value=move || draft.with(get)
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    draft.update(|d| set(d, value));
                }
            >
                {placeholder.map(|p| view! { <option value="">{p}</option> })}
                {options
                    .iter()
                    .map(|o| view! { <option value=*o>{crate::util::format::format_status(o)}</option> })
                    .collect_view()}
            </select>
        </div>
    }
}

/// Personal, medical and vitals inputs. `with_status` adds the status select
/// used when editing.
#[component]
pub fn PatientFields(draft: RwSignal<PatientDraft>, #[prop(default = false)] with_status: bool) -> impl IntoView {
    view! {
        <div class="form-section">
            <h2>"Personal Information"</h2>
            <DraftInput
                draft=draft
                id="name"
                label="Full Name"
                get=|d| d.name.clone()
                set=|d, v| d.name = v
                required=true
            />
            <DraftInput
                draft=draft
                id="age"
                label="Age"
                kind="number"
                get=|d| d.age.clone()
                set=|d, v| d.age = v
                required=true
            />
            <DraftSelect
                draft=draft
                id="gender"
                label="Gender"
                options=&GENDERS
                placeholder="Select Gender"
                get=|d| d.gender.clone()
                set=|d, v| d.gender = v
            />
        </div>
        <div class="form-section">
            <h2>"Medical Information"</h2>
            {with_status
                .then(|| {
                    view! {
                        <DraftSelect
                            draft=draft
                            id="status"
                            label="Status"
                            options=&EDITABLE_STATUSES
                            get=|d| d.status.clone()
                            set=|d, v| d.status = v
                        />
                    }
                })}
            <DraftInput
                draft=draft
                id="condition"
                label="Current Condition"
                get=|d| d.condition.clone()
                set=|d, v| d.condition = v
            />
            <DraftInput
                draft=draft
                id="diagnosis"
                label="Diagnosis"
                get=|d| d.diagnosis.clone()
                set=|d, v| d.diagnosis = v
            />
            <DraftTextArea
                draft=draft
                id="treatment"
                label="Treatment Plan"
                get=|d| d.treatment.clone()
                set=|d, v| d.treatment = v
            />
            <DraftTextArea
                draft=draft
                id="medical_history"
                label="Medical History"
                get=|d| d.medical_history.clone()
                set=|d, v| d.medical_history = v
            />
        </div>
        <div class="form-section">
            <h2>"Vital Signs"</h2>
            <DraftInput
                draft=draft
                id="blood_pressure"
                label="Blood Pressure"
                placeholder="e.g., 120/80"
                get=|d| d.blood_pressure.clone()
                set=|d, v| d.blood_pressure = v
            />
            <DraftInput
                draft=draft
                id="heart_rate"
                label="Heart Rate (bpm)"
                kind="number"
                placeholder="BPM"
                get=|d| d.heart_rate.clone()
                set=|d, v| d.heart_rate = v
            />
            <DraftInput
                draft=draft
                id="temperature"
                label="Temperature (°C)"
                kind="number"
                placeholder="°C"
                get=|d| d.temperature.clone()
                set=|d, v| d.temperature = v
            />
            <DraftInput
                draft=draft
                id="oxygen_level"
                label="Oxygen Level (%)"
                kind="number"
                placeholder="%"
                get=|d| d.oxygen_level.clone()
                set=|d, v| d.oxygen_level = v
            />
        </div>
    }
}
