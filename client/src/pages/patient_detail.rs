//! Patient detail page: view, edit, bulk import and delete.
//!
//! SYSTEM CONTEXT
//! ==============
//! Loads one record by route id. Saving sends the record update and then the
//! vitals update; both must succeed before edit mode closes. The spreadsheet
//! import adds patients in bulk and reloads this record afterwards.

#[cfg(test)]
#[path = "patient_detail_test.rs"]
mod patient_detail_test;

use leptos::html::Input;
use leptos::prelude::*;
use leptos_router::components::A;
#[cfg(feature = "hydrate")]
use leptos_router::{NavigateOptions, hooks::use_navigate};

use crate::components::spinner::Spinner;
use crate::net::types::Patient;
use crate::pages::patient_form::{PatientDraft, PatientFields};
use crate::routing::table::PATIENTS_PATH;
use crate::util::format::{format_status, format_vitals, or_na};

#[component]
pub fn PatientDetailPage(id: String) -> impl IntoView {
    let patient = RwSignal::new(None::<Patient>);
    let draft = RwSignal::new(PatientDraft::default());
    let loading = RwSignal::new(true);
    let busy = RwSignal::new(false);
    let editing = RwSignal::new(false);
    let error = RwSignal::new(String::new());
    let notice = RwSignal::new(String::new());
    let import_input = NodeRef::<Input>::new();
    let id = StoredValue::new(id);

    #[cfg(feature = "hydrate")]
    let navigate = use_navigate();

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::get_patient(&id.get_value()).await {
            Ok(record) => {
                draft.set(PatientDraft::from_patient(&record));
                patient.set(Some(record));
            }
            Err(e) => error.set(format!("Failed to fetch patient details: {e}")),
        }
        loading.set(false);
    });

    let on_save = move |_| {
        if busy.get() {
            return;
        }
        let (update, vitals) = match draft.get().to_update() {
            Ok(parts) => parts,
            Err(e) => {
                error.set(e.to_string());
                return;
            }
        };
        busy.set(true);
        error.set(String::new());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::net::api;

            let id = id.get_value();
            let saved = match api::update_patient(&id, &update).await {
                Ok(record) => api::update_vitals(&id, &vitals).await.map(|()| record),
                Err(e) => Err(e),
            };
            match saved {
                Ok(record) => {
                    let record = with_vitals(record, vitals);
                    log::info!("patient detail: saved {}", record.id);
                    draft.set(PatientDraft::from_patient(&record));
                    patient.set(Some(record));
                    editing.set(false);
                }
                Err(e) => error.set(format!("Failed to save changes: {e}")),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (update, vitals);
    };

    let on_cancel = move |_| {
        if let Some(record) = patient.get_untracked() {
            draft.set(PatientDraft::from_patient(&record));
        }
        error.set(String::new());
        editing.set(false);
    };

    let on_import = move |_: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use crate::util::upload::{Upload, UploadError, is_spreadsheet_name};

            let Some(element) = import_input.get_untracked() else {
                return;
            };
            let file = match Upload::from_input(&element, None) {
                Ok(file) if is_spreadsheet_name(&file.meta.name) => file,
                Ok(_) => {
                    error.set(UploadError::NotSpreadsheet.to_string());
                    element.set_value("");
                    return;
                }
                Err(_) => return,
            };
            element.set_value("");
            busy.set(true);
            error.set(String::new());
            notice.set(String::new());
            leptos::task::spawn_local(async move {
                use crate::net::api;

                match api::upload_patients(&file).await {
                    Ok(created) => {
                        notice.set(import_message(created.len()));
                        match api::get_patient(&id.get_value()).await {
                            Ok(record) => {
                                draft.set(PatientDraft::from_patient(&record));
                                patient.set(Some(record));
                            }
                            Err(e) => {
                                log::warn!("patient detail: reload after import failed: {e}");
                                error.set(reload_error_message(&e));
                            }
                        }
                    }
                    Err(e) => error.set(format!("Failed to upload file: {e}")),
                }
                busy.set(false);
            });
        }
    };

    let on_delete = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let confirmed = web_sys::window()
                .and_then(|w| w.confirm_with_message("Delete this patient record?").ok())
                .unwrap_or(false);
            if !confirmed || busy.get() {
                return;
            }
            busy.set(true);
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::delete_patient(&id.get_value()).await {
                    Ok(()) => {
                        busy.set(false);
                        navigate(PATIENTS_PATH, NavigateOptions::default());
                    }
                    Err(e) => {
                        error.set(format!("Failed to delete patient: {e}"));
                        busy.set(false);
                    }
                }
            });
        }
    };

    view! {
        <Show when=move || !loading.get() fallback=|| view! { <Spinner/> }>
            <div class="patient-detail-container">
                <div class="patient-detail-header">
                    <h1>"Patient Details"</h1>
                    <div class="header-actions">
                        <div class="file-upload">
                            <input
                                id="file-upload"
                                type="file"
                                accept=".xls,.xlsx"
                                style="display: none"
                                node_ref=import_input
                                on:change=on_import
                            />
                            <label for="file-upload" class="upload-btn">"Upload XLS File"</label>
                        </div>
                        <Show
                            when=move || editing.get()
                            fallback=move || {
                                view! {
                                    <button class="edit-btn" on:click=move |_| editing.set(true)>
                                        "Edit Patient"
                                    </button>
                                }
                            }
                        >
                            <button class="save-btn" disabled=move || busy.get() on:click=on_save>
                                "Save Changes"
                            </button>
                            <button class="cancel-btn" on:click=on_cancel>"Cancel"</button>
                        </Show>
                        <button class="delete-btn" disabled=move || busy.get() on:click=on_delete.clone()>
                            "Delete Patient"
                        </button>
                        <A href=PATIENTS_PATH attr:class="back-btn">"Back to List"</A>
                    </div>
                </div>
                <Show when=move || !error.get().is_empty()>
                    <div class="error-message">{move || error.get()}</div>
                </Show>
                <Show when=move || !notice.get().is_empty()>
                    <div class="success-message">{move || notice.get()}</div>
                </Show>
                {move || match (patient.get(), editing.get()) {
                    (None, _) => view! { <div class="no-results">"Patient not found"</div> }.into_any(),
                    (Some(_), true) => {
                        view! {
                            <div class="patient-info-grid">
                                <PatientFields draft=draft with_status=true/>
                            </div>
                        }
                            .into_any()
                    }
                    (Some(record), false) => view! { <PatientSummary patient=record/> }.into_any(),
                }}
            </div>
        </Show>
    }
}

#[component]
fn PatientSummary(patient: Patient) -> impl IntoView {
    let vitals = format_vitals(patient.vitals.as_ref());
    let status_class = format!("status status-{}", patient.status.to_lowercase());
    view! {
        <div class="patient-info-grid">
            <div class="info-section">
                <h2>"Personal Information"</h2>
                <div class="info-content">
                    <p><strong>"Name: "</strong>{patient.name.clone()}</p>
                    <p><strong>"Age: "</strong>{patient.age}</p>
                    <p><strong>"Gender: "</strong>{format_status(&patient.gender)}</p>
                </div>
            </div>
            <div class="info-section">
                <h2>"Medical Information"</h2>
                <div class="info-content">
                    <p><strong>"Status: "</strong><span class=status_class>{format_status(&patient.status)}</span></p>
                    <p><strong>"Condition: "</strong>{or_na(patient.condition.as_deref())}</p>
                    <p><strong>"Diagnosis: "</strong>{or_na(patient.diagnosis.as_deref())}</p>
                    <p><strong>"Treatment: "</strong>{or_na(patient.treatment.as_deref())}</p>
                    <p><strong>"Medical History: "</strong>{or_na(patient.medical_history.as_deref())}</p>
                </div>
            </div>
            <div class="info-section">
                <h2>"Vital Signs"</h2>
                <div class="info-content">
                    <p><strong>"Blood Pressure: "</strong>{vitals.blood_pressure}</p>
                    <p><strong>"Heart Rate: "</strong>{vitals.heart_rate}</p>
                    <p><strong>"Temperature: "</strong>{vitals.temperature}</p>
                    <p><strong>"Oxygen Level: "</strong>{vitals.oxygen_level}</p>
                </div>
            </div>
        </div>
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn import_message(count: usize) -> String {
    match count {
        1 => "Successfully uploaded 1 patient".to_owned(),
        n => format!("Successfully uploaded {n} patients"),
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn reload_error_message(e: &crate::net::api::ApiError) -> String {
    format!("Patients imported, but reloading this record failed: {e}")
}

/// The update endpoint does not echo vitals; keep the ones just saved.
fn with_vitals(mut record: Patient, vitals: crate::net::types::Vitals) -> Patient {
    record.vitals = Some(vitals);
    record
}
