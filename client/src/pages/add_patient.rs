//! Add-patient page: record form plus optional genetic, DICOM and skin-lesion
//! uploads.
//!
//! SYSTEM CONTEXT
//! ==============
//! Submission is a sequence against the backend: create the patient, then
//! attach each optional file in a fixed order. The skin image is classified
//! first and stored together with its prediction. Any failure stops the
//! sequence and stays on the page with the error; the patient record created
//! so far is kept.

#[cfg(test)]
#[path = "add_patient_test.rs"]
mod add_patient_test;

use leptos::html::Input;
use leptos::prelude::*;
use leptos_router::components::A;
#[cfg(feature = "hydrate")]
use leptos_router::{NavigateOptions, hooks::use_navigate};

use crate::components::file_picker::FilePicker;
use crate::pages::patient_form::{PatientDraft, PatientFields};
use crate::routing::table::PATIENTS_PATH;
use crate::util::upload::{FileMeta, UploadKind};

pub const SCAN_TYPE_DICOM: &str = "dicom";
pub const SCAN_TYPE_SKIN: &str = "skin_cancer";
pub const DICOM_SCAN_ABOUT: &str = "DICOM scan";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitStep {
    CreatePatient,
    UploadGenetic,
    UploadDicom,
    PredictSkin,
    UploadSkinScan,
}

impl SubmitStep {
    #[must_use]
    pub fn progress_label(self) -> &'static str {
        match self {
            Self::CreatePatient => "Saving patient...",
            Self::UploadGenetic => "Uploading genetic data...",
            Self::UploadDicom => "Uploading DICOM scan...",
            Self::PredictSkin => "Analyzing skin lesion...",
            Self::UploadSkinScan => "Uploading skin lesion scan...",
        }
    }
}

#[component]
pub fn AddPatientPage() -> impl IntoView {
    let draft = RwSignal::new(PatientDraft::default());
    let error = RwSignal::new(String::new());
    let progress = RwSignal::new(None::<SubmitStep>);

    let genetic_input = NodeRef::<Input>::new();
    let dicom_input = NodeRef::<Input>::new();
    let skin_input = NodeRef::<Input>::new();
    let genetic_meta = RwSignal::new(None::<FileMeta>);
    let dicom_meta = RwSignal::new(None::<FileMeta>);
    let skin_meta = RwSignal::new(None::<FileMeta>);
    let skin_preview = RwSignal::new(None::<String>);

    on_cleanup(move || {
        if let Some(url) = skin_preview.get_untracked() {
            crate::util::upload::revoke_preview_url(&url);
        }
    });

    #[cfg(feature = "hydrate")]
    let navigate = use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if progress.get().is_some() {
            return;
        }
        let patient = match draft.get().to_new_patient() {
            Ok(patient) => patient,
            Err(e) => {
                error.set(e.to_string());
                return;
            }
        };
        error.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            use crate::components::file_picker::selected_upload;

            let files = selected_upload(genetic_input, Some(UploadKind::Genetic)).and_then(|genetic| {
                Ok((
                    genetic,
                    selected_upload(dicom_input, Some(UploadKind::Dicom))?,
                    selected_upload(skin_input, Some(UploadKind::SkinImage))?,
                ))
            });
            let (genetic, dicom, skin) = match files {
                Ok(files) => files,
                Err(e) => {
                    error.set(e.to_string());
                    return;
                }
            };
            let navigate = navigate.clone();
            progress.set(Some(SubmitStep::CreatePatient));
            leptos::task::spawn_local(async move {
                let files = UploadSet { genetic: genetic.as_ref(), dicom: dicom.as_ref(), skin: skin.as_ref() };
                let outcome = submit(&patient, files, progress).await;
                progress.set(None);
                match outcome {
                    Ok(()) => navigate(PATIENTS_PATH, NavigateOptions::default()),
                    Err(message) => error.set(message),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = patient;
    };

    view! {
        <div class="add-patient-container">
            <div class="page-header">
                <h1>"Add New Patient"</h1>
                <A href=PATIENTS_PATH attr:class="back-btn">"Back to Patient List"</A>
            </div>
            <Show when=move || !error.get().is_empty()>
                <div class="error-message">{move || error.get()}</div>
            </Show>
            <form class="add-patient-form" on:submit=on_submit>
                <PatientFields draft=draft/>
                <div class="form-section">
                    <h2>"Medical Files"</h2>
                    <FilePicker
                        label="Upload Genetic Data (Excel File):"
                        accept=".xlsx"
                        input=genetic_input
                        picked=genetic_meta
                        error=error
                        kind=UploadKind::Genetic
                    />
                    <FilePicker
                        label="Upload DICOM File:"
                        accept=".dcm"
                        input=dicom_input
                        picked=dicom_meta
                        error=error
                        kind=UploadKind::Dicom
                    />
                    <FilePicker
                        label="Upload Skin Lesion Image:"
                        accept="image/*"
                        input=skin_input
                        picked=skin_meta
                        error=error
                        kind=UploadKind::SkinImage
                        preview=skin_preview
                    />
                    <Show when=move || skin_preview.with(Option::is_some)>
                        <div class="image-preview">
                            <img src=move || skin_preview.get().unwrap_or_default() alt="Skin lesion preview"/>
                        </div>
                    </Show>
                </div>
                <div class="form-actions">
                    <button class="submit-btn" type="submit" disabled=move || progress.get().is_some()>
                        {move || progress.get().map_or("Add Patient", SubmitStep::progress_label)}
                    </button>
                </div>
            </form>
        </div>
    }
}

// =============================================================================
// SUBMISSION
// =============================================================================

/// Steps to run for the files that were picked, in backend order.
fn submission_plan(genetic: bool, dicom: bool, skin: bool) -> Vec<SubmitStep> {
    let mut steps = vec![SubmitStep::CreatePatient];
    if genetic {
        steps.push(SubmitStep::UploadGenetic);
    }
    if dicom {
        steps.push(SubmitStep::UploadDicom);
    }
    if skin {
        steps.extend([SubmitStep::PredictSkin, SubmitStep::UploadSkinScan]);
    }
    steps
}

fn skin_scan_about(kind: &str) -> String {
    format!("Skin cancer scan - {kind}")
}

fn step_error(step: SubmitStep, detail: &str) -> String {
    match step {
        SubmitStep::CreatePatient => format!("Error adding patient: {detail}"),
        SubmitStep::UploadGenetic => format!("Error uploading genetic data: {detail}"),
        SubmitStep::UploadDicom => format!("Error uploading DICOM scan: {detail}"),
        SubmitStep::PredictSkin | SubmitStep::UploadSkinScan => {
            format!("Error processing skin cancer image: {detail}")
        }
    }
}

#[cfg(feature = "hydrate")]
struct UploadSet<'a> {
    genetic: Option<&'a crate::util::upload::Upload>,
    dicom: Option<&'a crate::util::upload::Upload>,
    skin: Option<&'a crate::util::upload::Upload>,
}

#[cfg(feature = "hydrate")]
async fn submit(
    patient: &crate::net::types::NewPatient,
    files: UploadSet<'_>,
    progress: RwSignal<Option<SubmitStep>>,
) -> Result<(), String> {
    use crate::net::api::{self, ScanUpload};

    let mut prediction = None;
    let mut patient_id = String::new();
    for step in submission_plan(files.genetic.is_some(), files.dicom.is_some(), files.skin.is_some()) {
        progress.set(Some(step));
        let result = match (step, files.genetic, files.dicom, files.skin) {
            (SubmitStep::CreatePatient, ..) => api::add_patient(patient).await.map(|created| {
                log::info!("add patient: created {}", created.id);
                patient_id = created.id.to_string();
            }),
            (SubmitStep::UploadGenetic, Some(file), _, _) => api::upload_genetic(&patient_id, file).await,
            (SubmitStep::UploadDicom, _, Some(file), _) => api::upload_scan(&patient_id, ScanUpload {
                about: DICOM_SCAN_ABOUT.to_owned(),
                scan_type: SCAN_TYPE_DICOM,
                file,
                prediction: None,
            })
            .await
            .map(drop),
            (SubmitStep::PredictSkin, _, _, Some(image)) => {
                api::predict_skin(image).await.map(|result| prediction = Some(result))
            }
            (SubmitStep::UploadSkinScan, _, _, Some(image)) => match prediction.as_ref() {
                Some(result) => api::upload_scan(&patient_id, ScanUpload {
                    about: skin_scan_about(&result.kind),
                    scan_type: SCAN_TYPE_SKIN,
                    file: image,
                    prediction: Some(result),
                })
                .await
                .map(drop),
                None => Ok(()),
            },
            _ => Ok(()),
        };
        if let Err(e) = result {
            log::warn!("add patient: {step:?} failed: {e}");
            return Err(step_error(step, &e.to_string()));
        }
    }
    Ok(())
}
