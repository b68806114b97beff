//! AI prediction tools: skin-lesion image analysis and genetic risk analysis.

#[cfg(test)]
#[path = "predictions_test.rs"]
mod predictions_test;

use leptos::html::Input;
use leptos::prelude::*;

use crate::components::file_picker::FilePicker;
use crate::components::spinner::Spinner;
use crate::net::types::{GeneticPrediction, SkinPrediction};
use crate::util::format::format_percent;
use crate::util::upload::{FileMeta, UploadKind, revoke_preview_url};

const SKIN_FAILED: &str = "Failed to process image. Please try again.";
const GENETIC_FAILED: &str = "Failed to process genetic data. Please try again.";

#[component]
pub fn PredictionsPage() -> impl IntoView {
    view! {
        <div class="prediction-tools-container">
            <h1>"AI Prediction Tools"</h1>
            <div class="prediction-sections">
                <SkinSection/>
                <GeneticSection/>
            </div>
        </div>
    }
}

#[component]
fn SkinSection() -> impl IntoView {
    let input = NodeRef::<Input>::new();
    let picked = RwSignal::new(None::<FileMeta>);
    let preview = RwSignal::new(None::<String>);
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let result = RwSignal::new(None::<SkinPrediction>);

    on_cleanup(move || {
        if let Some(url) = preview.get_untracked() {
            revoke_preview_url(&url);
        }
    });
    // A new pick invalidates the previous answer.
    Effect::new(move || {
        picked.track();
        result.set(None);
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        #[cfg(feature = "hydrate")]
        {
            let image = match crate::components::file_picker::selected_upload(input, Some(UploadKind::SkinImage)) {
                Ok(Some(image)) => image,
                Ok(None) => {
                    error.set(crate::util::upload::UploadError::Missing.to_string());
                    return;
                }
                Err(e) => {
                    error.set(e.to_string());
                    return;
                }
            };
            busy.set(true);
            error.set(String::new());
            leptos::task::spawn_local(async move {
                match crate::net::api::predict_skin(&image).await {
                    Ok(prediction) => result.set(Some(prediction)),
                    Err(e) => {
                        log::warn!("predictions: skin analysis failed: {e}");
                        error.set(SKIN_FAILED.to_owned());
                    }
                }
                busy.set(false);
            });
        }
    };

    view! {
        <div class="prediction-section">
            <h2>"Skin Cancer Detection"</h2>
            <form class="prediction-form" on:submit=on_submit>
                <FilePicker
                    label="Upload Skin Lesion Image"
                    accept="image/*"
                    input=input
                    picked=picked
                    error=error
                    kind=UploadKind::SkinImage
                    preview=preview
                />
                <Show when=move || preview.with(Option::is_some)>
                    <div class="image-preview">
                        <img
                            class="preview-image"
                            src=move || preview.get().unwrap_or_default()
                            alt="Skin lesion preview"
                        />
                    </div>
                </Show>
                <button
                    class="predict-btn"
                    type="submit"
                    disabled=move || picked.with(Option::is_none) || busy.get()
                >
                    {move || if busy.get() { "Analyzing..." } else { "Analyze Image" }}
                </button>
                <Show when=move || busy.get()>
                    <Spinner/>
                </Show>
                <Show when=move || !error.get().is_empty()>
                    <div class="error-message">{move || error.get()}</div>
                </Show>
                {move || result.get().map(|prediction| view! { <SkinResult prediction=prediction/> })}
            </form>
        </div>
    }
}

#[component]
fn SkinResult(prediction: SkinPrediction) -> impl IntoView {
    view! {
        <div class="prediction-result">
            <h3>"Analysis Results"</h3>
            <p class="prediction-type">"Type: " <span>{prediction.kind.clone()}</span></p>
            <p class="prediction-probability">
                "Confidence: " <span>{format_percent(prediction.confidence)}</span>
            </p>
            <p class=risk_class(&prediction.risk_level)>"Risk Level: " <span>{prediction.risk_level.clone()}</span></p>
            <Recommendations items=prediction.recommendations/>
        </div>
    }
}

#[component]
fn GeneticSection() -> impl IntoView {
    let input = NodeRef::<Input>::new();
    let picked = RwSignal::new(None::<FileMeta>);
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let result = RwSignal::new(None::<GeneticPrediction>);

    Effect::new(move || {
        picked.track();
        result.set(None);
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        #[cfg(feature = "hydrate")]
        {
            let sheet = match crate::components::file_picker::selected_upload(input, Some(UploadKind::Genetic)) {
                Ok(Some(sheet)) => sheet,
                Ok(None) => {
                    error.set(crate::util::upload::UploadError::Missing.to_string());
                    return;
                }
                Err(e) => {
                    error.set(e.to_string());
                    return;
                }
            };
            busy.set(true);
            error.set(String::new());
            leptos::task::spawn_local(async move {
                match crate::net::api::predict_genetic(&sheet).await {
                    Ok(prediction) => result.set(Some(prediction)),
                    Err(e) => {
                        log::warn!("predictions: genetic analysis failed: {e}");
                        error.set(GENETIC_FAILED.to_owned());
                    }
                }
                busy.set(false);
            });
        }
    };

    view! {
        <div class="prediction-section">
            <h2>"Upload Genetic Data"</h2>
            <form class="prediction-form" on:submit=on_submit>
                <FilePicker
                    label="Upload Genetic Data (Excel File)"
                    accept=".xlsx"
                    input=input
                    picked=picked
                    error=error
                    kind=UploadKind::Genetic
                />
                <p class="file-hint">"Please upload an Excel file (.xlsx) containing genetic data"</p>
                <button
                    class="predict-btn"
                    type="submit"
                    disabled=move || picked.with(Option::is_none) || busy.get()
                >
                    {move || if busy.get() { "Processing..." } else { "Process Genetic Data" }}
                </button>
                <Show when=move || busy.get()>
                    <Spinner/>
                </Show>
                <Show when=move || !error.get().is_empty()>
                    <div class="error-message">{move || error.get()}</div>
                </Show>
                {move || result.get().map(|prediction| view! { <GeneticResult prediction=prediction/> })}
            </form>
        </div>
    }
}

#[component]
fn GeneticResult(prediction: GeneticPrediction) -> impl IntoView {
    let findings = (!prediction.findings.is_empty()).then(|| {
        let items = prediction.findings.clone();
        view! {
            <div class="genetic-details">
                <h4>"Findings:"</h4>
                <ul>{items.into_iter().map(|f| view! { <li>{f}</li> }).collect_view()}</ul>
            </div>
        }
    });
    view! {
        <div class="prediction-result">
            <h3>"Analysis Results"</h3>
            <p class=risk_class(&prediction.risk_level)>"Risk Level: " <span>{prediction.risk_level.clone()}</span></p>
            <p class="prediction-probability">"Risk Score: " <span>{format_percent(prediction.risk_score)}</span></p>
            <p>{format!("Markers Analyzed: {}", prediction.markers_analyzed)}</p>
            {findings}
            <Recommendations items=prediction.recommendations/>
        </div>
    }
}

#[component]
fn Recommendations(items: Vec<String>) -> impl IntoView {
    view! {
        <div class="recommendations">
            <h4>"Recommendations:"</h4>
            <ul>{items.into_iter().map(|r| view! { <li>{r}</li> }).collect_view()}</ul>
        </div>
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn risk_class(level: &str) -> &'static str {
    match level.trim().to_ascii_lowercase().as_str() {
        "high" | "very high" => "prediction-risk risk-high",
        "medium" | "moderate" => "prediction-risk risk-medium",
        "low" | "very low" => "prediction-risk risk-low",
        _ => "prediction-risk",
    }
}
