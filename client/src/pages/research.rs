//! Research dashboard: anonymized records, condition filter, aggregate
//! figures and CSV/JSON export.

#[cfg(test)]
#[path = "research_test.rs"]
mod research_test;

use leptos::prelude::*;

use crate::components::spinner::Spinner;
use crate::net::types::ResearchRecord;
use crate::util::export::{
    ALL_CONDITIONS, ExportError, ExportFormat, conditions, download, export_filename, filter_by_condition,
    risk_factors, summarize, to_csv, to_json, today,
};
use crate::util::format::format_status;

#[component]
pub fn ResearchPage() -> impl IntoView {
    let records = RwSignal::new(Vec::<ResearchRecord>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(String::new());
    let condition = RwSignal::new(ALL_CONDITIONS.to_owned());

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::research_data(None).await {
            Ok(rows) => records.set(rows),
            Err(e) => {
                log::warn!("research: {e}");
                error.set("Failed to fetch research data".to_owned());
            }
        }
        loading.set(false);
    });

    let filtered = Memo::new(move |_| {
        records.with(|all| condition.with(|c| filter_by_condition(all, c).into_iter().cloned().collect::<Vec<_>>()))
    });
    let summary = Memo::new(move |_| filtered.with(|rows| summarize(&rows.iter().collect::<Vec<_>>())));
    let factors = move || filtered.with(|rows| risk_factors(&rows.iter().collect::<Vec<_>>()));

    let on_download = move |format: ExportFormat| {
        let result = filtered.with_untracked(|rows| {
            condition.with_untracked(|c| prepare_export(&rows.iter().collect::<Vec<_>>(), c, &today(), format))
        });
        match result.and_then(|(filename, content)| download(&filename, &content, format)) {
            Ok(()) => error.set(String::new()),
            Err(e) => {
                log::warn!("research: export failed: {e}");
                error.set(format!("Download failed: {e}"));
            }
        }
    };

    view! {
        <Show when=move || !loading.get() fallback=|| view! { <Spinner/> }>
            <div class="researcher-dashboard">
                <h1>"Research Data Analysis"</h1>
                <Show when=move || !error.get().is_empty()>
                    <div class="error-message">{move || error.get()}</div>
                </Show>
                <div class="research-controls">
                    <div class="control-group">
                        <label for="condition-filter">"Filter by Condition:"</label>
                        <select
                            id="condition-filter"
                            class="form-input"
                            prop:value=move || condition.get()
                            on:change=move |ev| condition.set(event_target_value(&ev))
                        >
                            {move || {
                                records
                                    .with(|all| conditions(all))
                                    .into_iter()
                                    .map(|c| {
                                        let label = format_status(&c);
                                        view! { <option value=c>{label}</option> }
                                    })
                                    .collect_view()
                            }}
                        </select>
                    </div>
                    <div class="download-buttons">
                        <button class="download-btn" on:click=move |_| on_download(ExportFormat::Csv)>
                            "Download CSV"
                        </button>
                        <button class="download-btn" on:click=move |_| on_download(ExportFormat::Json)>
                            "Download JSON"
                        </button>
                    </div>
                </div>
                <div class="research-grid">
                    <div class="research-card">
                        <h2>"Patient Demographics"</h2>
                        <div class="stat-item">
                            <span class="stat-label">"Total Patients:"</span>
                            <span class="stat-value">{move || summary.with(|s| s.total)}</span>
                        </div>
                        <div class="stat-item">
                            <span class="stat-label">"Average Age:"</span>
                            <span class="stat-value">{move || summary.with(|s| average_age_label(s.average_age))}</span>
                        </div>
                    </div>
                    <div class="research-card">
                        <h2>"Genetic Analysis"</h2>
                        <div class="stat-item">
                            <span class="stat-label">"Common Markers:"</span>
                            <ul class="markers-list">
                                {move || {
                                    summary
                                        .with(|s| s.common_markers.clone())
                                        .into_iter()
                                        .map(|m| view! { <li>{m}</li> })
                                        .collect_view()
                                }}
                            </ul>
                        </div>
                        <div class="stat-item">
                            <span class="stat-label">"Risk Factors:"</span>
                            <ul class="markers-list">
                                {move || factors().into_iter().map(|f| view! { <li>{f}</li> }).collect_view()}
                            </ul>
                        </div>
                    </div>
                    <div class="research-card">
                        <h2>"Medical Imaging"</h2>
                        <div class="stat-item">
                            <span class="stat-label">"Total DICOM Studies:"</span>
                            <span class="stat-value">{move || summary.with(|s| s.dicom_studies)}</span>
                        </div>
                    </div>
                </div>
                <div class="research-table-container">
                    <h2>"Anonymized Patient Records"</h2>
                    <div class="table-wrapper">
                        <table class="research-table">
                            <thead>
                                <tr>
                                    <th>"ID"</th>
                                    <th>"Age"</th>
                                    <th>"Gender"</th>
                                    <th>"Condition"</th>
                                    <th>"Genetic Findings"</th>
                                    <th>"Risk Factors"</th>
                                    <th>"Genetic Markers"</th>
                                    <th>"DICOM Studies"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {move || filtered.get().into_iter().map(|r| view! { <RecordRow record=r/> }).collect_view()}
                            </tbody>
                        </table>
                    </div>
                </div>
            </div>
        </Show>
    }
}

#[component]
fn RecordRow(record: ResearchRecord) -> impl IntoView {
    view! {
        <tr>
            <td>{record.id}</td>
            <td>{record.age}</td>
            <td>{record.gender}</td>
            <td>{record.condition}</td>
            <td>{record.genetics.dna_analysis.findings}</td>
            <td>{record.genetics.dna_analysis.risk_factors.join(", ")}</td>
            <td>{record.genetics.genetic_markers.join(", ")}</td>
            <td>{record.dicom_studies}</td>
        </tr>
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn average_age_label(average: Option<f64>) -> String {
    average.map_or_else(|| "N/A".to_owned(), |age| format!("{age:.0}"))
}

/// File name and body for a download of `rows`.
fn prepare_export(
    rows: &[&ResearchRecord],
    condition: &str,
    date: &str,
    format: ExportFormat,
) -> Result<(String, String), ExportError> {
    let content = match format {
        ExportFormat::Csv => to_csv(rows)?,
        ExportFormat::Json => to_json(rows)?,
    };
    Ok((export_filename(condition, date, format), content))
}
