//! Patient list for hospital staff: search, status filter and sorting.

#[cfg(test)]
#[path = "patient_list_test.rs"]
mod patient_list_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::spinner::Spinner;
use crate::net::types::Patient;
use crate::routing::table::{ADD_PATIENT_PATH, patient_path};
use crate::util::format::{SortKey, SortOrder, format_percent, or_na, sort_patients, status_statistics};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
    Critical,
}

impl StatusFilter {
    pub const ALL: [Self; 4] = [Self::All, Self::Active, Self::Inactive, Self::Critical];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Critical => "critical",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All Patients",
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Critical => "Critical",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self::ALL.into_iter().find(|f| f.as_str() == raw).unwrap_or_default()
    }

    fn accepts(self, status: &str) -> bool {
        self == Self::All || status.eq_ignore_ascii_case(self.as_str())
    }
}

#[component]
pub fn PatientListPage() -> impl IntoView {
    let patients = RwSignal::new(Vec::<Patient>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(String::new());
    let search = RwSignal::new(String::new());
    let filter = RwSignal::new(StatusFilter::All);
    let sort_key = RwSignal::new(SortKey::Name);
    let sort_order = RwSignal::new(SortOrder::Asc);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::list_patients().await {
            Ok(list) => patients.set(list),
            Err(e) => error.set(format!("Failed to fetch patients: {e}")),
        }
        loading.set(false);
    });

    let visible = Memo::new(move |_| {
        patients.with(|list| visible_patients(list, &search.get(), filter.get(), sort_key.get(), sort_order.get()))
    });
    let stats = move || patients.with(|list| status_statistics(list));

    view! {
        <Show when=move || !loading.get() fallback=|| view! { <Spinner/> }>
            <div class="patient-list-container">
                <div class="patient-list-header">
                    <h1>"Patient List"</h1>
                    <A href=ADD_PATIENT_PATH attr:class="add-patient-btn">"Add New Patient"</A>
                </div>
                <Show when=move || !error.get().is_empty()>
                    <div class="error-message">{move || error.get()}</div>
                </Show>
                <div class="patient-stats">
                    <span>{move || format!("Total: {}", stats().total)}</span>
                    <span>{move || format!("Active: {}", format_percent(stats().active))}</span>
                    <span>{move || format!("Recovered: {}", format_percent(stats().recovered))}</span>
                    <span>{move || format!("Critical: {}", format_percent(stats().critical))}</span>
                </div>
                <div class="filters">
                    <input
                        class="search-input"
                        type="text"
                        placeholder="Search patients by name, condition, or diagnosis..."
                        prop:value=move || search.get()
                        on:input=move |ev| search.set(event_target_value(&ev))
                    />
                    <select
                        class="filter-select"
                        prop:value=move || filter.get().as_str()
                        on:change=move |ev| filter.set(StatusFilter::parse(&event_target_value(&ev)))
                    >
                        {StatusFilter::ALL
                            .iter()
                            .map(|f| view! { <option value=f.as_str()>{f.label()}</option> })
                            .collect_view()}
                    </select>
                    <select
                        class="filter-select"
                        on:change=move |ev| {
                            sort_key.set(if event_target_value(&ev) == "age" { SortKey::Age } else { SortKey::Name });
                        }
                    >
                        <option value="name">"Sort by name"</option>
                        <option value="age">"Sort by age"</option>
                    </select>
                    <button
                        class="sort-order-btn"
                        on:click=move |_| {
                            sort_order.update(|o| {
                                *o = if *o == SortOrder::Asc { SortOrder::Desc } else { SortOrder::Asc };
                            });
                        }
                    >
                        {move || if sort_order.get() == SortOrder::Asc { "↑" } else { "↓" }}
                    </button>
                </div>
                <div class="patient-grid">
                    {move || {
                        visible.get().into_iter().map(|patient| view! { <PatientCard patient=patient/> }).collect_view()
                    }}
                </div>
                <Show when=move || visible.with(Vec::is_empty)>
                    <div class="no-results">"No patients found matching your search criteria."</div>
                </Show>
            </div>
        </Show>
    }
}

#[component]
fn PatientCard(patient: Patient) -> impl IntoView {
    let href = patient_path(&patient.id.to_string());
    let status_class = format!("status status-{}", patient.status.to_lowercase());
    let vitals = patient.vitals.clone().map(|v| {
        let heart_rate = v.heart_rate.map_or_else(|| "N/A".to_owned(), |hr| hr.to_string());
        view! {
            <div class="vitals-summary">
                <p>{format!("BP: {}", or_na(v.blood_pressure.as_deref()))}</p>
                <p>{format!("HR: {heart_rate} bpm")}</p>
            </div>
        }
    });
    view! {
        <A href=href attr:class="patient-card">
            <h3>{patient.name.clone()}</h3>
            <p>{format!("Age: {}", patient.age)}</p>
            <p>{format!("Condition: {}", or_na(patient.condition.as_deref()))}</p>
            <p>{format!("Diagnosis: {}", or_na(patient.diagnosis.as_deref()))}</p>
            <p class=status_class>{patient.status.clone()}</p>
            {vitals}
        </A>
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Case-insensitive match on name, condition or diagnosis.
fn matches_search(patient: &Patient, search: &str) -> bool {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    [Some(patient.name.as_str()), patient.condition.as_deref(), patient.diagnosis.as_deref()]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

fn visible_patients(
    patients: &[Patient],
    search: &str,
    filter: StatusFilter,
    key: SortKey,
    order: SortOrder,
) -> Vec<Patient> {
    let mut out: Vec<Patient> =
        patients.iter().filter(|p| filter.accepts(&p.status) && matches_search(p, search)).cloned().collect();
    sort_patients(&mut out, key, order);
    out
}
