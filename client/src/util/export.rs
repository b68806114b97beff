//! Research dataset summaries and CSV/JSON export.
//!
//! SYSTEM CONTEXT
//! ==============
//! The research dashboard filters anonymized records by condition, shows a
//! few aggregate figures and lets researchers download the filtered rows.
//! Formatting lives here; `download` is the browser-only file save.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use std::collections::{BTreeSet, HashMap};

use crate::net::types::ResearchRecord;

pub const ALL_CONDITIONS: &str = "all";

const CSV_HEADERS: [&str; 12] = [
    "ID",
    "Age",
    "Gender",
    "Condition",
    "Blood Pressure",
    "Heart Rate",
    "Temperature",
    "Oxygen Level",
    "Genetic Findings",
    "Risk Factors",
    "Genetic Markers",
    "DICOM Studies",
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv encoding failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("export is not valid utf-8")]
    Utf8,
    #[error("browser download failed: {0}")]
    Browser(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    #[must_use]
    pub fn mime(self) -> &'static str {
        match self {
            Self::Csv => "text/csv;charset=utf-8;",
            Self::Json => "application/json",
        }
    }
}

/// `"all"` followed by each distinct condition in first-seen order.
#[must_use]
pub fn conditions(records: &[ResearchRecord]) -> Vec<String> {
    let mut out = vec![ALL_CONDITIONS.to_owned()];
    for record in records {
        if !out.contains(&record.condition) {
            out.push(record.condition.clone());
        }
    }
    out
}

#[must_use]
pub fn filter_by_condition<'a>(records: &'a [ResearchRecord], condition: &str) -> Vec<&'a ResearchRecord> {
    records.iter().filter(|r| condition == ALL_CONDITIONS || r.condition == condition).collect()
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DatasetSummary {
    pub total: usize,
    pub average_age: Option<f64>,
    /// Most frequent genetic markers, most common first, at most five.
    pub common_markers: Vec<String>,
    pub dicom_studies: u32,
}

#[must_use]
pub fn summarize(records: &[&ResearchRecord]) -> DatasetSummary {
    let total = records.len();
    #[allow(clippy::cast_precision_loss)]
    let average_age =
        (total > 0).then(|| records.iter().map(|r| f64::from(r.age)).sum::<f64>() / total as f64);

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for marker in records.iter().flat_map(|r| &r.genetics.genetic_markers) {
        *counts.entry(marker.as_str()).or_default() += 1;
    }
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    let common_markers = ranked.into_iter().take(5).map(|(m, _)| m.to_owned()).collect();

    DatasetSummary {
        total,
        average_age,
        common_markers,
        dicom_studies: records.iter().map(|r| r.dicom_studies).sum(),
    }
}

/// Distinct risk factors across the records, sorted.
#[must_use]
pub fn risk_factors(records: &[&ResearchRecord]) -> Vec<String> {
    records
        .iter()
        .flat_map(|r| r.genetics.dna_analysis.risk_factors.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// # Errors
///
/// Returns `ExportError` if the CSV writer fails.
pub fn to_csv(records: &[&ResearchRecord]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;
    for r in records {
        writer.write_record([
            r.id.clone(),
            r.age.to_string(),
            r.gender.clone(),
            r.condition.clone(),
            r.vitals.blood_pressure.clone(),
            r.vitals.heart_rate.clone(),
            r.vitals.temperature.clone(),
            r.vitals.oxygen_level.clone(),
            r.genetics.dna_analysis.findings.clone(),
            r.genetics.dna_analysis.risk_factors.join("; "),
            r.genetics.genetic_markers.join("; "),
            r.dicom_studies.to_string(),
        ])?;
    }
    let bytes = writer.into_inner().map_err(|e| ExportError::Csv(e.into_error().into()))?;
    String::from_utf8(bytes).map_err(|_| ExportError::Utf8)
}

/// # Errors
///
/// Returns `ExportError` if serialization fails.
pub fn to_json(records: &[&ResearchRecord]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// `research_data_{condition}_{YYYY-MM-DD}.{ext}`.
#[must_use]
pub fn export_filename(condition: &str, date: &str, format: ExportFormat) -> String {
    format!("research_data_{condition}_{date}.{}", format.extension())
}

/// Today's date in `YYYY-MM-DD` according to the browser clock.
#[must_use]
pub fn today() -> String {
    #[cfg(feature = "hydrate")]
    {
        js_sys::Date::new_0().to_iso_string().as_string().unwrap_or_default().chars().take(10).collect()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        String::new()
    }
}

/// Save `content` as a file through a temporary object URL.
///
/// # Errors
///
/// Returns `ExportError::Browser` when the DOM calls fail or when running
/// outside the browser.
pub fn download(filename: &str, content: &str, format: ExportFormat) -> Result<(), ExportError> {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;

        let js_err = |e: wasm_bindgen::JsValue| ExportError::Browser(format!("{e:?}"));
        let parts = js_sys::Array::new();
        parts.push(&wasm_bindgen::JsValue::from_str(content));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(format.mime());
        let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_err)?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| ExportError::Browser("no document".to_owned()))?;
        let anchor = document
            .create_element("a")
            .map_err(js_err)?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| ExportError::Browser("anchor cast failed".to_owned()))?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.click();
        web_sys::Url::revoke_object_url(&url).map_err(js_err)?;
        log::info!("export: saved {filename}");
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (filename, content, format);
        Err(ExportError::Browser("not available on server".to_owned()))
    }
}
