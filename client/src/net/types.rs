//! Wire types exchanged with the patient REST backend.
//!
//! Field names follow the backend's snake_case JSON. Optional backend fields
//! default when missing so partially filled records still decode.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

use crate::state::session::Role;

// =============================================================================
// AUTH
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// `role` stays a raw string until `SessionStore::login_as` validates it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Error payloads: FastAPI-style `detail` or a plain `error` field.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorBody {
    pub detail: Option<String>,
    pub error: Option<String>,
}

impl ErrorBody {
    #[must_use]
    pub fn message(self) -> Option<String> {
        self.detail.or(self.error).filter(|m| !m.trim().is_empty())
    }
}

// =============================================================================
// PATIENTS
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    #[serde(default)]
    pub blood_pressure: Option<String>,
    #[serde(default)]
    pub heart_rate: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub oxygen_level: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub name: String,
    pub age: u32,
    pub gender: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub treatment: Option<String>,
    #[serde(default)]
    pub medical_history: Option<String>,
    #[serde(default)]
    pub vitals: Option<Vitals>,
    #[serde(default)]
    pub hospital_id: Option<i64>,
}

fn default_status() -> String {
    "active".to_owned()
}

/// Body of `POST /patients`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewPatient {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub condition: String,
    pub diagnosis: String,
    pub treatment: String,
    pub medical_history: String,
    pub vitals: Vitals,
}

/// Body of `PUT /patients/{id}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PatientUpdate {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub status: String,
    pub condition: String,
    pub diagnosis: String,
    pub treatment: String,
    pub medical_history: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Scan {
    pub id: i64,
    pub about: String,
    #[serde(default)]
    pub scan_type: Option<String>,
    pub file_path: String,
    pub date_uploaded: String,
    pub patient_id: i64,
}

// =============================================================================
// PREDICTIONS
// =============================================================================

/// Skin-lesion classification. `confidence` is already a percentage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkinPrediction {
    #[serde(rename = "type")]
    pub kind: String,
    pub confidence: f64,
    pub risk_level: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub class_code: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SkinPredictionResponse {
    pub prediction: SkinPrediction,
}

/// Genetic risk assessment. `risk_score` is a percentage.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GeneticPrediction {
    pub risk_level: String,
    pub risk_score: f64,
    #[serde(default)]
    pub findings: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub markers_analyzed: u32,
}

// =============================================================================
// RESEARCH
// =============================================================================

/// Research rows use camelCase keys; snake_case spellings are accepted too.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordVitals {
    #[serde(default, alias = "blood_pressure")]
    pub blood_pressure: String,
    #[serde(default, alias = "heart_rate")]
    pub heart_rate: String,
    #[serde(default)]
    pub temperature: String,
    #[serde(default, alias = "oxygen_level")]
    pub oxygen_level: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnaAnalysis {
    #[serde(default)]
    pub findings: String,
    #[serde(default, alias = "risk_factors")]
    pub risk_factors: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Genetics {
    #[serde(default, alias = "dna_analysis")]
    pub dna_analysis: DnaAnalysis,
    #[serde(default, alias = "genetic_markers")]
    pub genetic_markers: Vec<String>,
}

/// One anonymized patient row on the research dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchRecord {
    pub id: String,
    pub age: u32,
    pub gender: String,
    pub condition: String,
    #[serde(default)]
    pub vitals: RecordVitals,
    #[serde(default)]
    pub genetics: Genetics,
    #[serde(default, alias = "dicom_studies")]
    pub dicom_studies: u32,
}
