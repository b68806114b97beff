//! REST API helpers for the patient backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, relative to `/api`
//! so the host server can forward them to the backend.
//! Server-side (SSR): stubs returning `ApiError::Unavailable` since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>`. Non-2xx responses carry the
//! backend's `detail`/`error` message when it sends one, so pages can show
//! it verbatim.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{
    GeneticPrediction, LoginRequest, LoginResponse, NewPatient, Patient, PatientUpdate, RegisterRequest,
    ResearchRecord, Scan, SkinPrediction, Vitals,
};
use crate::util::upload::Upload;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Fields sent with a scan file besides the file itself.
#[derive(Clone, Debug)]
pub struct ScanUpload<'a> {
    pub about: String,
    pub scan_type: &'static str,
    pub file: &'a Upload,
    pub prediction: Option<&'a SkinPrediction>,
}

pub const API_PREFIX: &str = "/api";

#[cfg(any(test, feature = "hydrate"))]
fn endpoint(path: &str) -> String {
    format!("{API_PREFIX}{path}")
}

#[cfg(any(test, feature = "hydrate"))]
fn patient_endpoint(id: &str) -> String {
    endpoint(&format!("/patients/{}", urlencoding::encode(id)))
}

#[cfg(any(test, feature = "hydrate"))]
fn research_data_endpoint(condition: Option<&str>) -> String {
    match condition {
        Some(c) if c != crate::util::export::ALL_CONDITIONS => {
            endpoint(&format!("/research/data?condition={}", urlencoding::encode(c)))
        }
        _ => endpoint("/research/data"),
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn status_error(status: u16, message: Option<String>) -> ApiError {
    ApiError::Status { status, message: message.unwrap_or_else(|| format!("request failed: {status}")) }
}

#[cfg(feature = "hydrate")]
mod http {
    use gloo_net::http::{RequestBuilder, Response};
    use serde::de::DeserializeOwned;

    use super::{ApiError, status_error};
    use crate::net::types::ErrorBody;
    use crate::state::session::SessionStore;

    pub(super) fn authorized(builder: RequestBuilder) -> RequestBuilder {
        match SessionStore::browser().token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
            None => builder,
        }
    }

    pub(super) fn network(e: impl std::fmt::Display) -> ApiError {
        ApiError::Network(e.to_string())
    }

    pub(super) fn js(e: wasm_bindgen::JsValue) -> ApiError {
        ApiError::Network(format!("{e:?}"))
    }

    /// Pass 2xx responses through; turn anything else into `ApiError::Status`.
    pub(super) async fn check(resp: Response) -> Result<Response, ApiError> {
        if resp.ok() {
            return Ok(resp);
        }
        let status = resp.status();
        let message = resp.json::<ErrorBody>().await.ok().and_then(ErrorBody::message);
        log::warn!("api: {} answered {status}", resp.url());
        Err(status_error(status, message))
    }

    pub(super) async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub(super) fn form() -> Result<web_sys::FormData, ApiError> {
        web_sys::FormData::new().map_err(js)
    }
}

// =============================================================================
// AUTH
// =============================================================================

/// Check credentials with `POST /api/auth/login`.
///
/// # Errors
///
/// `ApiError::Status` with 401 for rejected credentials, or any transport error.
pub async fn login(request: &LoginRequest) -> Result<LoginResponse, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let req = gloo_net::http::Request::post(&endpoint("/auth/login")).json(request).map_err(http::network)?;
        let resp = http::check(req.send().await.map_err(http::network)?).await?;
        http::decode(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        Err(ApiError::Unavailable)
    }
}

/// Create an account with `POST /api/auth/register`.
///
/// # Errors
///
/// `ApiError::Status` (409 for a taken email) or any transport error.
pub async fn register(request: &RegisterRequest) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let req = gloo_net::http::Request::post(&endpoint("/auth/register")).json(request).map_err(http::network)?;
        http::check(req.send().await.map_err(http::network)?).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        Err(ApiError::Unavailable)
    }
}

// =============================================================================
// PATIENTS
// =============================================================================

/// # Errors
///
/// Any transport, status or decode failure.
pub async fn list_patients() -> Result<Vec<Patient>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let req = http::authorized(gloo_net::http::Request::get(&endpoint("/patients/")));
        let resp = http::check(req.send().await.map_err(http::network)?).await?;
        http::decode(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(ApiError::Unavailable)
    }
}

/// # Errors
///
/// Any transport, status or decode failure (404 for an unknown patient).
pub async fn get_patient(id: &str) -> Result<Patient, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let req = http::authorized(gloo_net::http::Request::get(&patient_endpoint(id)));
        let resp = http::check(req.send().await.map_err(http::network)?).await?;
        http::decode(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        Err(ApiError::Unavailable)
    }
}

/// # Errors
///
/// Any transport, status or decode failure.
pub async fn add_patient(patient: &NewPatient) -> Result<Patient, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let req = http::authorized(gloo_net::http::Request::post(&endpoint("/patients")))
            .json(patient)
            .map_err(http::network)?;
        let resp = http::check(req.send().await.map_err(http::network)?).await?;
        http::decode(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = patient;
        Err(ApiError::Unavailable)
    }
}

/// # Errors
///
/// Any transport, status or decode failure.
pub async fn update_patient(id: &str, update: &PatientUpdate) -> Result<Patient, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let req = http::authorized(gloo_net::http::Request::put(&patient_endpoint(id)))
            .json(update)
            .map_err(http::network)?;
        let resp = http::check(req.send().await.map_err(http::network)?).await?;
        http::decode(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (id, update);
        Err(ApiError::Unavailable)
    }
}

/// # Errors
///
/// Any transport or status failure.
pub async fn update_vitals(id: &str, vitals: &Vitals) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = format!("{}/vitals", patient_endpoint(id));
        let req = http::authorized(gloo_net::http::Request::post(&url)).json(vitals).map_err(http::network)?;
        http::check(req.send().await.map_err(http::network)?).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (id, vitals);
        Err(ApiError::Unavailable)
    }
}

/// # Errors
///
/// Any transport or status failure.
pub async fn delete_patient(id: &str) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let req = http::authorized(gloo_net::http::Request::delete(&patient_endpoint(id)));
        http::check(req.send().await.map_err(http::network)?).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        Err(ApiError::Unavailable)
    }
}

/// Multipart `POST /api/patients/{id}/scans`.
///
/// # Errors
///
/// Any transport, status or decode failure.
pub async fn upload_scan(id: &str, scan: ScanUpload<'_>) -> Result<Scan, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let form = http::form()?;
        form.append_with_str("about", &scan.about).map_err(http::js)?;
        form.append_with_str("scan_type", scan.scan_type).map_err(http::js)?;
        form.append_with_blob_and_filename("scan_file", &scan.file.file, &scan.file.meta.name).map_err(http::js)?;
        if let Some(prediction) = scan.prediction {
            let raw = serde_json::to_string(prediction).map_err(|e| ApiError::Decode(e.to_string()))?;
            form.append_with_str("prediction_result", &raw).map_err(http::js)?;
        }
        let url = format!("{}/scans", patient_endpoint(id));
        let req = http::authorized(gloo_net::http::Request::post(&url)).body(form).map_err(http::network)?;
        let resp = http::check(req.send().await.map_err(http::network)?).await?;
        http::decode(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (id, scan);
        Err(ApiError::Unavailable)
    }
}

/// Multipart `POST /api/patients/{id}/genetic`.
///
/// # Errors
///
/// Any transport or status failure.
pub async fn upload_genetic(id: &str, file: &Upload) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let form = http::form()?;
        form.append_with_blob_and_filename("file", &file.file, &file.meta.name).map_err(http::js)?;
        let url = format!("{}/genetic", patient_endpoint(id));
        let req = http::authorized(gloo_net::http::Request::post(&url)).body(form).map_err(http::network)?;
        http::check(req.send().await.map_err(http::network)?).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (id, file);
        Err(ApiError::Unavailable)
    }
}

/// Bulk import from a spreadsheet; returns the created patients.
///
/// # Errors
///
/// Any transport, status or decode failure.
pub async fn upload_patients(file: &Upload) -> Result<Vec<Patient>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let form = http::form()?;
        form.append_with_blob_and_filename("file", &file.file, &file.meta.name).map_err(http::js)?;
        let req = http::authorized(gloo_net::http::Request::post(&endpoint("/patients/upload")))
            .body(form)
            .map_err(http::network)?;
        let resp = http::check(req.send().await.map_err(http::network)?).await?;
        http::decode(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = file;
        Err(ApiError::Unavailable)
    }
}

// =============================================================================
// PREDICTIONS
// =============================================================================

/// # Errors
///
/// Any transport, status or decode failure.
pub async fn predict_skin(image: &Upload) -> Result<SkinPrediction, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let form = http::form()?;
        form.append_with_blob_and_filename("file", &image.file, &image.meta.name).map_err(http::js)?;
        let req = http::authorized(gloo_net::http::Request::post(&endpoint("/ml/predict/skin")))
            .header("Accept", "application/json")
            .body(form)
            .map_err(http::network)?;
        let resp = http::check(req.send().await.map_err(http::network)?).await?;
        let body: super::types::SkinPredictionResponse = http::decode(resp).await?;
        Ok(body.prediction)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = image;
        Err(ApiError::Unavailable)
    }
}

/// # Errors
///
/// Any transport, status or decode failure.
pub async fn predict_genetic(sheet: &Upload) -> Result<GeneticPrediction, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let form = http::form()?;
        form.append_with_blob_and_filename("file", &sheet.file, &sheet.meta.name).map_err(http::js)?;
        let req = http::authorized(gloo_net::http::Request::post(&endpoint("/ml/predict/genetic")))
            .body(form)
            .map_err(http::network)?;
        let resp = http::check(req.send().await.map_err(http::network)?).await?;
        http::decode(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = sheet;
        Err(ApiError::Unavailable)
    }
}

// =============================================================================
// RESEARCH
// =============================================================================

/// Anonymized records, optionally narrowed to one condition server-side.
///
/// # Errors
///
/// Any transport, status or decode failure.
pub async fn research_data(condition: Option<&str>) -> Result<Vec<ResearchRecord>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let req = http::authorized(gloo_net::http::Request::get(&research_data_endpoint(condition)));
        let resp = http::check(req.send().await.map_err(http::network)?).await?;
        http::decode(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = condition;
        Err(ApiError::Unavailable)
    }
}
