use super::*;
use crate::net::types::Vitals;

#[test]
fn import_message_pluralizes() {
    assert_eq!(import_message(1), "Successfully uploaded 1 patient");
    assert_eq!(import_message(0), "Successfully uploaded 0 patients");
    assert_eq!(import_message(12), "Successfully uploaded 12 patients");
}

#[test]
fn with_vitals_replaces_stale_readings() {
    let record = Patient {
        id: 4,
        name: "Ravi".to_owned(),
        age: 50,
        gender: "male".to_owned(),
        status: "active".to_owned(),
        condition: None,
        diagnosis: None,
        treatment: None,
        medical_history: None,
        vitals: Some(Vitals { heart_rate: Some(60), ..Vitals::default() }),
        hospital_id: None,
    };
    let fresh = Vitals { heart_rate: Some(88), oxygen_level: Some(97.5), ..Vitals::default() };
    let merged = with_vitals(record, fresh.clone());
    assert_eq!(merged.vitals, Some(fresh));
}

#[test]
fn reload_error_message_names_the_failure() {
    let err = crate::net::api::ApiError::Status { status: 404, message: "Patient not found".to_owned() };
    assert_eq!(reload_error_message(&err), "Patients imported, but reloading this record failed: Patient not found");
    let offline = crate::net::api::ApiError::Network("offline".to_owned());
    assert!(reload_error_message(&offline).ends_with("network error: offline"));
}
