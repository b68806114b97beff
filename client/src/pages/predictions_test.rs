use super::*;

#[test]
fn risk_class_maps_levels() {
    assert_eq!(risk_class("High"), "prediction-risk risk-high");
    assert_eq!(risk_class(" moderate "), "prediction-risk risk-medium");
    assert_eq!(risk_class("Low"), "prediction-risk risk-low");
}

#[test]
fn unknown_risk_level_gets_base_class() {
    assert_eq!(risk_class("Unknown"), "prediction-risk");
    assert_eq!(risk_class(""), "prediction-risk");
}
