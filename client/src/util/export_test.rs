use super::*;
use crate::net::types::{DnaAnalysis, Genetics, RecordVitals};

fn record(id: &str, age: u32, condition: &str, markers: &[&str], studies: u32) -> ResearchRecord {
    ResearchRecord {
        id: id.to_owned(),
        age,
        gender: "Female".to_owned(),
        condition: condition.to_owned(),
        vitals: RecordVitals {
            blood_pressure: "120/80".to_owned(),
            heart_rate: "82".to_owned(),
            temperature: "98.4".to_owned(),
            oxygen_level: "97".to_owned(),
        },
        genetics: Genetics {
            dna_analysis: DnaAnalysis {
                findings: "TCF7L2 gene variant".to_owned(),
                risk_factors: vec!["Insulin resistance".to_owned(), "Obesity".to_owned()],
            },
            genetic_markers: markers.iter().map(|m| (*m).to_owned()).collect(),
        },
        dicom_studies: studies,
    }
}

fn sample() -> Vec<ResearchRecord> {
    vec![
        record("P001", 45, "Hypertension", &["ACE", "AGT"], 3),
        record("P002", 32, "Diabetes Type 2", &["TCF7L2", "ACE"], 2),
        record("P003", 61, "Hypertension", &["ACE"], 1),
    ]
}

#[test]
fn conditions_start_with_all_and_dedupe() {
    assert_eq!(conditions(&sample()), vec!["all", "Hypertension", "Diabetes Type 2"]);
    assert_eq!(conditions(&[]), vec!["all"]);
}

#[test]
fn filter_by_condition_all_keeps_everything() {
    let data = sample();
    assert_eq!(filter_by_condition(&data, ALL_CONDITIONS).len(), 3);
    let ids: Vec<_> = filter_by_condition(&data, "Hypertension").iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["P001", "P003"]);
}

#[test]
fn summarize_computes_figures() {
    let data = sample();
    let rows = filter_by_condition(&data, ALL_CONDITIONS);
    let summary = summarize(&rows);
    assert_eq!(summary.total, 3);
    assert!((summary.average_age.unwrap() - 46.0).abs() < 1e-9);
    assert_eq!(summary.common_markers[0], "ACE");
    assert_eq!(summary.common_markers.len(), 3);
    assert_eq!(summary.dicom_studies, 6);
}

#[test]
fn summarize_empty_has_no_average() {
    let summary = summarize(&[]);
    assert_eq!(summary.total, 0);
    assert_eq!(summary.average_age, None);
}

#[test]
fn risk_factors_are_distinct_and_sorted() {
    let data = sample();
    let rows = filter_by_condition(&data, ALL_CONDITIONS);
    assert_eq!(risk_factors(&rows), vec!["Insulin resistance", "Obesity"]);
}

#[test]
fn csv_has_header_and_joined_lists() {
    let data = sample();
    let rows = filter_by_condition(&data, "Diabetes Type 2");
    let csv = to_csv(&rows).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "ID,Age,Gender,Condition,Blood Pressure,Heart Rate,Temperature,Oxygen Level,Genetic Findings,Risk Factors,Genetic Markers,DICOM Studies"
    );
    assert_eq!(
        lines[1],
        "P002,32,Female,Diabetes Type 2,120/80,82,98.4,97,TCF7L2 gene variant,Insulin resistance; Obesity,TCF7L2; ACE,2"
    );
    assert_eq!(lines.len(), 2);
}

#[test]
fn csv_quotes_fields_with_commas() {
    let mut r = record("P9", 50, "Asthma, severe", &[], 0);
    r.genetics.dna_analysis.risk_factors.clear();
    let csv = to_csv(&[&r]).unwrap();
    assert!(csv.lines().nth(1).unwrap().contains("\"Asthma, severe\""));
}

#[test]
fn json_export_is_pretty_array() {
    let data = sample();
    let rows = filter_by_condition(&data, "Hypertension");
    let json = to_json(&rows).unwrap();
    let parsed: Vec<ResearchRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.len(), 2);
    assert!(json.contains("\n  {"));
}

#[test]
fn export_filename_includes_condition_and_date() {
    assert_eq!(export_filename("all", "2024-05-01", ExportFormat::Csv), "research_data_all_2024-05-01.csv");
    assert_eq!(
        export_filename("Hypertension", "2024-05-01", ExportFormat::Json),
        "research_data_Hypertension_2024-05-01.json"
    );
}

#[test]
fn download_outside_browser_reports_error() {
    assert!(matches!(download("x.csv", "a,b", ExportFormat::Csv), Err(ExportError::Browser(_))));
}

#[test]
fn json_export_uses_camel_case_keys() {
    let data = sample();
    let rows = filter_by_condition(&data, "Diabetes Type 2");
    let value: serde_json::Value = serde_json::from_str(&to_json(&rows).unwrap()).unwrap();
    let row = &value[0];
    assert_eq!(row["dicomStudies"], 2);
    assert_eq!(row["vitals"]["bloodPressure"], "120/80");
    assert_eq!(row["vitals"]["oxygenLevel"], "97");
    assert_eq!(row["genetics"]["geneticMarkers"][0], "TCF7L2");
    assert_eq!(row["genetics"]["dnaAnalysis"]["riskFactors"][1], "Obesity");
    assert!(row.get("dicom_studies").is_none());
}
