use super::*;

fn patient(id: i64, name: &str, age: u32, status: &str, condition: Option<&str>, diagnosis: Option<&str>) -> Patient {
    Patient {
        id,
        name: name.to_owned(),
        age,
        gender: "female".to_owned(),
        status: status.to_owned(),
        condition: condition.map(str::to_owned),
        diagnosis: diagnosis.map(str::to_owned),
        treatment: None,
        medical_history: None,
        vitals: None,
        hospital_id: None,
    }
}

fn sample() -> Vec<Patient> {
    vec![
        patient(1, "Zara Khan", 54, "active", Some("Hypertension"), None),
        patient(2, "amir Das", 31, "critical", None, Some("Pneumonia")),
        patient(3, "Lena Ortiz", 67, "recovered", Some("Diabetes"), Some("Type 2")),
    ]
}

fn names(list: &[Patient]) -> Vec<&str> {
    list.iter().map(|p| p.name.as_str()).collect()
}

#[test]
fn status_filter_parse_falls_back_to_all() {
    assert_eq!(StatusFilter::parse("critical"), StatusFilter::Critical);
    assert_eq!(StatusFilter::parse("bogus"), StatusFilter::All);
}

#[test]
fn empty_search_keeps_everyone_sorted_by_name() {
    let list = visible_patients(&sample(), "  ", StatusFilter::All, SortKey::Name, SortOrder::Asc);
    assert_eq!(names(&list), vec!["amir Das", "Lena Ortiz", "Zara Khan"]);
}

#[test]
fn search_checks_condition_and_diagnosis() {
    let data = sample();
    assert_eq!(names(&visible_patients(&data, "HYPER", StatusFilter::All, SortKey::Name, SortOrder::Asc)), vec![
        "Zara Khan"
    ]);
    assert_eq!(names(&visible_patients(&data, "pneu", StatusFilter::All, SortKey::Name, SortOrder::Asc)), vec![
        "amir Das"
    ]);
}

#[test]
fn status_filter_narrows_list() {
    let list = visible_patients(&sample(), "", StatusFilter::Critical, SortKey::Name, SortOrder::Asc);
    assert_eq!(names(&list), vec!["amir Das"]);
    assert!(visible_patients(&sample(), "", StatusFilter::Inactive, SortKey::Name, SortOrder::Asc).is_empty());
}

#[test]
fn age_sort_descending() {
    let list = visible_patients(&sample(), "", StatusFilter::All, SortKey::Age, SortOrder::Desc);
    assert_eq!(list.iter().map(|p| p.age).collect::<Vec<_>>(), vec![67, 54, 31]);
}
