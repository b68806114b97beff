use super::*;

#[test]
fn resolves_public_routes() {
    assert_eq!(resolve("/").map(|m| m.id), Some(RouteId::Login));
    assert_eq!(resolve("/register").map(|m| m.id), Some(RouteId::Register));
}

#[test]
fn resolves_patient_routes() {
    assert_eq!(resolve("/patients").map(|m| m.id), Some(RouteId::PatientList));
    assert_eq!(resolve("/patients/add").map(|m| m.id), Some(RouteId::AddPatient));
    assert_eq!(resolve("/predictions").map(|m| m.id), Some(RouteId::Predictions));
}

#[test]
fn add_takes_precedence_over_id_param() {
    let m = resolve("/patients/add").unwrap();
    assert_eq!(m.id, RouteId::AddPatient);
    assert!(m.params.is_empty());
}

#[test]
fn captures_patient_id() {
    let m = resolve("/patients/42").unwrap();
    assert_eq!(m.id, RouteId::PatientDetail);
    assert_eq!(m.param("id"), Some("42"));
    assert_eq!(m.param("other"), None);
}

#[test]
fn trailing_slash_and_query_are_ignored() {
    assert_eq!(resolve("/patients/").map(|m| m.id), Some(RouteId::PatientList));
    assert_eq!(resolve("/research?condition=all").map(|m| m.id), Some(RouteId::Research));
    assert_eq!(resolve("/?next=%2Fpatients").map(|m| m.id), Some(RouteId::Login));
}

#[test]
fn unknown_paths_do_not_resolve() {
    assert_eq!(resolve("/nonexistent"), None);
    assert_eq!(resolve("/patients/1/scans"), None);
    assert_eq!(resolve("/researchers"), None);
    assert_eq!(resolve("/login"), None);
    assert_eq!(resolve(""), None);
}

#[test]
fn empty_param_segment_does_not_match() {
    assert_eq!(resolve("/patients//"), None);
}

#[test]
fn access_rules_match_route_table() {
    assert_eq!(spec(RouteId::Login).map(|r| r.access), Some(Access::Public));
    assert_eq!(spec(RouteId::Register).map(|r| r.access), Some(Access::Public));
    for id in [RouteId::PatientList, RouteId::AddPatient, RouteId::PatientDetail, RouteId::Predictions] {
        let access = spec(id).unwrap().access;
        assert!(access.permits(Role::Hospital), "{id:?}");
        assert!(!access.permits(Role::Researcher), "{id:?}");
    }
    let research = spec(RouteId::Research).unwrap().access;
    assert!(research.permits(Role::Researcher));
    assert!(!research.permits(Role::Hospital));
}

#[test]
fn every_route_id_appears_once() {
    for route in ROUTES {
        assert_eq!(ROUTES.iter().filter(|r| r.id == route.id).count(), 1, "{:?}", route.id);
    }
}

#[test]
fn patient_path_formats_detail_link() {
    assert_eq!(patient_path("7"), "/patients/7");
}
