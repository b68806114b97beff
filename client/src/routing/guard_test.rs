use super::*;
use crate::routing::table::{Access, ROUTES};

const SAMPLE_PATHS: &[&str] = &[
    "/",
    "/register",
    "/patients",
    "/patients/add",
    "/patients/17",
    "/predictions",
    "/research",
    "/research/cohorts",
    "/researchers",
    "/nonexistent",
    "",
];

#[test]
fn anonymous_always_goes_to_login() {
    for path in SAMPLE_PATHS {
        assert_eq!(
            check(path, Session::Anonymous),
            Decision::RedirectToLogin { from: (*path).to_owned() },
            "path {path:?}"
        );
    }
}

#[test]
fn researcher_outside_research_goes_home() {
    let session = Session::Authenticated(Role::Researcher);
    for path in SAMPLE_PATHS.iter().filter(|p| !p.starts_with("/research")) {
        assert_eq!(check(path, session), Decision::RedirectToHome(Role::Researcher), "path {path:?}");
    }
}

#[test]
fn researcher_inside_research_is_allowed() {
    let session = Session::Authenticated(Role::Researcher);
    for path in ["/research", "/research/cohorts", "/researchers"] {
        assert_eq!(check(path, session), Decision::Allow, "path {path:?}");
    }
}

#[test]
fn hospital_inside_research_goes_home() {
    let session = Session::Authenticated(Role::Hospital);
    for path in SAMPLE_PATHS.iter().filter(|p| p.starts_with("/research")) {
        assert_eq!(check(path, session), Decision::RedirectToHome(Role::Hospital), "path {path:?}");
    }
}

#[test]
fn hospital_patient_paths_are_allowed() {
    let session = Session::Authenticated(Role::Hospital);
    for path in ["/patients", "/patients/add", "/patients/17", "/predictions"] {
        assert_eq!(check(path, session), Decision::Allow, "path {path:?}");
    }
}

#[test]
fn redirect_homes_are_role_home_paths() {
    assert_eq!(Role::Researcher.home_path(), "/research");
    assert_eq!(Role::Hospital.home_path(), "/patients");
}

#[test]
fn guard_agrees_with_route_table_roles() {
    for route in ROUTES {
        let Access::Roles(_) = route.access else { continue };
        let path = route.pattern.replace(":id", "1");
        for role in Role::ALL {
            let allowed = check(&path, Session::Authenticated(role)) == Decision::Allow;
            assert_eq!(allowed, route.access.permits(role), "{:?} as {role}", route.id);
        }
    }
}
