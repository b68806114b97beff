use super::*;
use crate::routing::table::RouteId;
use crate::state::session::SessionStore;
use crate::util::storage::MemoryStorage;

fn rendered(outcome: &Outcome) -> Option<RouteId> {
    match outcome {
        Outcome::Render(m) => Some(m.id),
        Outcome::Redirect(_) => None,
    }
}

fn redirect_path(outcome: &Outcome) -> Option<&'static str> {
    match outcome {
        Outcome::Redirect(target) => Some(target.path),
        Outcome::Render(_) => None,
    }
}

// =============================================================
// Scenarios
// =============================================================

#[test]
fn hospital_login_then_research_redirects_to_patients() {
    let store = SessionStore::new(MemoryStorage::new());
    store.login(Role::Hospital);
    let outcome = navigate("/research", store.current());
    assert_eq!(redirect_path(&outcome), Some("/patients"));
}

#[test]
fn no_login_then_patients_redirects_to_login() {
    let store = SessionStore::new(MemoryStorage::new());
    let outcome = navigate("/patients", store.current());
    assert_eq!(outcome, Outcome::Redirect(Target::login(Some("/patients".to_owned()))));
    assert_eq!(redirect_path(&outcome), Some("/"));
}

#[test]
fn researcher_login_then_predictions_redirects_to_research() {
    let store = SessionStore::new(MemoryStorage::new());
    store.login(Role::Researcher);
    let outcome = navigate("/predictions", store.current());
    assert_eq!(redirect_path(&outcome), Some("/research"));
}

#[test]
fn unmapped_path_without_session_redirects_to_login() {
    let outcome = navigate("/nonexistent", Session::Anonymous);
    assert_eq!(outcome, Outcome::Redirect(Target::login(None)));
}

#[test]
fn unmapped_path_with_session_still_redirects_to_login() {
    for role in Role::ALL {
        let outcome = navigate("/nonexistent", Session::Authenticated(role));
        assert_eq!(outcome, Outcome::Redirect(Target::login(None)));
    }
}

#[test]
fn logout_then_protected_path_redirects_to_login() {
    let store = SessionStore::new(MemoryStorage::new());
    store.login(Role::Hospital);
    store.logout();
    assert_eq!(redirect_path(&navigate("/patients/add", store.current())), Some("/"));
}

// =============================================================
// Public and protected rendering
// =============================================================

#[test]
fn public_routes_render_for_everyone() {
    for session in [Session::Anonymous, Session::Authenticated(Role::Hospital), Session::Authenticated(Role::Researcher)] {
        assert_eq!(rendered(&navigate("/", session)), Some(RouteId::Login));
        assert_eq!(rendered(&navigate("/register", session)), Some(RouteId::Register));
    }
}

#[test]
fn hospital_renders_patient_pages() {
    let session = Session::Authenticated(Role::Hospital);
    assert_eq!(rendered(&navigate("/patients", session)), Some(RouteId::PatientList));
    assert_eq!(rendered(&navigate("/patients/add", session)), Some(RouteId::AddPatient));
    assert_eq!(rendered(&navigate("/patients/3", session)), Some(RouteId::PatientDetail));
    assert_eq!(rendered(&navigate("/predictions", session)), Some(RouteId::Predictions));
}

#[test]
fn researcher_renders_dashboard() {
    let session = Session::Authenticated(Role::Researcher);
    assert_eq!(rendered(&navigate("/research", session)), Some(RouteId::Research));
}

// =============================================================
// Target
// =============================================================

#[test]
fn target_href_encodes_resume_path() {
    assert_eq!(Target::login(Some("/patients/3".to_owned())).href(), "/?next=%2Fpatients%2F3");
    assert_eq!(Target::login(None).href(), "/");
    assert_eq!(Target::to("/research").href(), "/research");
}

// =============================================================
// resume_target / landing
// =============================================================

#[test]
fn resume_target_honors_allowed_path() {
    assert_eq!(resume_target(Some("/patients/3"), Role::Hospital), "/patients/3");
    assert_eq!(resume_target(Some("/research"), Role::Researcher), "/research");
}

#[test]
fn resume_target_falls_back_for_disallowed_path() {
    assert_eq!(resume_target(Some("/research"), Role::Hospital), "/patients");
    assert_eq!(resume_target(Some("/predictions"), Role::Researcher), "/research");
}

#[test]
fn resume_target_ignores_public_unknown_and_foreign_paths() {
    assert_eq!(resume_target(Some("/"), Role::Hospital), "/patients");
    assert_eq!(resume_target(Some("/register"), Role::Hospital), "/patients");
    assert_eq!(resume_target(Some("/nonexistent"), Role::Hospital), "/patients");
    assert_eq!(resume_target(Some("//evil.example/patients"), Role::Hospital), "/patients");
    assert_eq!(resume_target(Some("https://evil.example"), Role::Researcher), "/research");
    assert_eq!(resume_target(None, Role::Researcher), "/research");
}

#[test]
fn landing_sends_signed_in_users_home() {
    assert_eq!(landing(Session::Anonymous), None);
    assert_eq!(landing(Session::Authenticated(Role::Hospital)), Some("/patients"));
    assert_eq!(landing(Session::Authenticated(Role::Researcher)), Some("/research"));
}

#[test]
fn after_logout_drops_resume_from_login_redirect() {
    let outcome = after_logout(navigate("/patients", Session::Anonymous));
    assert_eq!(outcome, Outcome::Redirect(Target::login(None)));
    match outcome {
        Outcome::Redirect(target) => assert_eq!(target.href(), "/"),
        Outcome::Render(_) => panic!("expected redirect"),
    }
}

#[test]
fn after_logout_leaves_other_outcomes_alone() {
    let home = navigate("/research", Session::Authenticated(Role::Hospital));
    assert_eq!(after_logout(home.clone()), home);
    let login_page = navigate("/", Session::Anonymous);
    assert_eq!(after_logout(login_page.clone()), login_page);
}
