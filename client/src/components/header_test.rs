use super::*;

#[test]
fn guests_see_login_and_register() {
    let labels: Vec<_> = nav_links(Session::Anonymous).iter().map(|l| l.label).collect();
    assert_eq!(labels, vec!["Login", "Register"]);
}

#[test]
fn hospital_staff_see_patient_pages() {
    let hrefs: Vec<_> = nav_links(Session::Authenticated(Role::Hospital)).iter().map(|l| l.href).collect();
    assert_eq!(hrefs, vec!["/patients", "/patients/add", "/predictions"]);
}

#[test]
fn researchers_see_only_the_dashboard() {
    let links = nav_links(Session::Authenticated(Role::Researcher));
    assert_eq!(links, &[NavLink { label: "Research Dashboard", href: "/research" }]);
}

#[test]
fn every_link_is_reachable_for_its_viewer() {
    for session in [Session::Anonymous, Session::Authenticated(Role::Hospital), Session::Authenticated(Role::Researcher)] {
        for link in nav_links(session) {
            assert!(
                matches!(crate::routing::navigate(link.href, session), crate::routing::Outcome::Render(_)),
                "{} should render for {session:?}",
                link.href
            );
        }
    }
}

#[test]
fn logo_points_to_role_home() {
    assert_eq!(logo_href(Session::Anonymous), "/");
    assert_eq!(logo_href(Session::Authenticated(Role::Hospital)), "/patients");
    assert_eq!(logo_href(Session::Authenticated(Role::Researcher)), "/research");
}
