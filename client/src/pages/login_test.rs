use super::*;

#[test]
fn login_request_trims_email() {
    let request = login_request("  hospital@demo.com ", "password", Role::Hospital).unwrap();
    assert_eq!(request.email, "hospital@demo.com");
    assert_eq!(request.password, "password");
    assert_eq!(request.role, Role::Hospital);
}

#[test]
fn login_request_requires_both_fields() {
    assert!(login_request("", "password", Role::Hospital).is_err());
    assert!(login_request("a@b.com", "", Role::Researcher).is_err());
}

#[test]
fn demo_credentials_follow_role() {
    assert_eq!(demo_credentials(Role::Hospital), ("hospital@demo.com".to_owned(), "password"));
    assert_eq!(demo_credentials(Role::Researcher), ("researcher@demo.com".to_owned(), "password"));
}

#[test]
fn rejected_credentials_show_invalid_message() {
    let err = ApiError::Status { status: 401, message: "nope".to_owned() };
    assert_eq!(login_error_message(&err), "Invalid credentials");
}

#[test]
fn other_failures_show_generic_message() {
    assert_eq!(login_error_message(&ApiError::Network("down".to_owned())), "Login failed. Please try again.");
    let err = ApiError::Status { status: 500, message: "boom".to_owned() };
    assert_eq!(login_error_message(&err), "Login failed. Please try again.");
}
