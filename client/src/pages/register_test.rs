use super::*;

fn form(password: &str, confirm: &str) -> RegistrationForm {
    RegistrationForm {
        name: " Dr. Rao ".to_owned(),
        email: "rao@clinic.org".to_owned(),
        password: password.to_owned(),
        confirm_password: confirm.to_owned(),
    }
}

#[test]
fn valid_form_builds_trimmed_request() {
    let request = validate_registration(&form("Str0ng!pw", "Str0ng!pw"), Role::Researcher).unwrap();
    assert_eq!(request.name, "Dr. Rao");
    assert_eq!(request.email, "rao@clinic.org");
    assert_eq!(request.role, Role::Researcher);
}

#[test]
fn mismatched_passwords_are_rejected() {
    let err = validate_registration(&form("Str0ng!pw", "Str0ng!px"), Role::Hospital).unwrap_err();
    assert_eq!(err, RegisterError::PasswordMismatch);
    assert_eq!(err.to_string(), "Passwords do not match");
}

#[test]
fn missing_fields_come_first() {
    let mut f = form("", "");
    f.name.clear();
    assert_eq!(validate_registration(&f, Role::Hospital), Err(RegisterError::MissingField));
}

#[test]
fn invalid_email_is_rejected() {
    let mut f = form("Str0ng!pw", "Str0ng!pw");
    f.email = "rao@clinic".to_owned();
    assert_eq!(validate_registration(&f, Role::Hospital), Err(RegisterError::InvalidEmail));
}

#[test]
fn weak_password_is_rejected() {
    assert_eq!(validate_registration(&form("password", "password"), Role::Hospital), Err(RegisterError::WeakPassword));
}
