//! Registration page for new hospital staff and researcher accounts.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::types::RegisterRequest;
use crate::pages::login::RoleSelect;
use crate::routing::landing;
use crate::state::session::{Role, SessionContext};
use crate::util::format::{is_strong_password, is_valid_email};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegisterError {
    #[error("Please fill in all fields")]
    MissingField,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password needs 8+ characters with upper and lower case letters, a digit and a symbol")]
    WeakPassword,
}

/// Raw form values as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let form = RwSignal::new(RegistrationForm::default());
    let role = RwSignal::new(Role::Hospital);
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    #[cfg(feature = "hydrate")]
    let navigate = use_navigate();

    let session = expect_context::<SessionContext>();
    let go_home = use_navigate();
    Effect::new(move || {
        if let Some(home) = session.snapshot().and_then(landing) {
            go_home(home, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let request = match validate_registration(&form.get(), role.get()) {
            Ok(request) => request,
            Err(e) => {
                error.set(e.to_string());
                return;
            }
        };
        busy.set(true);
        error.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::register(&request).await {
                    Ok(()) => {
                        log::info!("register: created account for {}", request.email);
                        navigate(crate::routing::table::LOGIN_PATH, NavigateOptions::default());
                    }
                    Err(e) => error.set(format!("Registration failed: {e}")),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = request;
    };

    let field = move |label: &'static str,
                      id: &'static str,
                      kind: &'static str,
                      get: fn(&RegistrationForm) -> String,
                      set: fn(&mut RegistrationForm, String)| {
        view! {
            <div class="form-group">
                <label for=id>{label}</label>
                <input
                    id=id
                    type=kind
                    required
                    prop:value=move || form.with(get)
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| set(f, value));
                    }
                />
            </div>
        }
    };

    view! {
        <div class="register-container">
            <form class="register-form" on:submit=on_submit>
                <h2>"Register"</h2>
                <Show when=move || !error.get().is_empty()>
                    <div class="error-message">{move || error.get()}</div>
                </Show>
                {field("Name", "name", "text", |f| f.name.clone(), |f, v| f.name = v)}
                {field("Email", "email", "email", |f| f.email.clone(), |f, v| f.email = v)}
                {field("Password", "password", "password", |f| f.password.clone(), |f, v| f.password = v)}
                {field(
                    "Confirm Password",
                    "confirmPassword",
                    "password",
                    |f| f.confirm_password.clone(),
                    |f, v| f.confirm_password = v,
                )}
                <div class="form-group">
                    <label for="role">"Role"</label>
                    <RoleSelect role=role/>
                </div>
                <button class="submit-btn" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Registering..." } else { "Register" }}
                </button>
            </form>
        </div>
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// # Errors
///
/// The first rule the form breaks, checked in display order.
pub fn validate_registration(form: &RegistrationForm, role: Role) -> Result<RegisterRequest, RegisterError> {
    let name = form.name.trim();
    let email = form.email.trim();
    if name.is_empty() || email.is_empty() || form.password.is_empty() {
        return Err(RegisterError::MissingField);
    }
    if !is_valid_email(email) {
        return Err(RegisterError::InvalidEmail);
    }
    if form.password != form.confirm_password {
        return Err(RegisterError::PasswordMismatch);
    }
    if !is_strong_password(&form.password) {
        return Err(RegisterError::WeakPassword);
    }
    Ok(RegisterRequest { name: name.to_owned(), email: email.to_owned(), password: form.password.clone(), role })
}
