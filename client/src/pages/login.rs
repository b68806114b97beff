//! Login page: email, password and role, with demo-account shortcuts.
//!
//! SYSTEM CONTEXT
//! ==============
//! Credentials go to the host's `/api/auth/login`. On success the session is
//! written and the page's own effect moves the user on, either to the page
//! they originally asked for (`?next=`) or to their role home. Users who are
//! already signed in never see the form.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::net::api::ApiError;
use crate::net::types::LoginRequest;
use crate::routing::resume_target;
use crate::state::session::{Role, SessionContext};

pub const DEMO_PASSWORD: &str = "password";

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let query = use_query_map();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let role = RwSignal::new(Role::Hospital);
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    Effect::new(move || {
        let Some(current_role) = session.snapshot().and_then(|s| s.role()) else {
            return;
        };
        let next = query.with(|q| q.get("next"));
        let target = resume_target(next.as_deref(), current_role);
        log::info!("login: continuing to {target}");
        navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let request = match login_request(&email.get(), &password.get(), role.get()) {
            Ok(request) => request,
            Err(message) => {
                error.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        error.set(String::new());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::login(&request).await {
                Ok(resp) => {
                    if let Err(e) = session.login_as(&resp.role, &resp.token) {
                        log::warn!("login: {e}");
                        error.set(LOGIN_FAILED.to_owned());
                    }
                }
                Err(e) => error.set(login_error_message(&e)),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = request;
    };

    let use_demo = move |demo: Role| {
        let (demo_email, demo_password) = demo_credentials(demo);
        email.set(demo_email);
        password.set(demo_password.to_owned());
        role.set(demo);
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"BADAL"</h1>
                <h2>"Login"</h2>
                <Show when=move || !error.get().is_empty()>
                    <div class="error-message">{move || error.get()}</div>
                </Show>
                <form class="login-form" on:submit=on_submit>
                    <div class="form-group">
                        <label for="email">"Email"</label>
                        <input
                            id="email"
                            class="form-input"
                            type="email"
                            required
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            id="password"
                            class="form-input"
                            type="password"
                            required
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="role">"Role"</label>
                        <RoleSelect role=role/>
                    </div>
                    <button class="submit-btn" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Logging in..." } else { "Login" }}
                    </button>
                </form>
                <div class="demo-credentials">
                    <h3>"Demo Login"</h3>
                    <div class="demo-buttons">
                        <button type="button" class="demo-btn" on:click=move |_| use_demo(Role::Hospital)>
                            "Use Hospital Staff Demo"
                        </button>
                        <button type="button" class="demo-btn" on:click=move |_| use_demo(Role::Researcher)>
                            "Use Researcher Demo"
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}

/// Role `<select>` shared by the login and register forms.
#[component]
pub fn RoleSelect(role: RwSignal<Role>) -> impl IntoView {
    view! {
        <select
            id="role"
            class="form-input"
            prop:value=move || role.get().as_str()
            on:change=move |ev| {
                if let Ok(picked) = event_target_value(&ev).parse::<Role>() {
                    role.set(picked);
                }
            }
        >
            {Role::ALL
                .iter()
                .map(|r| view! { <option value=r.as_str()>{r.label()}</option> })
                .collect_view()}
        </select>
    }
}

// =============================================================================
// HELPERS
// =============================================================================

const INVALID_CREDENTIALS: &str = "Invalid credentials";
const LOGIN_FAILED: &str = "Login failed. Please try again.";

fn login_request(email: &str, password: &str, role: Role) -> Result<LoginRequest, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Please enter your email and password");
    }
    Ok(LoginRequest { email: email.to_owned(), password: password.to_owned(), role })
}

fn demo_credentials(role: Role) -> (String, &'static str) {
    (format!("{}@demo.com", role.as_str()), DEMO_PASSWORD)
}

fn login_error_message(error: &ApiError) -> String {
    match error.status() {
        Some(401 | 403) => INVALID_CREDENTIALS.to_owned(),
        _ => LOGIN_FAILED.to_owned(),
    }
}
