//! Top header with the logo, role navigation and logout.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reads the session snapshot from context; the link set follows the role so
//! users only see pages the guard would let them open.

#[cfg(test)]
#[path = "header_test.rs"]
mod header_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::routing::table::{ADD_PATIENT_PATH, LOGIN_PATH, PATIENTS_PATH, PREDICTIONS_PATH, REGISTER_PATH, RESEARCH_PREFIX};
use crate::state::session::{Role, Session, SessionContext};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
}

const GUEST_LINKS: &[NavLink] =
    &[NavLink { label: "Login", href: LOGIN_PATH }, NavLink { label: "Register", href: REGISTER_PATH }];

const HOSPITAL_LINKS: &[NavLink] = &[
    NavLink { label: "Patients", href: PATIENTS_PATH },
    NavLink { label: "Add Patient", href: ADD_PATIENT_PATH },
    NavLink { label: "AI Predictions", href: PREDICTIONS_PATH },
];

const RESEARCHER_LINKS: &[NavLink] = &[NavLink { label: "Research Dashboard", href: RESEARCH_PREFIX }];

#[component]
pub fn Header() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let navigate = use_navigate();

    let current = move || session.snapshot().unwrap_or_default();
    let on_logout = move |_| {
        session.logout();
        navigate(LOGIN_PATH, leptos_router::NavigateOptions::default());
    };

    view! {
        <header class="header">
            <div class="header-content">
                <div class="logo">
                    <A href=move || logo_href(current()).to_owned()>"BADAL"</A>
                </div>
                <nav class="nav-links">
                    {move || {
                        nav_links(current())
                            .iter()
                            .map(|link| view! { <A href=link.href attr:class="nav-link">{link.label}</A> })
                            .collect_view()
                    }}
                    <Show when=move || current().is_authenticated()>
                        <button class="logout-btn" on:click=on_logout.clone()>
                            "Logout"
                        </button>
                    </Show>
                </nav>
            </div>
        </header>
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn nav_links(session: Session) -> &'static [NavLink] {
    match session.role() {
        None => GUEST_LINKS,
        Some(Role::Hospital) => HOSPITAL_LINKS,
        Some(Role::Researcher) => RESEARCHER_LINKS,
    }
}

fn logo_href(session: Session) -> &'static str {
    session.role().map_or(LOGIN_PATH, Role::home_path)
}
