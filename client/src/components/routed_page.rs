//! Route dispatch: runs the navigation policy for the current URL and renders
//! the matching page or performs the redirect.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every `<Route>` in `app.rs` renders this component. It re-evaluates
//! whenever the path or the session changes, so a logout on a protected page
//! immediately sends the user back to login.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::components::spinner::Spinner;
use crate::pages::{
    add_patient::AddPatientPage, login::LoginPage, patient_detail::PatientDetailPage,
    patient_list::PatientListPage, predictions::PredictionsPage, register::RegisterPage, research::ResearchPage,
};
use crate::routing::table::{RouteId, RouteMatch};
use crate::routing::{Outcome, after_logout, navigate};
use crate::state::session::SessionContext;

#[component]
pub fn RoutedPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let location = use_location();

    // `None` until the browser has restored the session.
    let outcome = Memo::new(move |_| {
        let current = session.snapshot()?;
        let outcome = location.pathname.with(|path| navigate(path, current));
        Some(if session.signed_out() { after_logout(outcome) } else { outcome })
    });

    let go = use_navigate();
    Effect::new(move || {
        if let Some(Outcome::Redirect(target)) = outcome.get() {
            go(&target.href(), NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    move || match outcome.get() {
        Some(Outcome::Render(route)) => render(&route),
        None | Some(Outcome::Redirect(_)) => view! { <Spinner/> }.into_any(),
    }
}

fn render(route: &RouteMatch) -> AnyView {
    match route.id {
        RouteId::Login => view! { <LoginPage/> }.into_any(),
        RouteId::Register => view! { <RegisterPage/> }.into_any(),
        RouteId::PatientList => view! { <PatientListPage/> }.into_any(),
        RouteId::AddPatient => view! { <AddPatientPage/> }.into_any(),
        RouteId::PatientDetail => {
            let id = route.param("id").unwrap_or_default().to_owned();
            view! { <PatientDetailPage id=id/> }.into_any()
        }
        RouteId::Predictions => view! { <PredictionsPage/> }.into_any(),
        RouteId::Research => view! { <ResearchPage/> }.into_any(),
    }
}
