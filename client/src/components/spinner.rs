//! Loading indicator shown while data or the session is pending.

use leptos::prelude::*;

#[component]
pub fn Spinner() -> impl IntoView {
    view! {
        <div class="loading-spinner" role="status" aria-live="polite">
            <div class="spinner"></div>
            <span class="loading-spinner__label">"Loading..."</span>
        </div>
    }
}
