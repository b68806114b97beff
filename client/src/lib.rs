//! # client
//!
//! Leptos + WASM frontend for the Badal patient portal.
//!
//! Hospital staff manage patient records, upload scans and run ML predictions;
//! researchers browse and export anonymized data. The crate holds pages,
//! components, the session store, the route table and guard, and the REST
//! client for the patient backend.

#![recursion_limit = "256"]

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod routing;
pub mod state;
pub mod util;

/// Browser entry point: hydrate the server-rendered markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        leptos::logging::warn!("console logger: {e}");
    }
    leptos::mount::hydrate_body(app::App);
}
