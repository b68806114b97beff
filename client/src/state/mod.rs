//! Shared application state.
//!
//! DESIGN
//! ======
//! `session` is the only global state: who is signed in and with which role.
//! Page data (patient lists, predictions, research rows) is fetched per page
//! and lives in that page's local signals.

pub mod session;
