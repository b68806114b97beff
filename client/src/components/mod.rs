//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the app chrome and route dispatch while reading the
//! session from Leptos context.

pub mod file_picker;
pub mod header;
pub mod routed_page;
pub mod spinner;
