//! Networking modules for the patient REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the HTTP calls and `types` defines the shared wire schema.

pub mod api;
pub mod types;
