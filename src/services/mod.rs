//! Host-side services behind the HTTP handlers.

pub mod accounts;
