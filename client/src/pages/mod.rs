//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (fetching, form state, submit
//! sequences) and delegates shared rendering to `components`. Access control
//! happens before a page is created, in `components::routed_page`.

pub mod add_patient;
pub mod login;
pub mod patient_detail;
pub(crate) mod patient_form;
pub mod patient_list;
pub mod predictions;
pub mod register;
pub mod research;
