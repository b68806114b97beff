//! Declarative route table.
//!
//! Every page path and its access rule lives here. Route dispatch resolves
//! paths through `resolve`, and the `<Routes>` list in `app.rs` mirrors
//! `ROUTES` so SSR knows which URLs to render.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use crate::state::session::Role;

pub const LOGIN_PATH: &str = "/";
pub const REGISTER_PATH: &str = "/register";
pub const PATIENTS_PATH: &str = "/patients";
pub const ADD_PATIENT_PATH: &str = "/patients/add";
pub const PREDICTIONS_PATH: &str = "/predictions";
/// Every path starting with this string is reserved for researchers.
pub const RESEARCH_PREFIX: &str = "/research";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RouteId {
    Login,
    Register,
    PatientList,
    AddPatient,
    PatientDetail,
    Predictions,
    Research,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Public,
    Roles(&'static [Role]),
}

impl Access {
    #[must_use]
    pub fn permits(self, role: Role) -> bool {
        match self {
            Self::Public => true,
            Self::Roles(roles) => roles.contains(&role),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RouteSpec {
    pub id: RouteId,
    pub pattern: &'static str,
    pub access: Access,
}

const HOSPITAL: &[Role] = &[Role::Hospital];
const RESEARCHER: &[Role] = &[Role::Researcher];

/// Order matters: the first matching pattern wins.
pub const ROUTES: &[RouteSpec] = &[
    RouteSpec { id: RouteId::Login, pattern: LOGIN_PATH, access: Access::Public },
    RouteSpec { id: RouteId::Register, pattern: REGISTER_PATH, access: Access::Public },
    RouteSpec { id: RouteId::PatientList, pattern: PATIENTS_PATH, access: Access::Roles(HOSPITAL) },
    RouteSpec { id: RouteId::AddPatient, pattern: ADD_PATIENT_PATH, access: Access::Roles(HOSPITAL) },
    RouteSpec { id: RouteId::PatientDetail, pattern: "/patients/:id", access: Access::Roles(HOSPITAL) },
    RouteSpec { id: RouteId::Predictions, pattern: PREDICTIONS_PATH, access: Access::Roles(HOSPITAL) },
    RouteSpec { id: RouteId::Research, pattern: RESEARCH_PREFIX, access: Access::Roles(RESEARCHER) },
];

/// A resolved path: which route, plus captured `:name` segments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteMatch {
    pub id: RouteId,
    pub access: Access,
    pub params: Vec<(&'static str, String)>,
}

impl RouteMatch {
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.iter().find(|(key, _)| *key == name).map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
fn spec(id: RouteId) -> Option<&'static RouteSpec> {
    ROUTES.iter().find(|route| route.id == id)
}

/// Resolve `path` against `ROUTES`. Query strings and fragments are ignored,
/// as is a single trailing slash.
#[must_use]
pub fn resolve(path: &str) -> Option<RouteMatch> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    ROUTES.iter().find_map(|route| {
        match_pattern(route.pattern, path).map(|params| RouteMatch { id: route.id, access: route.access, params })
    })
}

fn segments(path: &str) -> Vec<&str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    if trimmed.is_empty() { Vec::new() } else { trimmed.split('/').collect() }
}

fn match_pattern(pattern: &'static str, path: &str) -> Option<Vec<(&'static str, String)>> {
    if !path.starts_with('/') {
        return None;
    }
    let expected = segments(pattern);
    let actual = segments(path);
    if expected.len() != actual.len() {
        return None;
    }
    let mut params = Vec::new();
    for (want, got) in expected.into_iter().zip(actual) {
        if let Some(name) = want.strip_prefix(':') {
            if got.is_empty() {
                return None;
            }
            params.push((name, got.to_owned()));
        } else if want != got {
            return None;
        }
    }
    Some(params)
}

/// Link target for a patient's detail page.
#[must_use]
pub fn patient_path(id: &str) -> String {
    format!("{PATIENTS_PATH}/{id}")
}
