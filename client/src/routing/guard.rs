//! Route guard: may this session view this path?
//!
//! The checks run in a fixed order and the first hit wins:
//! 1. anonymous sessions go to login, carrying the requested path;
//! 2. researchers outside the research area go to the research home;
//! 3. hospital staff inside the research area go to the patient list;
//! 4. everything else renders.
//!
//! The research area is a plain string prefix, so `/researchers` counts too.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use super::table::RESEARCH_PREFIX;
use crate::state::session::{Role, Session};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Allow,
    /// No session. `from` is the path the user asked for.
    RedirectToLogin { from: String },
    /// Signed in, but the role may not view the path.
    RedirectToHome(Role),
}

#[must_use]
pub fn in_research_area(path: &str) -> bool {
    path.starts_with(RESEARCH_PREFIX)
}

#[must_use]
pub fn check(path: &str, session: Session) -> Decision {
    let role = match session {
        Session::Anonymous => return Decision::RedirectToLogin { from: path.to_owned() },
        Session::Authenticated(role) => role,
    };
    match role {
        Role::Researcher if !in_research_area(path) => Decision::RedirectToHome(Role::Researcher),
        Role::Hospital if in_research_area(path) => Decision::RedirectToHome(Role::Hospital),
        _ => Decision::Allow,
    }
}
