//! Navigation policy: route table + guard composition.
//!
//! SYSTEM CONTEXT
//! ==============
//! `navigate` is the single decision point for every URL the app renders.
//! Public routes render directly, protected routes go through `guard::check`,
//! and paths missing from the table fall back to the login page whatever the
//! session says.

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

pub mod guard;
pub mod table;

use guard::Decision;
use table::{Access, LOGIN_PATH, RouteMatch};

use crate::state::session::{Role, Session};

/// Where a redirect goes. `resume` is carried to the login page as `?next=`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    pub path: &'static str,
    pub resume: Option<String>,
}

impl Target {
    #[must_use]
    pub fn to(path: &'static str) -> Self {
        Self { path, resume: None }
    }

    #[must_use]
    pub fn login(resume: Option<String>) -> Self {
        Self { path: LOGIN_PATH, resume }
    }

    #[must_use]
    pub fn href(&self) -> String {
        match &self.resume {
            Some(resume) => format!("{}?next={}", self.path, urlencoding::encode(resume)),
            None => self.path.to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Render(RouteMatch),
    Redirect(Target),
}

#[must_use]
pub fn navigate(path: &str, session: Session) -> Outcome {
    let Some(route) = table::resolve(path) else {
        log::debug!("navigate: no route for {path}, sending to login");
        return Outcome::Redirect(Target::login(None));
    };
    if route.access == Access::Public {
        return Outcome::Render(route);
    }
    match guard::check(path, session) {
        Decision::Allow => Outcome::Render(route),
        Decision::RedirectToLogin { from } => {
            log::debug!("navigate: {from} requires a session");
            Outcome::Redirect(Target::login(Some(from)))
        }
        Decision::RedirectToHome(role) => {
            log::debug!("navigate: {path} is not available to {role}");
            Outcome::Redirect(Target::to(role.home_path()))
        }
    }
}

/// Where to go right after signing in as `role`.
///
/// The carried `next` path is honored only when it names a protected route
/// the new role may open; anything else lands on the role home.
#[must_use]
pub fn resume_target(next: Option<&str>, role: Role) -> String {
    let resumable = next.filter(|path| path.starts_with('/') && !path.starts_with("//")).filter(|path| {
        matches!(
            (table::resolve(path), navigate(path, Session::Authenticated(role))),
            (Some(RouteMatch { access: Access::Roles(_), .. }), Outcome::Render(_))
        )
    });
    resumable.map_or_else(|| role.home_path().to_owned(), str::to_owned)
}

/// A logout drops the resume path from the login redirect, so the page the
/// user left is not offered back.
#[must_use]
pub fn after_logout(outcome: Outcome) -> Outcome {
    match outcome {
        Outcome::Redirect(Target { path: LOGIN_PATH, .. }) => Outcome::Redirect(Target::login(None)),
        other => other,
    }
}

/// Signed-in users skip the login screen.
#[must_use]
pub fn landing(session: Session) -> Option<&'static str> {
    session.role().map(Role::home_path)
}
