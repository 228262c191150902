use std::sync::Arc;
use tokio::sync::watch;

use shared_types::Session;

use crate::policy::{path_is_under, RolePolicy};

/// Where anonymous visitors land.
pub const LANDING_PATH: &str = "/";

/// Paths reachable without a session.
pub const PUBLIC_PATHS: [&str; 2] = ["/", "/login"];

/// Outcome of evaluating one navigation attempt. The three variants are
/// the guard's three terminal states.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteDecision {
    /// Authenticated (or public path): navigation proceeds unmodified.
    Allowed,
    /// Anonymous on a protected path: back to the public landing page.
    RedirectToLanding { target: String },
    /// Authenticated but outside the role's surface: silently back to the
    /// role's home. Never an error page.
    RedirectToRoleHome { target: String },
}

impl RouteDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RouteDecision::Allowed)
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            RouteDecision::Allowed => None,
            RouteDecision::RedirectToLanding { target } => Some(target),
            RouteDecision::RedirectToRoleHome { target } => Some(target),
        }
    }
}

/// The only component that produces authorization redirects.
///
/// Nothing is cached: `check` re-reads the live session on every call, so
/// a logout re-gates the very next navigation. Evaluation does no I/O and
/// never fails — unauthorized access always resolves to a redirect.
pub struct RouteGuard {
    policy: Arc<RolePolicy>,
    sessions: watch::Receiver<Option<Session>>,
}

impl RouteGuard {
    pub fn new(policy: Arc<RolePolicy>, sessions: watch::Receiver<Option<Session>>) -> Self {
        Self { policy, sessions }
    }

    /// Evaluate a navigation attempt against the current session.
    pub fn check(&self, path: &str) -> RouteDecision {
        let session = self.sessions.borrow().clone();
        evaluate(&self.policy, session.as_ref(), path)
    }
}

/// Pure decision function of (policy, session, requested path).
pub fn evaluate(policy: &RolePolicy, session: Option<&Session>, path: &str) -> RouteDecision {
    if PUBLIC_PATHS.iter().any(|public| path_is_under(path, public)) {
        return RouteDecision::Allowed;
    }
    let session = match session {
        Some(session) => session,
        None => {
            return RouteDecision::RedirectToLanding {
                target: LANDING_PATH.to_string(),
            }
        }
    };
    if !policy.is_allowed(session.role, path) {
        return RouteDecision::RedirectToRoleHome {
            target: policy.home_path(session.role).to_string(),
        };
    }
    RouteDecision::Allowed
}
