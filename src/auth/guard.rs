//! Route guard — enforces the authenticated/anonymous split at the
//! navigation boundary.
//!
//! A pure function of (auth state, location); the guard holds no state of
//! its own and is re-evaluated on every state or location change.

use super::context::AuthState;

/// Routes reachable without a session.
pub const PUBLIC_ROUTES: &[&str] = &["/login"];

pub const LOGIN_ROUTE: &str = "/login";

/// Where an authenticated visitor to `/login` is sent instead.
pub const DEFAULT_LANDING: &str = "/clients";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session still resolving: show a placeholder, perform no redirects.
    Loading,
    /// Navigate to the given route; render nothing.
    Redirect(&'static str),
    /// Location and state agree: render the requested content.
    Render,
}

pub fn decide(state: &AuthState, location: &str) -> GuardDecision {
    match state {
        AuthState::Initializing => GuardDecision::Loading,
        AuthState::Anonymous if !PUBLIC_ROUTES.contains(&location) => {
            GuardDecision::Redirect(LOGIN_ROUTE)
        }
        AuthState::Authenticated(_) if location == LOGIN_ROUTE => {
            GuardDecision::Redirect(DEFAULT_LANDING)
        }
        _ => GuardDecision::Render,
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::AuthUser;

    fn authenticated() -> AuthState {
        AuthState::Authenticated(AuthUser {
            id: 1,
            username: "admin".into(),
            email: "a@x.com".into(),
            is_active: true,
        })
    }

    #[test]
    fn initializing_never_redirects() {
        assert_eq!(
            decide(&AuthState::Initializing, "/clients"),
            GuardDecision::Loading
        );
        assert_eq!(
            decide(&AuthState::Initializing, "/login"),
            GuardDecision::Loading
        );
    }

    #[test]
    fn anonymous_outside_public_routes_redirects_to_login() {
        assert_eq!(
            decide(&AuthState::Anonymous, "/clients"),
            GuardDecision::Redirect("/login")
        );
        assert_eq!(
            decide(&AuthState::Anonymous, "/projects"),
            GuardDecision::Redirect("/login")
        );
    }

    #[test]
    fn anonymous_on_login_renders() {
        assert_eq!(decide(&AuthState::Anonymous, "/login"), GuardDecision::Render);
    }

    #[test]
    fn authenticated_on_login_redirects_to_landing() {
        assert_eq!(
            decide(&authenticated(), "/login"),
            GuardDecision::Redirect(DEFAULT_LANDING)
        );
    }

    #[test]
    fn authenticated_elsewhere_renders() {
        assert_eq!(decide(&authenticated(), "/clients"), GuardDecision::Render);
        assert_eq!(decide(&authenticated(), "/projects"), GuardDecision::Render);
    }
}
