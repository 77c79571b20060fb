//! Page-level session gate
//!
//! Runs only in front of the page routes. It looks at whether a `token`
//! cookie is present and never verifies it; the API middleware does that.

use crate::services::auth::SESSION_COOKIE;
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

/// Page routes the gate is mounted on
pub const GATED_PAGES: &[&str] = &["/", "/login", "/register", "/logout", "/profile"];

/// Pages only meaningful without a session
pub const PUBLIC_ONLY: &[&str] = &["/login", "/register"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Pass,
    Redirect(&'static str),
}

/// Decide what to do with a page request
///
/// Signed-in users are sent home from the login and register pages; anyone
/// without a session is sent to login from every other gated page, the
/// home page included.
pub fn gate(path: &str, has_token: bool) -> GateDecision {
    let public_only = PUBLIC_ONLY.contains(&path);

    match (has_token, public_only) {
        (true, true) => GateDecision::Redirect("/"),
        (false, false) => GateDecision::Redirect("/login"),
        _ => GateDecision::Pass,
    }
}

pub async fn session_gate(jar: CookieJar, request: Request, next: Next) -> Response {
    let has_token = jar
        .get(SESSION_COOKIE)
        .is_some_and(|cookie| !cookie.value().is_empty());

    match gate(request.uri().path(), has_token) {
        GateDecision::Pass => next.run(request).await,
        GateDecision::Redirect(to) => {
            tracing::debug!(from = %request.uri().path(), to, "Session gate redirect");
            Redirect::temporary(to).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_in_users_leave_auth_pages() {
        assert_eq!(gate("/login", true), GateDecision::Redirect("/"));
        assert_eq!(gate("/register", true), GateDecision::Redirect("/"));
    }

    #[test]
    fn test_anonymous_users_go_to_login() {
        assert_eq!(gate("/profile", false), GateDecision::Redirect("/login"));
        assert_eq!(gate("/", false), GateDecision::Redirect("/login"));
        assert_eq!(gate("/logout", false), GateDecision::Redirect("/login"));
    }

    #[test]
    fn test_pass_through() {
        assert_eq!(gate("/login", false), GateDecision::Pass);
        assert_eq!(gate("/register", false), GateDecision::Pass);
        for page in ["/", "/profile", "/logout"] {
            assert_eq!(gate(page, true), GateDecision::Pass);
        }
    }

    #[test]
    fn test_gated_pages_cover_public_only() {
        assert!(PUBLIC_ONLY.iter().all(|p| GATED_PAGES.contains(p)));
    }
}
