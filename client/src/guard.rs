//! Navigation gate driven by session state.

use common::Route;

use crate::session::{SessionState, SessionStore};

/// Outcome of a navigation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Render(Route),
    Redirect(Route),
}

impl GuardDecision {
    /// The view that ends up on screen.
    pub fn destination(&self) -> &Route {
        match self {
            GuardDecision::Render(route) | GuardDecision::Redirect(route) => route,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, GuardDecision::Redirect(_))
    }
}

/// Stateless gate. Holds only the landing view used for redirects away from
/// login and for unknown locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    landing: Route,
}

impl RouteGuard {
    pub fn new(landing: Route) -> Self {
        Self { landing }
    }

    pub fn landing(&self) -> &Route {
        &self.landing
    }

    /// Resolves a raw location. Unknown locations redirect to the landing
    /// view, which is itself subject to the guard.
    pub fn resolve(&self, location: &str, state: SessionState) -> GuardDecision {
        match Route::parse(location) {
            Some(route) => self.resolve_route(route, state),
            None => {
                let fallback = self.resolve_route(self.landing.clone(), state);
                GuardDecision::Redirect(fallback.destination().clone())
            }
        }
    }

    pub fn resolve_route(&self, route: Route, state: SessionState) -> GuardDecision {
        match state {
            SessionState::Anonymous if route.is_protected() => {
                GuardDecision::Redirect(Route::Login)
            }
            SessionState::Authenticated if route.is_login() => {
                GuardDecision::Redirect(self.landing.clone())
            }
            _ => GuardDecision::Render(route),
        }
    }

    pub fn check(&self, location: &str, session: &SessionStore) -> GuardDecision {
        self.resolve(location, session.state())
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new(Route::LANDING)
    }
}
