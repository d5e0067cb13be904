use common::Route;
use std::sync::{Arc, RwLock};

use crate::guard::{GuardDecision, RouteGuard};
use crate::session::SessionStore;

/// Navigation target for the request pipeline.
pub trait Navigator: Send + Sync {
    /// Sends the user to the login entry point.
    fn redirect_to_login(&self);
}

/// Current location of the front-end. Every navigation goes through the
/// guard; the router keeps no state besides the location it settled on.
#[derive(Clone)]
pub struct Router {
    session: SessionStore,
    guard: RouteGuard,
    current: Arc<RwLock<Route>>,
}

impl Router {
    /// Starts at the guard's resolution of the landing view.
    pub fn new(session: SessionStore, guard: RouteGuard) -> Self {
        let initial = guard
            .resolve_route(guard.landing().clone(), session.state())
            .destination()
            .clone();

        Self {
            session,
            guard,
            current: Arc::new(RwLock::new(initial)),
        }
    }

    pub fn navigate(&self, location: &str) -> GuardDecision {
        let decision = self.guard.check(location, &self.session);
        if let GuardDecision::Redirect(target) = &decision {
            log::debug!("Navigation to {} redirected to {}", location, target);
        }

        *self.current.write().unwrap_or_else(|e| e.into_inner()) = decision.destination().clone();
        decision
    }

    pub fn navigate_to(&self, route: &Route) -> GuardDecision {
        self.navigate(&route.path())
    }

    /// Re-runs the guard on the current location, e.g. after the session
    /// changed underneath it.
    pub fn refresh(&self) -> GuardDecision {
        let location = self.current().path();
        self.navigate(&location)
    }

    pub fn current(&self) -> Route {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }
}

impl Navigator for Router {
    fn redirect_to_login(&self) {
        let decision = self.navigate_to(&Route::Login);
        if decision.destination() != &Route::Login {
            log::warn!(
                "Login redirect bounced to {}; session still authenticated",
                decision.destination()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStorage;
    use protocol::{Role, UserProfile};

    fn router() -> (Router, SessionStore) {
        let session = SessionStore::load(Arc::new(MemorySessionStorage::new()));
        (Router::new(session.clone(), RouteGuard::default()), session)
    }

    #[test]
    fn test_anonymous_start_lands_on_login() {
        let (router, _) = router();
        assert_eq!(router.current(), Route::Login);
    }

    #[test]
    fn test_navigation_records_destination() {
        let (router, session) = router();
        session
            .set_session(UserProfile::new("u1", "admin", Role::Admin), "tok1")
            .unwrap();

        let decision = router.navigate("/teachers/t-9");
        assert_eq!(decision, GuardDecision::Render(Route::TeacherDetails("t-9".to_string())));
        assert_eq!(router.current(), Route::TeacherDetails("t-9".to_string()));
    }

    #[test]
    fn test_refresh_after_logout_redirects() {
        let (router, session) = router();
        session
            .set_session(UserProfile::new("u1", "admin", Role::Admin), "tok1")
            .unwrap();
        router.navigate("/exams");

        session.clear_session().unwrap();
        assert_eq!(router.refresh(), GuardDecision::Redirect(Route::Login));
        assert_eq!(router.current(), Route::Login);
    }

    #[test]
    fn test_redirect_to_login_after_clear() {
        let (router, session) = router();
        session
            .set_session(UserProfile::new("u1", "admin", Role::Admin), "tok1")
            .unwrap();
        router.navigate("/fees/structures");

        session.clear_session().unwrap();
        router.redirect_to_login();
        assert_eq!(router.current(), Route::Login);
    }
}
