use common::{visible_navigation, CapabilityTable, NavEntry};
use protocol::{LoginRequest, UserProfile};
use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::guard::{GuardDecision, RouteGuard};
use crate::pipeline::ApiClient;
use crate::router::{Navigator, Router};
use crate::session::{FileSessionStorage, SessionStorage, SessionStore};

/// Wired client: storage → session → router → request pipeline.
#[derive(Clone)]
pub struct AdminApp {
    config: ClientConfig,
    session: SessionStore,
    router: Router,
    api: ApiClient,
    capabilities: CapabilityTable,
}

impl AdminApp {
    /// Restores the session from the file named in `config`.
    pub fn bootstrap(config: ClientConfig) -> Result<Self> {
        let storage = Arc::new(FileSessionStorage::new(config.session_path.clone()));
        Self::with_storage(config, storage)
    }

    pub fn with_storage(config: ClientConfig, storage: Arc<dyn SessionStorage>) -> Result<Self> {
        let session = SessionStore::load(storage);
        let router = Router::new(session.clone(), RouteGuard::default());
        let navigator: Arc<dyn Navigator> = Arc::new(router.clone());
        let api = ApiClient::new(&config, session.clone(), navigator)?;

        log::info!(
            "Client ready against {} ({:?}, at {})",
            api.base_url(),
            session.state(),
            router.current()
        );

        Ok(Self {
            config,
            session,
            router,
            api,
            capabilities: CapabilityTable::default(),
        })
    }

    #[must_use]
    pub fn with_capabilities(mut self, capabilities: CapabilityTable) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Signs in and moves to the landing view.
    pub async fn login(&self, username: &str, password: &str) -> Result<UserProfile> {
        let user = self
            .api
            .auth()
            .login(&LoginRequest::new(username, password))
            .await?;
        self.router.navigate_to(self.router.guard().landing());
        Ok(user)
    }

    /// Signs out and moves to the login view.
    pub async fn logout(&self) -> Result<()> {
        let cleared = self.api.auth().logout().await;
        self.router.redirect_to_login();
        cleared
    }

    pub fn navigate(&self, location: &str) -> GuardDecision {
        self.router.navigate(location)
    }

    /// Sidebar for the signed-in user; empty when anonymous.
    pub fn navigation(&self) -> Vec<NavEntry> {
        self.session
            .role()
            .map(|role| visible_navigation(&role, &self.capabilities))
            .unwrap_or_default()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}
