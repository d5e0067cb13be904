use protocol::{ApiEnvelope, LoginRequest, RegisterRequest, UpdatePasswordRequest, UserProfile};
use reqwest::Method;

use crate::error::{ClientError, Result};
use crate::pipeline::{ApiClient, PendingRequest};

pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Signs in and stores the returned user and token as the session.
    ///
    /// Blank fields fail before the request is sent. The login call itself
    /// never carries a previous token.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<UserProfile> {
        let missing = credentials.missing_fields();
        if !missing.is_empty() {
            return Err(ClientError::Validation(missing.join(", ")));
        }

        log::info!("Login attempt for user: {}", credentials.username);
        let request = PendingRequest::post("/auth/login", credentials)?.public();
        // A 401 here means bad credentials, not an expired session.
        let envelope: ApiEnvelope<UserProfile> =
            self.client.send_as(request).await.map_err(|err| match err {
                ClientError::Unauthorized(message) => ClientError::Rejected(message),
                other => other,
            })?;

        if !envelope.success {
            return Err(ClientError::Rejected(
                envelope.message.unwrap_or_else(|| "Login failed".to_string()),
            ));
        }

        let token = envelope
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ClientError::Rejected("login response carried no token".to_string()))?;
        let user = envelope
            .data
            .ok_or_else(|| ClientError::Rejected("login response carried no user".to_string()))?;

        self.client.session().set_session(user.clone(), token)?;
        log::info!("Successful login for user: {}", user.username);
        Ok(user)
    }

    pub async fn register(&self, user: &RegisterRequest) -> Result<ApiEnvelope> {
        self.client.post("/auth/register", user).await
    }

    /// Current user as the backend sees it. The stored session is left as is.
    pub async fn me(&self) -> Result<ApiEnvelope<UserProfile>> {
        self.client.send_as(PendingRequest::get("/auth/me")).await
    }

    pub async fn update_password(&self, change: &UpdatePasswordRequest) -> Result<ApiEnvelope> {
        if change.new_password.is_empty() {
            return Err(ClientError::Validation("New password is required".to_string()));
        }
        self.client.put("/auth/update-password", change).await
    }

    /// Tells the backend, then drops the local session whatever it answered.
    pub async fn logout(&self) -> Result<()> {
        if self.client.session().is_authenticated() {
            match self
                .client
                .send(PendingRequest::action(Method::POST, "/auth/logout"))
                .await
            {
                Ok(_) | Err(ClientError::Unauthorized(_)) => {}
                Err(err) => log::warn!("Backend logout failed: {}", err),
            }
        }

        self.client.session().clear_session()
    }
}
