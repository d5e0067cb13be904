//! Outbound request pipeline.
//!
//! Every backend call goes through [`ApiClient::send_as`]: the request is
//! validated, the bearer token is attached, and the response is intercepted.
//! A 401 clears the session, then redirects to login, then reaches the
//! caller as [`ClientError::Unauthorized`]. The clear must precede the
//! redirect or the guard would bounce the user back into the protected area.

pub mod request;

pub use request::{path_id, PendingRequest};

use protocol::{ApiEnvelope, ErrorBody, ListQuery};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::router::Navigator;
use crate::session::SessionStore;

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        config: &ClientConfig,
        session: SessionStore,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
            session,
            navigator,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub async fn send(&self, request: PendingRequest) -> Result<ApiEnvelope> {
        self.send_as(request).await
    }

    pub async fn send_as<T: DeserializeOwned>(
        &self,
        request: PendingRequest,
    ) -> Result<ApiEnvelope<T>> {
        request.validate()?;

        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.http.request(request.method.clone(), &url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if request.requires_auth {
            if let Some(token) = self.session.token() {
                builder = builder.bearer_auth(token);
            }
        }

        log::debug!("{} {}", request.method, url);
        let response = builder.send().await.map_err(|err| {
            log::warn!("{} {} failed: {}", request.method, url, err);
            ClientError::Network(err)
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            let body = response.bytes().await.unwrap_or_default();
            return Err(self.handle_unauthorized(failure_message(status, &body)));
        }

        let body = response.bytes().await?;
        if !status.is_success() {
            let message = failure_message(status, &body);
            log::warn!("{} {} returned {}: {}", request.method, url, status, message);
            return Err(ClientError::Api { status, message });
        }

        serde_json::from_slice(&body).map_err(ClientError::Decode)
    }

    pub async fn get(&self, path: &str, query: &ListQuery) -> Result<ApiEnvelope> {
        self.send(PendingRequest::get(path).query(query)).await
    }

    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<ApiEnvelope> {
        self.send(PendingRequest::post(path, body)?).await
    }

    pub async fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<ApiEnvelope> {
        self.send(PendingRequest::put(path, body)?).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiEnvelope> {
        self.send(PendingRequest::delete(path)).await
    }

    fn handle_unauthorized(&self, message: String) -> ClientError {
        log::warn!("Authorization failure: {}. Signing out.", message);

        if let Err(err) = self.session.clear_session() {
            log::error!("Failed to remove stored session after 401: {}", err);
        }
        self.navigator.redirect_to_login();

        ClientError::Unauthorized(message)
    }
}

/// Text for a failed response: the body's message when present, otherwise
/// the status reason.
fn failure_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.text().map(str::to_string))
        .or_else(|| {
            serde_json::from_slice::<Value>(body)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        })
}
