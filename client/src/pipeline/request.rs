use protocol::ListQuery;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ClientError, Result};

/// One outbound call, alive for a single request/response cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
    pub method: Method,
    /// Path relative to the API base, starting with `/`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Public endpoints (login) never carry the bearer token.
    pub requires_auth: bool,
}

impl PendingRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            requires_auth: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn post<B: Serialize>(path: impl Into<String>, body: &B) -> Result<Self> {
        Self::new(Method::POST, path).json(body)
    }

    pub fn put<B: Serialize>(path: impl Into<String>, body: &B) -> Result<Self> {
        Self::new(Method::PUT, path).json(body)
    }

    /// PUT/POST without a body, for action endpoints such as `/approve`.
    pub fn action(method: Method, path: impl Into<String>) -> Self {
        Self::new(method, path)
    }

    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body).map_err(ClientError::Serialization)?);
        Ok(self)
    }

    #[must_use]
    pub fn query(mut self, query: &ListQuery) -> Self {
        self.query.extend(query.to_pairs());
        self
    }

    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn public(mut self) -> Self {
        self.requires_auth = false;
        self
    }

    /// Rejects malformed paths before anything touches the network.
    pub fn validate(&self) -> Result<()> {
        let Some(rest) = self.path.strip_prefix('/') else {
            return Err(ClientError::Validation(format!(
                "request path must start with '/': '{}'",
                self.path
            )));
        };

        if rest.is_empty() {
            return Err(ClientError::Validation("request path is empty".to_string()));
        }

        if rest.contains(['?', '#']) {
            return Err(ClientError::Validation(format!(
                "query parameters belong in the query list: '{}'",
                self.path
            )));
        }

        for segment in rest.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." {
                return Err(ClientError::Validation(format!(
                    "invalid segment in request path '{}'",
                    self.path
                )));
            }
        }

        Ok(())
    }
}

/// Checks an identifier before it is spliced into a path.
pub fn path_id(id: &str) -> Result<&str> {
    let trimmed = id.trim();
    if trimmed.is_empty() || trimmed.contains(['/', '?', '#']) || trimmed != id {
        return Err(ClientError::Validation(format!("invalid identifier '{}'", id)));
    }
    Ok(id)
}
