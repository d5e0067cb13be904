use protocol::{ApiEnvelope, ListQuery};
use reqwest::Method;
use serde::Serialize;

use crate::error::Result;
use crate::pipeline::{path_id, ApiClient, PendingRequest};

/// Account management. The backend only honours these for super admins.
pub struct UsersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<ApiEnvelope> {
        self.client.get("/users", query).await
    }

    pub async fn get(&self, id: &str) -> Result<ApiEnvelope> {
        self.client
            .send(PendingRequest::get(format!("/users/{}", path_id(id)?)))
            .await
    }

    pub async fn update<B: Serialize>(&self, id: &str, user: &B) -> Result<ApiEnvelope> {
        self.client
            .put(&format!("/users/{}", path_id(id)?), user)
            .await
    }

    pub async fn update_permissions<B: Serialize>(
        &self,
        id: &str,
        permissions: &B,
    ) -> Result<ApiEnvelope> {
        self.client
            .put(&format!("/users/{}/permissions", path_id(id)?), permissions)
            .await
    }

    pub async fn toggle_status(&self, id: &str) -> Result<ApiEnvelope> {
        let path = format!("/users/{}/toggle-status", path_id(id)?);
        self.client
            .send(PendingRequest::action(Method::PUT, path))
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<ApiEnvelope> {
        self.client.delete(&format!("/users/{}", path_id(id)?)).await
    }
}
