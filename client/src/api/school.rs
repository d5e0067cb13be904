use protocol::ApiEnvelope;
use serde::Serialize;

use crate::error::Result;
use crate::pipeline::{path_id, ApiClient, PendingRequest};

pub struct SchoolApi<'a> {
    client: &'a ApiClient,
}

impl<'a> SchoolApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn profile(&self) -> Result<ApiEnvelope> {
        self.client.send(PendingRequest::get("/school/profile")).await
    }

    pub async fn create_profile<B: Serialize>(&self, profile: &B) -> Result<ApiEnvelope> {
        self.client.post("/school/profile", profile).await
    }

    pub async fn update_profile<B: Serialize>(&self, id: &str, profile: &B) -> Result<ApiEnvelope> {
        self.client
            .put(&format!("/school/profile/{}", path_id(id)?), profile)
            .await
    }
}
