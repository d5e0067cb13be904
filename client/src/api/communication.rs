use protocol::{ApiEnvelope, ListQuery};
use reqwest::Method;
use serde::Serialize;

use crate::error::Result;
use crate::pipeline::{path_id, ApiClient, PendingRequest};

pub struct CommunicationApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CommunicationApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn announcements(&self, query: &ListQuery) -> Result<ApiEnvelope> {
        self.client.get("/communication/announcements", query).await
    }

    pub async fn announcement(&self, id: &str) -> Result<ApiEnvelope> {
        let path = format!("/communication/announcements/{}", path_id(id)?);
        self.client.send(PendingRequest::get(path)).await
    }

    pub async fn create_announcement<B: Serialize>(&self, announcement: &B) -> Result<ApiEnvelope> {
        self.client
            .post("/communication/announcements", announcement)
            .await
    }

    pub async fn update_announcement<B: Serialize>(
        &self,
        id: &str,
        announcement: &B,
    ) -> Result<ApiEnvelope> {
        let path = format!("/communication/announcements/{}", path_id(id)?);
        self.client.put(&path, announcement).await
    }

    pub async fn delete_announcement(&self, id: &str) -> Result<ApiEnvelope> {
        let path = format!("/communication/announcements/{}", path_id(id)?);
        self.client.delete(&path).await
    }

    pub async fn mark_as_read(&self, id: &str) -> Result<ApiEnvelope> {
        let path = format!("/communication/announcements/{}/read", path_id(id)?);
        self.client
            .send(PendingRequest::action(Method::PUT, path))
            .await
    }
}
