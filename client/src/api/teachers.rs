use protocol::{ApiEnvelope, ListQuery};
use serde::Serialize;

use crate::error::Result;
use crate::pipeline::{path_id, ApiClient, PendingRequest};

pub struct TeachersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> TeachersApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<ApiEnvelope> {
        self.client.get("/teachers", query).await
    }

    pub async fn get(&self, id: &str) -> Result<ApiEnvelope> {
        self.client
            .send(PendingRequest::get(format!("/teachers/{}", path_id(id)?)))
            .await
    }

    pub async fn create<B: Serialize>(&self, teacher: &B) -> Result<ApiEnvelope> {
        self.client.post("/teachers", teacher).await
    }

    pub async fn update<B: Serialize>(&self, id: &str, teacher: &B) -> Result<ApiEnvelope> {
        self.client
            .put(&format!("/teachers/{}", path_id(id)?), teacher)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<ApiEnvelope> {
        self.client
            .delete(&format!("/teachers/{}", path_id(id)?))
            .await
    }

    pub async fn assign_subjects<B: Serialize>(&self, id: &str, subjects: &B) -> Result<ApiEnvelope> {
        self.client
            .put(&format!("/teachers/{}/assign-subjects", path_id(id)?), subjects)
            .await
    }

    pub async fn assign_classes<B: Serialize>(&self, id: &str, classes: &B) -> Result<ApiEnvelope> {
        self.client
            .put(&format!("/teachers/{}/assign-classes", path_id(id)?), classes)
            .await
    }
}
