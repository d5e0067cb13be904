use protocol::{ApiEnvelope, ListQuery};
use reqwest::Method;
use serde::Serialize;

use crate::error::Result;
use crate::pipeline::{path_id, ApiClient, PendingRequest};

pub struct StudentsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> StudentsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<ApiEnvelope> {
        self.client.get("/students", query).await
    }

    pub async fn get(&self, id: &str) -> Result<ApiEnvelope> {
        self.client
            .send(PendingRequest::get(format!("/students/{}", path_id(id)?)))
            .await
    }

    pub async fn create<B: Serialize>(&self, student: &B) -> Result<ApiEnvelope> {
        self.client.post("/students", student).await
    }

    pub async fn update<B: Serialize>(&self, id: &str, student: &B) -> Result<ApiEnvelope> {
        self.client
            .put(&format!("/students/{}", path_id(id)?), student)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<ApiEnvelope> {
        self.client
            .delete(&format!("/students/{}", path_id(id)?))
            .await
    }

    pub async fn update_status<B: Serialize>(&self, id: &str, status: &B) -> Result<ApiEnvelope> {
        self.client
            .put(&format!("/students/{}/status", path_id(id)?), status)
            .await
    }

    pub async fn approve(&self, id: &str) -> Result<ApiEnvelope> {
        let path = format!("/students/{}/approve", path_id(id)?);
        self.client
            .send(PendingRequest::action(Method::PUT, path))
            .await
    }

    pub async fn promote<B: Serialize>(&self, promotion: &B) -> Result<ApiEnvelope> {
        self.client.post("/students/promote", promotion).await
    }
}
