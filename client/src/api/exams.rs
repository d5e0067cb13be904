use protocol::{ApiEnvelope, ListQuery};
use reqwest::Method;
use serde::Serialize;

use crate::error::Result;
use crate::pipeline::{path_id, ApiClient, PendingRequest};

pub struct ExamsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ExamsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<ApiEnvelope> {
        self.client.get("/exams", query).await
    }

    pub async fn get(&self, id: &str) -> Result<ApiEnvelope> {
        self.client
            .send(PendingRequest::get(format!("/exams/{}", path_id(id)?)))
            .await
    }

    pub async fn create<B: Serialize>(&self, exam: &B) -> Result<ApiEnvelope> {
        self.client.post("/exams", exam).await
    }

    pub async fn update<B: Serialize>(&self, id: &str, exam: &B) -> Result<ApiEnvelope> {
        self.client
            .put(&format!("/exams/{}", path_id(id)?), exam)
            .await
    }

    pub async fn publish(&self, id: &str) -> Result<ApiEnvelope> {
        let path = format!("/exams/{}/publish", path_id(id)?);
        self.client
            .send(PendingRequest::action(Method::PUT, path))
            .await
    }

    // Results

    pub async fn results(&self, query: &ListQuery) -> Result<ApiEnvelope> {
        self.client.get("/exams/results/all", query).await
    }

    pub async fn create_result<B: Serialize>(&self, result: &B) -> Result<ApiEnvelope> {
        self.client.post("/exams/results", result).await
    }

    pub async fn update_result<B: Serialize>(&self, id: &str, result: &B) -> Result<ApiEnvelope> {
        self.client
            .put(&format!("/exams/results/{}", path_id(id)?), result)
            .await
    }

    pub async fn publish_results<B: Serialize>(&self, selection: &B) -> Result<ApiEnvelope> {
        self.client.post("/exams/results/publish", selection).await
    }
}
