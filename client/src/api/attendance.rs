use protocol::{ApiEnvelope, ListQuery};
use serde::Serialize;

use crate::error::Result;
use crate::pipeline::{path_id, ApiClient};

pub struct AttendanceApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AttendanceApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn mark<B: Serialize>(&self, register: &B) -> Result<ApiEnvelope> {
        self.client.post("/attendance", register).await
    }

    pub async fn list(&self, query: &ListQuery) -> Result<ApiEnvelope> {
        self.client.get("/attendance", query).await
    }

    pub async fn update<B: Serialize>(&self, id: &str, record: &B) -> Result<ApiEnvelope> {
        self.client
            .put(&format!("/attendance/{}", path_id(id)?), record)
            .await
    }

    pub async fn report(&self, query: &ListQuery) -> Result<ApiEnvelope> {
        self.client.get("/attendance/report", query).await
    }
}
