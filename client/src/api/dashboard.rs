use protocol::{ApiEnvelope, ListQuery};

use crate::error::Result;
use crate::pipeline::{ApiClient, PendingRequest};

pub struct DashboardApi<'a> {
    client: &'a ApiClient,
}

impl<'a> DashboardApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn stats(&self) -> Result<ApiEnvelope> {
        self.client.send(PendingRequest::get("/dashboard/stats")).await
    }

    pub async fn attendance_chart(&self, query: &ListQuery) -> Result<ApiEnvelope> {
        self.client.get("/dashboard/attendance-chart", query).await
    }

    pub async fn fee_chart(&self, query: &ListQuery) -> Result<ApiEnvelope> {
        self.client.get("/dashboard/fee-chart", query).await
    }
}
