use protocol::{ApiEnvelope, ListQuery};
use serde::Serialize;

use crate::error::Result;
use crate::pipeline::{path_id, ApiClient, PendingRequest};

/// Fee structures and payments.
pub struct FeesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> FeesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn structures(&self, query: &ListQuery) -> Result<ApiEnvelope> {
        self.client.get("/fees/structures", query).await
    }

    pub async fn structure(&self, id: &str) -> Result<ApiEnvelope> {
        self.client
            .send(PendingRequest::get(format!("/fees/structures/{}", path_id(id)?)))
            .await
    }

    pub async fn create_structure<B: Serialize>(&self, structure: &B) -> Result<ApiEnvelope> {
        self.client.post("/fees/structures", structure).await
    }

    pub async fn update_structure<B: Serialize>(&self, id: &str, structure: &B) -> Result<ApiEnvelope> {
        self.client
            .put(&format!("/fees/structures/{}", path_id(id)?), structure)
            .await
    }

    pub async fn payments(&self, query: &ListQuery) -> Result<ApiEnvelope> {
        self.client.get("/fees/payments", query).await
    }

    pub async fn payment(&self, id: &str) -> Result<ApiEnvelope> {
        self.client
            .send(PendingRequest::get(format!("/fees/payments/{}", path_id(id)?)))
            .await
    }

    pub async fn create_payment<B: Serialize>(&self, payment: &B) -> Result<ApiEnvelope> {
        self.client.post("/fees/payments", payment).await
    }

    pub async fn update_payment<B: Serialize>(&self, id: &str, payment: &B) -> Result<ApiEnvelope> {
        self.client
            .put(&format!("/fees/payments/{}", path_id(id)?), payment)
            .await
    }

    /// Per-student payment summary.
    pub async fn payment_summary(&self, query: &ListQuery) -> Result<ApiEnvelope> {
        self.client.get("/fees/payments/summary/student", query).await
    }
}
