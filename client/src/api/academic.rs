use protocol::{ApiEnvelope, ListQuery};
use reqwest::Method;
use serde::Serialize;

use crate::error::Result;
use crate::pipeline::{path_id, ApiClient, PendingRequest};

/// Sessions, classes, subjects, grading systems and timetables.
pub struct AcademicApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AcademicApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    // Sessions

    pub async fn sessions(&self) -> Result<ApiEnvelope> {
        self.client.send(PendingRequest::get("/academic/sessions")).await
    }

    pub async fn create_session<B: Serialize>(&self, session: &B) -> Result<ApiEnvelope> {
        self.client.post("/academic/sessions", session).await
    }

    pub async fn update_session<B: Serialize>(&self, id: &str, session: &B) -> Result<ApiEnvelope> {
        self.client
            .put(&format!("/academic/sessions/{}", path_id(id)?), session)
            .await
    }

    pub async fn activate_session(&self, id: &str) -> Result<ApiEnvelope> {
        let path = format!("/academic/sessions/{}/activate", path_id(id)?);
        self.client
            .send(PendingRequest::action(Method::PUT, path))
            .await
    }

    // Classes

    pub async fn classes(&self, query: &ListQuery) -> Result<ApiEnvelope> {
        self.client.get("/academic/classes", query).await
    }

    pub async fn class(&self, id: &str) -> Result<ApiEnvelope> {
        self.client
            .send(PendingRequest::get(format!("/academic/classes/{}", path_id(id)?)))
            .await
    }

    pub async fn create_class<B: Serialize>(&self, class: &B) -> Result<ApiEnvelope> {
        self.client.post("/academic/classes", class).await
    }

    pub async fn update_class<B: Serialize>(&self, id: &str, class: &B) -> Result<ApiEnvelope> {
        self.client
            .put(&format!("/academic/classes/{}", path_id(id)?), class)
            .await
    }

    // Subjects

    pub async fn subjects(&self, query: &ListQuery) -> Result<ApiEnvelope> {
        self.client.get("/academic/subjects", query).await
    }

    pub async fn create_subject<B: Serialize>(&self, subject: &B) -> Result<ApiEnvelope> {
        self.client.post("/academic/subjects", subject).await
    }

    pub async fn update_subject<B: Serialize>(&self, id: &str, subject: &B) -> Result<ApiEnvelope> {
        self.client
            .put(&format!("/academic/subjects/{}", path_id(id)?), subject)
            .await
    }

    // Grading

    pub async fn grading_systems(&self) -> Result<ApiEnvelope> {
        self.client
            .send(PendingRequest::get("/academic/grading-systems"))
            .await
    }

    pub async fn create_grading_system<B: Serialize>(&self, system: &B) -> Result<ApiEnvelope> {
        self.client.post("/academic/grading-systems", system).await
    }

    // Timetables

    pub async fn timetables(&self, query: &ListQuery) -> Result<ApiEnvelope> {
        self.client.get("/academic/timetables", query).await
    }

    pub async fn create_timetable<B: Serialize>(&self, timetable: &B) -> Result<ApiEnvelope> {
        self.client.post("/academic/timetables", timetable).await
    }

    pub async fn update_timetable<B: Serialize>(&self, id: &str, timetable: &B) -> Result<ApiEnvelope> {
        self.client
            .put(&format!("/academic/timetables/{}", path_id(id)?), timetable)
            .await
    }
}
