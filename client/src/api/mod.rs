//! Endpoint catalogue, one group per backend resource.
//!
//! Record payloads stay `serde_json::Value`: their layout belongs to the
//! views that render them.

pub mod academic;
pub mod attendance;
pub mod auth;
pub mod communication;
pub mod dashboard;
pub mod exams;
pub mod fees;
pub mod school;
pub mod students;
pub mod teachers;
pub mod users;

pub use academic::AcademicApi;
pub use attendance::AttendanceApi;
pub use auth::AuthApi;
pub use communication::CommunicationApi;
pub use dashboard::DashboardApi;
pub use exams::ExamsApi;
pub use fees::FeesApi;
pub use school::SchoolApi;
pub use students::StudentsApi;
pub use teachers::TeachersApi;
pub use users::UsersApi;

use crate::pipeline::ApiClient;

impl ApiClient {
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn school(&self) -> SchoolApi<'_> {
        SchoolApi::new(self)
    }

    pub fn students(&self) -> StudentsApi<'_> {
        StudentsApi::new(self)
    }

    pub fn teachers(&self) -> TeachersApi<'_> {
        TeachersApi::new(self)
    }

    pub fn academic(&self) -> AcademicApi<'_> {
        AcademicApi::new(self)
    }

    pub fn attendance(&self) -> AttendanceApi<'_> {
        AttendanceApi::new(self)
    }

    pub fn exams(&self) -> ExamsApi<'_> {
        ExamsApi::new(self)
    }

    pub fn fees(&self) -> FeesApi<'_> {
        FeesApi::new(self)
    }

    pub fn communication(&self) -> CommunicationApi<'_> {
        CommunicationApi::new(self)
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }

    pub fn dashboard(&self) -> DashboardApi<'_> {
        DashboardApi::new(self)
    }
}
