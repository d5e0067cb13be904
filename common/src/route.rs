//! Destination table of the administration front-end.

use std::fmt;

/// Every view the front-end can navigate to.
///
/// Only [`Route::Login`] is public; every other destination sits behind an
/// authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,

    // ==================== People ====================
    Students,
    StudentAdd,
    StudentDetails(String),
    Teachers,
    TeacherAdd,
    TeacherDetails(String),

    // ==================== Academic ====================
    AcademicSessions,
    AcademicClasses,
    AcademicSubjects,
    AcademicTimetables,

    // ==================== Records ====================
    Attendance,
    AttendanceReport,
    Exams,
    ExamResults,
    FeeStructures,
    FeePayments,

    // ==================== Administration ====================
    Announcements,
    Users,
    SchoolSettings,
    ProfileSettings,
}

impl Route {
    /// Default view for an authenticated user.
    pub const LANDING: Route = Route::Dashboard;

    /// Parses a location path such as `/students/42?tab=fees`.
    ///
    /// Query strings, fragments and trailing slashes are ignored. Returns
    /// `None` for paths that match no destination.
    pub fn parse(location: &str) -> Option<Route> {
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            [] => Route::Dashboard,
            ["login"] => Route::Login,
            ["students"] => Route::Students,
            ["students", "add"] => Route::StudentAdd,
            ["students", id] => Route::StudentDetails((*id).to_string()),
            ["teachers"] => Route::Teachers,
            ["teachers", "add"] => Route::TeacherAdd,
            ["teachers", id] => Route::TeacherDetails((*id).to_string()),
            ["academic", "sessions"] => Route::AcademicSessions,
            ["academic", "classes"] => Route::AcademicClasses,
            ["academic", "subjects"] => Route::AcademicSubjects,
            ["academic", "timetables"] => Route::AcademicTimetables,
            ["attendance"] => Route::Attendance,
            ["attendance", "report"] => Route::AttendanceReport,
            ["exams"] => Route::Exams,
            ["exams", "results"] => Route::ExamResults,
            ["fees", "structures"] => Route::FeeStructures,
            ["fees", "payments"] => Route::FeePayments,
            ["communication", "announcements"] => Route::Announcements,
            ["users"] => Route::Users,
            ["settings", "school"] => Route::SchoolSettings,
            ["settings", "profile"] => Route::ProfileSettings,
            _ => return None,
        };

        Some(route)
    }

    /// Canonical location path.
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Dashboard => "/".to_string(),
            Route::Students => "/students".to_string(),
            Route::StudentAdd => "/students/add".to_string(),
            Route::StudentDetails(id) => format!("/students/{id}"),
            Route::Teachers => "/teachers".to_string(),
            Route::TeacherAdd => "/teachers/add".to_string(),
            Route::TeacherDetails(id) => format!("/teachers/{id}"),
            Route::AcademicSessions => "/academic/sessions".to_string(),
            Route::AcademicClasses => "/academic/classes".to_string(),
            Route::AcademicSubjects => "/academic/subjects".to_string(),
            Route::AcademicTimetables => "/academic/timetables".to_string(),
            Route::Attendance => "/attendance".to_string(),
            Route::AttendanceReport => "/attendance/report".to_string(),
            Route::Exams => "/exams".to_string(),
            Route::ExamResults => "/exams/results".to_string(),
            Route::FeeStructures => "/fees/structures".to_string(),
            Route::FeePayments => "/fees/payments".to_string(),
            Route::Announcements => "/communication/announcements".to_string(),
            Route::Users => "/users".to_string(),
            Route::SchoolSettings => "/settings/school".to_string(),
            Route::ProfileSettings => "/settings/profile".to_string(),
        }
    }

    /// Page title shown in the view header.
    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Sign In",
            Route::Dashboard => "Dashboard",
            Route::Students => "Students",
            Route::StudentAdd => "Add Student",
            Route::StudentDetails(_) => "Student Details",
            Route::Teachers => "Teachers",
            Route::TeacherAdd => "Add Teacher",
            Route::TeacherDetails(_) => "Teacher Details",
            Route::AcademicSessions => "Sessions",
            Route::AcademicClasses => "Classes",
            Route::AcademicSubjects => "Subjects",
            Route::AcademicTimetables => "Timetables",
            Route::Attendance => "Mark Attendance",
            Route::AttendanceReport => "Attendance Report",
            Route::Exams => "Exams",
            Route::ExamResults => "Results",
            Route::FeeStructures => "Fee Structures",
            Route::FeePayments => "Payments",
            Route::Announcements => "Announcements",
            Route::Users => "Users",
            Route::SchoolSettings => "School Profile",
            Route::ProfileSettings => "Profile",
        }
    }

    pub fn is_login(&self) -> bool {
        matches!(self, Route::Login)
    }

    /// Whether the destination requires an authenticated session.
    pub fn is_protected(&self) -> bool {
        !self.is_login()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
