//! Role-conditional sidebar entries.

use std::collections::HashMap;

use protocol::Role;

use crate::route::Route;

/// One sidebar entry: a link, a group of links, or both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub name: &'static str,
    pub href: Option<Route>,
    pub children: Vec<NavEntry>,
}

impl NavEntry {
    pub fn link(name: &'static str, href: Route) -> Self {
        Self {
            name,
            href: Some(href),
            children: Vec::new(),
        }
    }

    pub fn group(name: &'static str, children: Vec<NavEntry>) -> Self {
        Self {
            name,
            href: None,
            children,
        }
    }

    #[must_use]
    pub fn with_href(mut self, href: Route) -> Self {
        self.href = Some(href);
        self
    }

    /// True when this entry or one of its children points at `current`.
    pub fn is_active(&self, current: &Route) -> bool {
        self.href.as_ref() == Some(current) || self.children.iter().any(|c| c.is_active(current))
    }
}

/// Roles allowed to see a named entry. Entries without a rule are open to
/// every role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityTable {
    rules: HashMap<&'static str, Vec<Role>>,
}

impl CapabilityTable {
    /// A table with no restrictions.
    pub fn open() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    #[must_use]
    pub fn restrict(mut self, entry: &'static str, roles: Vec<Role>) -> Self {
        self.rules.insert(entry, roles);
        self
    }

    pub fn allows(&self, entry: &str, role: &Role) -> bool {
        self.rules
            .get(entry)
            .map_or(true, |allowed| allowed.contains(role))
    }
}

impl Default for CapabilityTable {
    /// User management is reserved to super administrators.
    fn default() -> Self {
        Self::open().restrict("Users", vec![Role::SuperAdmin])
    }
}

/// Full sidebar in display order, before any role filtering.
pub fn full_navigation() -> Vec<NavEntry> {
    vec![
        NavEntry::link("Dashboard", Route::Dashboard),
        NavEntry::link("Students", Route::Students),
        NavEntry::link("Teachers", Route::Teachers),
        NavEntry::group(
            "Academic",
            vec![
                NavEntry::link("Sessions", Route::AcademicSessions),
                NavEntry::link("Classes", Route::AcademicClasses),
                NavEntry::link("Subjects", Route::AcademicSubjects),
                NavEntry::link("Timetables", Route::AcademicTimetables),
            ],
        ),
        NavEntry::group(
            "Attendance",
            vec![
                NavEntry::link("Mark Attendance", Route::Attendance),
                NavEntry::link("Reports", Route::AttendanceReport),
            ],
        ),
        NavEntry::group(
            "Exams",
            vec![
                NavEntry::link("Exams", Route::Exams),
                NavEntry::link("Results", Route::ExamResults),
            ],
        )
        .with_href(Route::Exams),
        NavEntry::group(
            "Fees",
            vec![
                NavEntry::link("Fee Structures", Route::FeeStructures),
                NavEntry::link("Payments", Route::FeePayments),
            ],
        ),
        NavEntry::link("Communication", Route::Announcements),
        NavEntry::link("Users", Route::Users),
    ]
}

/// Ordered entries visible to `role` under `table`.
///
/// Children are filtered with the same table; a group that loses all of its
/// children and has no link of its own is dropped.
pub fn visible_navigation(role: &Role, table: &CapabilityTable) -> Vec<NavEntry> {
    full_navigation()
        .into_iter()
        .filter_map(|entry| filter_entry(entry, role, table))
        .collect()
}

fn filter_entry(entry: NavEntry, role: &Role, table: &CapabilityTable) -> Option<NavEntry> {
    if !table.allows(entry.name, role) {
        return None;
    }

    if entry.children.is_empty() {
        return Some(entry);
    }

    let children: Vec<NavEntry> = entry
        .children
        .into_iter()
        .filter_map(|child| filter_entry(child, role, table))
        .collect();

    if children.is_empty() && entry.href.is_none() {
        return None;
    }

    Some(NavEntry { children, ..entry })
}
