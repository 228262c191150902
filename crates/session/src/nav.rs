use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

use shared_types::Session;

use crate::policy::RolePolicy;

/// Symbolic icon reference, resolved to a glyph by the rendering layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum NavIcon {
    LayoutDashboard,
    BookOpen,
    Calendar,
    Users,
    GraduationCap,
    CreditCard,
    Megaphone,
    Home,
    Settings,
}

/// One menu item. Visibility is decided by the role policy plus an
/// optional fine-grained permission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NavigationEntry {
    pub label: String,
    pub path: String,
    pub icon: NavIcon,
    /// Extra permission required beyond path access. The only permissions
    /// issued today are the role names themselves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_permission: Option<String>,
}

impl NavigationEntry {
    fn new(label: &str, path: &str, icon: NavIcon) -> Self {
        Self {
            label: label.to_string(),
            path: path.to_string(),
            icon,
            required_permission: None,
        }
    }

    fn requires(mut self, permission: &str) -> Self {
        self.required_permission = Some(permission.to_string());
        self
    }

    fn permits(&self, session: &Session) -> bool {
        match &self.required_permission {
            Some(permission) => permission == session.role.as_str(),
            None => true,
        }
    }
}

/// The full, static menu catalog. Declaration order is display order; a
/// role's menu is this list filtered by the policy, never re-sorted.
#[derive(Debug, Clone)]
pub struct NavigationCatalog {
    entries: Vec<NavigationEntry>,
}

impl NavigationCatalog {
    pub fn new(entries: Vec<NavigationEntry>) -> Self {
        Self { entries }
    }

    /// The built-in tutoring-center catalog.
    pub fn standard() -> Self {
        use NavIcon::*;
        Self::new(vec![
            NavigationEntry::new("Home", "/home", Home),
            // Admin surface
            NavigationEntry::new("Dashboard", "/admin", LayoutDashboard),
            NavigationEntry::new("Classes", "/admin/classes", BookOpen),
            NavigationEntry::new("Teachers", "/admin/teachers", Users),
            NavigationEntry::new("Students", "/admin/students", GraduationCap),
            NavigationEntry::new("Payments", "/admin/payments", CreditCard),
            NavigationEntry::new("Advertisements", "/admin/advertisements", Megaphone)
                .requires("admin"),
            // Teacher surface
            NavigationEntry::new("My Classes", "/teacher/my-classes", BookOpen),
            NavigationEntry::new("Schedule", "/teacher/schedule", Calendar),
            NavigationEntry::new("Students", "/teacher/students", GraduationCap),
            // Student surface
            NavigationEntry::new("My Lessons", "/student/lessons", BookOpen),
            NavigationEntry::new("Payments", "/student/payments", CreditCard),
            // Parent surface
            NavigationEntry::new("Children", "/parent/children", Users),
            NavigationEntry::new("Payments", "/parent/payments", CreditCard),
            // Shared
            NavigationEntry::new("Account", "/account", Settings),
        ])
    }

    /// Entries visible to `session`, in declaration order. Lazy and
    /// restartable; empty when anonymous.
    pub fn menu<'a>(
        &'a self,
        policy: &'a RolePolicy,
        session: Option<&'a Session>,
    ) -> impl Iterator<Item = &'a NavigationEntry> + 'a {
        session.into_iter().flat_map(move |session| {
            self.entries.iter().filter(move |entry| {
                policy.is_allowed(session.role, &entry.path) && entry.permits(session)
            })
        })
    }
}

/// A menu bound to a live session feed. Recomputed in full on every read —
/// the catalog is small and static, so there is no diffing.
pub struct NavigationMenu {
    catalog: NavigationCatalog,
    policy: Arc<RolePolicy>,
    sessions: watch::Receiver<Option<Session>>,
}

impl NavigationMenu {
    pub fn new(
        catalog: NavigationCatalog,
        policy: Arc<RolePolicy>,
        sessions: watch::Receiver<Option<Session>>,
    ) -> Self {
        Self {
            catalog,
            policy,
            sessions,
        }
    }

    /// Snapshot of the visible entries for the current session.
    pub fn entries(&self) -> Vec<NavigationEntry> {
        let session = self.sessions.borrow().clone();
        self.catalog
            .menu(&self.policy, session.as_ref())
            .cloned()
            .collect()
    }
}
