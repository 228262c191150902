use serde::{Deserialize, Serialize};

/// Role of a signed-in user, controlling which route surface is reachable.
///
/// - `Admin` — runs the center: classes, teachers, students, payments, ads.
/// - `Teacher` — own classes, schedule, enrolled students.
/// - `Student` — own lessons and payments.
/// - `Parent` — linked children and their payments.
///
/// The enum is closed: the role policy table is checked for completeness
/// against [`Role::ALL`] at startup, so adding a variant here forces a
/// policy update at compile/startup time rather than failing silently.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Student,
    Parent,
}

impl Role {
    /// Every role, in a fixed order. Used for exhaustiveness checks.
    pub const ALL: [Role; 4] = [Role::Admin, Role::Teacher, Role::Student, Role::Parent];

    /// Lowercase string for storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
            Role::Parent => "parent",
        }
    }

}

/// The authenticated user. Either absent (anonymous) or fully populated —
/// there is no partial session. Owned exclusively by the session store;
/// everything else holds read-only copies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// Opaque backend identifier.
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Partial profile change merged into the active session by
/// `update_profile`. Absent fields are left untouched; `role` and
/// `user_id` are never user-editable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ProfileUpdate {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: None,
        }
    }

    pub fn email(email: impl Into<String>) -> Self {
        Self {
            name: None,
            email: Some(email.into()),
        }
    }
}
