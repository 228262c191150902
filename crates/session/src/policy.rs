use serde::{Deserialize, Serialize};

use shared_types::{ConfigError, Role};

/// Paths reachable by every authenticated role, regardless of its prefix.
pub const SHARED_PATHS: [&str; 2] = ["/home", "/account"];

/// One role's slice of the route tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RolePolicyEntry {
    pub role: Role,
    /// Prefix owned by this role, e.g. `/teacher`.
    pub route_prefix: String,
    /// Subroutes under the prefix, relative (no leading slash).
    pub allowed_subroutes: Vec<String>,
    /// Default landing path; the redirect target when this role is denied
    /// a route.
    pub home_path: String,
}

impl RolePolicyEntry {
    pub fn new(
        role: Role,
        route_prefix: impl Into<String>,
        home_path: impl Into<String>,
        allowed_subroutes: &[&str],
    ) -> Self {
        Self {
            role,
            route_prefix: route_prefix.into(),
            allowed_subroutes: allowed_subroutes.iter().map(|s| s.to_string()).collect(),
            home_path: home_path.into(),
        }
    }

    /// Full paths owned by this entry: the prefix itself plus each subroute.
    fn full_paths(&self) -> impl Iterator<Item = String> + '_ {
        std::iter::once(self.route_prefix.clone()).chain(
            self.allowed_subroutes
                .iter()
                .map(|sub| format!("{}/{}", self.route_prefix, sub)),
        )
    }
}

/// Static authorization table: role → permitted route surface.
///
/// Validated wholesale at construction and immutable after, so every
/// lookup is a total function over [`Role`]. An invalid table is a fatal
/// startup error, never a runtime fallback.
#[derive(Debug, Clone)]
pub struct RolePolicy {
    /// One entry per role, ordered as [`Role::ALL`].
    entries: Vec<RolePolicyEntry>,
}

fn role_index(role: Role) -> usize {
    match role {
        Role::Admin => 0,
        Role::Teacher => 1,
        Role::Student => 2,
        Role::Parent => 3,
    }
}

/// True when `path` equals `prefix` or sits under it at a `/` boundary,
/// so `/admin` admits `/admin/classes` but not `/administrator`.
pub(crate) fn path_is_under(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some("") => true,
        Some(rest) => rest.starts_with('/'),
        None => false,
    }
}

impl RolePolicy {
    /// Build and validate a policy table.
    ///
    /// Fails with [`ConfigError::IncompleteRolePolicy`] when a role has no
    /// entry, [`ConfigError::DuplicateRole`] when one has several,
    /// [`ConfigError::OverlappingRoutes`] when two roles claim the same
    /// full path or one role's prefix sits under another's (prefix-based
    /// access would grant the nested surface to both), and
    /// [`ConfigError::UnreachableHome`] when a role's home path is outside
    /// its own permitted surface (the guard would then redirect a denied
    /// request for that path to itself).
    pub fn new(entries: Vec<RolePolicyEntry>) -> Result<Self, ConfigError> {
        let mut seen_roles: Vec<Role> = Vec::new();
        let mut seen_paths: Vec<String> = Vec::new();
        for entry in &entries {
            if seen_roles.contains(&entry.role) {
                return Err(ConfigError::DuplicateRole(entry.role));
            }
            seen_roles.push(entry.role);

            let home_reachable = path_is_under(&entry.home_path, &entry.route_prefix)
                || SHARED_PATHS
                    .iter()
                    .any(|shared| path_is_under(&entry.home_path, shared));
            if !home_reachable {
                return Err(ConfigError::UnreachableHome(
                    entry.role,
                    entry.home_path.clone(),
                ));
            }

            for path in entry.full_paths() {
                if seen_paths.contains(&path) {
                    return Err(ConfigError::OverlappingRoutes(path));
                }
                seen_paths.push(path);
            }
        }

        for entry in &entries {
            for other in &entries {
                if entry.role != other.role
                    && path_is_under(&entry.route_prefix, &other.route_prefix)
                {
                    return Err(ConfigError::OverlappingRoutes(entry.route_prefix.clone()));
                }
            }
        }

        let mut ordered = Vec::with_capacity(Role::ALL.len());
        for role in Role::ALL {
            let entry = entries
                .iter()
                .find(|e| e.role == role)
                .ok_or(ConfigError::IncompleteRolePolicy(role))?;
            ordered.push(entry.clone());
        }
        Ok(Self { entries: ordered })
    }

    /// The built-in table for the tutoring-center app.
    ///
    /// Students land on the shared `/home` page rather than a
    /// role-prefixed dashboard; the other roles land on their prefix root.
    pub fn standard() -> Result<Self, ConfigError> {
        Self::new(vec![
            RolePolicyEntry::new(
                Role::Admin,
                "/admin",
                "/admin",
                &["classes", "teachers", "students", "payments", "advertisements"],
            ),
            RolePolicyEntry::new(
                Role::Teacher,
                "/teacher",
                "/teacher",
                &["my-classes", "schedule", "students"],
            ),
            RolePolicyEntry::new(Role::Student, "/student", "/home", &["lessons", "payments"]),
            RolePolicyEntry::new(Role::Parent, "/parent", "/parent", &["children", "payments"]),
        ])
    }

    pub fn entry(&self, role: Role) -> &RolePolicyEntry {
        &self.entries[role_index(role)]
    }

    /// Route prefix owned by `role`. Total: construction guarantees an
    /// entry for every role.
    pub fn permitted_prefix(&self, role: Role) -> &str {
        &self.entry(role).route_prefix
    }

    /// Redirect target when `role` is denied a route.
    pub fn home_path(&self, role: Role) -> &str {
        &self.entry(role).home_path
    }

    /// True iff `path` is under the role's own prefix or is a shared
    /// authenticated path.
    pub fn is_allowed(&self, role: Role, path: &str) -> bool {
        if SHARED_PATHS
            .iter()
            .any(|shared| path_is_under(path, shared))
        {
            return true;
        }
        path_is_under(path, self.permitted_prefix(role))
    }
}
