use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Role;

/// Authentication and session errors.
///
/// `InvalidCredentials` reflects user-correctable input and is surfaced
/// inline by the calling form. `NoActiveSession` is a programming error:
/// the UI should never offer a profile edit while logged out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AuthError {
    InvalidCredentials(String),
    NoActiveSession,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials(msg) => write!(f, "invalid credentials: {}", msg),
            AuthError::NoActiveSession => write!(f, "no active session"),
        }
    }
}

impl std::error::Error for AuthError {}

/// Static configuration errors. Fatal at startup: a policy table that
/// fails validation must halt initialization rather than run with
/// undefined authorization behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ConfigError {
    /// A role enum value has no policy entry.
    IncompleteRolePolicy(Role),
    /// A role appears in more than one policy entry.
    DuplicateRole(Role),
    /// Two roles claim the same full route path, or one role's prefix is
    /// nested under another's.
    OverlappingRoutes(String),
    /// A role's home path is outside its own permitted surface, so a
    /// denial there would redirect to itself.
    UnreachableHome(Role, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IncompleteRolePolicy(role) => {
                write!(f, "no policy entry for role '{}'", role.as_str())
            }
            ConfigError::DuplicateRole(role) => {
                write!(f, "duplicate policy entry for role '{}'", role.as_str())
            }
            ConfigError::OverlappingRoutes(path) => {
                write!(f, "route '{}' is claimed by more than one role", path)
            }
            ConfigError::UnreachableHome(role, path) => {
                write!(
                    f,
                    "home path '{}' is not reachable by role '{}'",
                    path,
                    role.as_str()
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Durable-storage errors.
///
/// `Corrupt` never escapes session hydration — unparsable stored state is
/// discarded and treated as anonymous. `Io` propagates to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum StorageError {
    /// The value at `key` could not be parsed.
    Corrupt(String),
    Io(String),
}

impl StorageError {
    pub fn io(message: impl Into<String>) -> Self {
        StorageError::Io(message.into())
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Corrupt(key) => write!(f, "corrupt value at key '{}'", key),
            StorageError::Io(msg) => write!(f, "storage i/o failure: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}
