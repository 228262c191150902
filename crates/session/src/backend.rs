use uuid::Uuid;

use shared_types::{AuthError, LoginRequest, Session};

/// The backend's login call, kept behind a trait so the store never knows
/// whether it is talking to a real service or the mock.
#[allow(async_fn_in_trait)]
pub trait AuthBackend {
    /// Exchange credentials for an authenticated user profile, or reject
    /// with [`AuthError::InvalidCredentials`].
    async fn authenticate(&self, request: &LoginRequest) -> Result<Session, AuthError>;
}

/// Mock backend: accepts any credentials and synthesizes a profile from
/// the request. Display name is the email local part with the first
/// letter upcased.
#[derive(Debug, Clone, Default)]
pub struct MockAuthBackend;

impl MockAuthBackend {
    pub fn new() -> Self {
        Self
    }
}

fn display_name_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or(email);
    let mut chars = local.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "User".to_string(),
    }
}

impl AuthBackend for MockAuthBackend {
    async fn authenticate(&self, request: &LoginRequest) -> Result<Session, AuthError> {
        Ok(Session {
            user_id: Uuid::new_v4().to_string(),
            name: display_name_from_email(&request.email),
            email: request.email.clone(),
            role: request.role,
        })
    }
}
