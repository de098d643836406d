//! Identity-provider boundary used by the admin login form.
//!
//! DESIGN
//! ======
//! The form only depends on this trait, so error mapping and loading-state
//! discipline can be exercised with in-memory fakes. Adapters translate their
//! provider's native failures into the canonical `auth/*` codes below.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use async_trait::async_trait;

pub const CODE_EMAIL_ALREADY_IN_USE: &str = "auth/email-already-in-use";
pub const CODE_INVALID_CREDENTIAL: &str = "auth/invalid-credential";
pub const CODE_USER_NOT_FOUND: &str = "auth/user-not-found";
pub const CODE_WRONG_PASSWORD: &str = "auth/wrong-password";
pub const CODE_USER_DISABLED: &str = "auth/user-disabled";
pub const CODE_INVALID_EMAIL: &str = "auth/invalid-email";
pub const CODE_WEAK_PASSWORD: &str = "auth/weak-password";
pub const CODE_TOO_MANY_REQUESTS: &str = "auth/too-many-requests";
pub const CODE_OPERATION_NOT_ALLOWED: &str = "auth/operation-not-allowed";
pub const CODE_POPUP_BLOCKED: &str = "auth/popup-blocked";
pub const CODE_POPUP_CLOSED: &str = "auth/popup-closed-by-user";
pub const CODE_USER_CANCELLED: &str = "auth/user-cancelled";
pub const CODE_TIMEOUT: &str = "auth/timeout";
pub const CODE_NETWORK_FAILED: &str = "auth/network-request-failed";
pub const CODE_INTERNAL: &str = "auth/internal-error";

/// Rejection from an identity provider call.
///
/// Both fields are optional: some failures only carry a code, others only a
/// human-readable message.
#[derive(Clone, Debug, Default, PartialEq, Eq, thiserror::Error)]
#[error("{}", .message.as_deref().or(.code.as_deref()).unwrap_or("authentication failed"))]
pub struct AuthError {
    pub code: Option<String>,
    pub message: Option<String>,
}

impl AuthError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self { code: Some(code.into()), message: Some(message.into()) }
    }

    pub fn with_code(code: impl Into<String>) -> Self {
        Self { code: Some(code.into()), message: None }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self { code: None, message: Some(message.into()) }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(CODE_NETWORK_FAILED, message)
    }

    #[must_use]
    pub fn is_email_already_in_use(&self) -> bool {
        self.code.as_deref() == Some(CODE_EMAIL_ALREADY_IN_USE)
    }

    /// Provider message, treating an empty string as absent.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }
}

/// Credential and federated sign-in operations of an external identity provider.
///
/// Success means the provider has established its own session; callers never
/// see tokens.
#[async_trait(?Send)]
pub trait AuthProvider {
    /// Sign in with email + password.
    async fn login(&self, email: &str, password: &str) -> Result<(), AuthError>;

    /// Create an account with email + password and sign it in.
    async fn signup(&self, email: &str, password: &str) -> Result<(), AuthError>;

    /// Federated sign-in through Google.
    async fn login_with_google(&self) -> Result<(), AuthError>;
}

/// Route changes requested by the login flow.
pub trait Navigator {
    fn navigate(&self, path: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str),
{
    fn navigate(&self, path: &str) {
        self(path);
    }
}
