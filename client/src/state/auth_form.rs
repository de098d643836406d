//! Admin login form state and submission lifecycle.
//!
//! DESIGN
//! ======
//! `AuthFormState` holds the whole form and exposes pure transitions
//! (`begin_*`, `finish`, `toggle_mode`). The async drivers
//! (`submit_credentials`, `submit_federated`) wrap one provider call between
//! two state updates:
//!
//! ```text
//!   Idle --begin--> Submitting --finish(Ok)--> navigate("/")
//!                              --finish(Err)--> Idle + error
//! ```
//!
//! The `loading` flag is checked and set inside the same update that starts a
//! request, so a second submit while one is pending is rejected without
//! touching the provider. Every write after the await goes through
//! `FormHandle::try_update_form`, which reports a disposed form; in that case
//! the result is dropped and no navigation happens.

#[cfg(test)]
#[path = "auth_form_test.rs"]
mod auth_form_test;

use leptos::prelude::*;

use crate::net::auth::{AuthError, AuthProvider, Navigator};

pub const HOME_PATH: &str = "/";
pub const MIN_SIGNUP_PASSWORD_LEN: usize = 6;

pub const EMAIL_IN_USE_MESSAGE: &str = "This email already has an account. Please log in instead.";
pub const SIGNUP_FAILED_MESSAGE: &str = "Failed to create account";
pub const SIGNIN_FAILED_MESSAGE: &str = "Invalid email or password";
pub const GOOGLE_FAILED_MESSAGE: &str = "Failed to sign in with Google";
pub const EMAIL_REQUIRED_MESSAGE: &str = "Please enter your email address.";
pub const PASSWORD_REQUIRED_MESSAGE: &str = "Please enter your password.";
pub const PASSWORD_TOO_SHORT_MESSAGE: &str = "Password must be at least 6 characters";

/// Which credential call the form issues.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

impl AuthMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::SignIn => Self::SignUp,
            Self::SignUp => Self::SignIn,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::SignIn => "Login",
            Self::SignUp => "Create Account",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            Self::SignIn => "Sign in to your account",
            Self::SignUp => "Sign up to get started",
        }
    }

    pub fn submit_label(self, loading: bool) -> &'static str {
        match (self, loading) {
            (Self::SignIn, false) => "Sign In",
            (Self::SignIn, true) => "Signing in...",
            (Self::SignUp, false) => "Create Account",
            (Self::SignUp, true) => "Creating Account...",
        }
    }

    pub fn toggle_prompt(self) -> &'static str {
        match self {
            Self::SignIn => "Don't have an account? Create one",
            Self::SignUp => "Already have an account? Sign in",
        }
    }
}

/// A provider call that has passed the in-flight guard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthRequest {
    Credentials { mode: AuthMode, email: String, password: String },
    Google,
}

impl AuthRequest {
    async fn dispatch<P>(&self, provider: &P) -> Result<(), AuthError>
    where
        P: AuthProvider + ?Sized,
    {
        match self {
            Self::Credentials { mode: AuthMode::SignIn, email, password } => provider.login(email, password).await,
            Self::Credentials { mode: AuthMode::SignUp, email, password } => provider.signup(email, password).await,
            Self::Google => provider.login_with_google().await,
        }
    }
}

/// Why a submit did not start a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitRejected {
    /// Another request from this form is still pending.
    InFlight,
    /// Local input checks failed; `error` now explains why.
    Invalid,
}

/// Result of one submit attempt, as seen by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rejected(SubmitRejected),
    /// The provider accepted and navigation to `HOME_PATH` was issued.
    Navigated,
    /// The provider rejected; the form shows an error.
    Failed,
    /// The form was disposed before the provider answered.
    Detached,
}

/// Local state of the login form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthFormState {
    pub email: String,
    pub password: String,
    pub mode: AuthMode,
    pub loading: bool,
    pub error: Option<String>,
}

impl AuthFormState {
    pub fn set_email(&mut self, email: String) {
        self.email = email;
    }

    pub fn set_password(&mut self, password: String) {
        self.password = password;
    }

    /// Flip between sign-in and sign-up, clearing any error.
    ///
    /// Ignored while a request is pending. Returns whether the mode changed.
    pub fn toggle_mode(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.mode = self.mode.toggled();
        self.error = None;
        true
    }

    /// Start an email/password request for the current mode.
    ///
    /// # Errors
    ///
    /// `InFlight` when a request is already pending (state untouched), or
    /// `Invalid` when the inputs fail local checks (`error` is set).
    pub fn begin_credentials(&mut self) -> Result<AuthRequest, SubmitRejected> {
        if self.loading {
            return Err(SubmitRejected::InFlight);
        }
        let email = self.email.trim().to_owned();
        if let Err(message) = validate_credentials(self.mode, &email, &self.password) {
            self.error = Some(message.to_owned());
            return Err(SubmitRejected::Invalid);
        }
        self.start();
        Ok(AuthRequest::Credentials { mode: self.mode, email, password: self.password.clone() })
    }

    /// Start a federated Google sign-in.
    ///
    /// # Errors
    ///
    /// `InFlight` when a request is already pending.
    pub fn begin_google(&mut self) -> Result<AuthRequest, SubmitRejected> {
        if self.loading {
            return Err(SubmitRejected::InFlight);
        }
        self.start();
        Ok(AuthRequest::Google)
    }

    /// Apply a provider result. Always clears `loading`.
    ///
    /// Returns the path to navigate to on success.
    pub fn finish(&mut self, request: &AuthRequest, result: Result<(), AuthError>) -> Option<&'static str> {
        self.loading = false;
        match result {
            Ok(()) => {
                self.error = None;
                Some(HOME_PATH)
            }
            Err(err) => {
                self.error = Some(failure_message(request, &err));
                None
            }
        }
    }

    fn start(&mut self) {
        self.loading = true;
        self.error = None;
    }
}

/// Check inputs before contacting the provider.
///
/// # Errors
///
/// Returns the user-facing message for the first failed check.
pub fn validate_credentials(mode: AuthMode, email: &str, password: &str) -> Result<(), &'static str> {
    if email.trim().is_empty() {
        return Err(EMAIL_REQUIRED_MESSAGE);
    }
    if password.is_empty() {
        return Err(PASSWORD_REQUIRED_MESSAGE);
    }
    if mode == AuthMode::SignUp && password.chars().count() < MIN_SIGNUP_PASSWORD_LEN {
        return Err(PASSWORD_TOO_SHORT_MESSAGE);
    }
    Ok(())
}

/// Map a provider rejection to the message shown under the form.
///
/// Sign-in failures never echo provider detail so the form cannot be used to
/// probe which accounts exist.
pub fn failure_message(request: &AuthRequest, err: &AuthError) -> String {
    match request {
        AuthRequest::Credentials { mode: AuthMode::SignIn, .. } => SIGNIN_FAILED_MESSAGE.to_owned(),
        AuthRequest::Credentials { mode: AuthMode::SignUp, .. } => {
            if err.is_email_already_in_use() {
                EMAIL_IN_USE_MESSAGE.to_owned()
            } else {
                err.message().unwrap_or(SIGNUP_FAILED_MESSAGE).to_owned()
            }
        }
        AuthRequest::Google => err.message().unwrap_or(GOOGLE_FAILED_MESSAGE).to_owned(),
    }
}

/// Access to a form state that may be disposed while a request is pending.
pub trait FormHandle {
    /// Run `f` against the live form, or return `None` if it is gone.
    fn try_update_form<R>(&self, f: impl FnOnce(&mut AuthFormState) -> R) -> Option<R>;
}

impl FormHandle for RwSignal<AuthFormState> {
    fn try_update_form<R>(&self, f: impl FnOnce(&mut AuthFormState) -> R) -> Option<R> {
        self.try_update(f)
    }
}

/// Submit email/password for the form's current mode.
pub async fn submit_credentials<H, P, N>(form: &H, provider: &P, navigator: &N) -> SubmitOutcome
where
    H: FormHandle,
    P: AuthProvider + ?Sized,
    N: Navigator + ?Sized,
{
    match form.try_update_form(AuthFormState::begin_credentials) {
        Some(Ok(request)) => run(form, provider, navigator, request).await,
        Some(Err(rejected)) => SubmitOutcome::Rejected(rejected),
        None => SubmitOutcome::Detached,
    }
}

/// Start a Google sign-in.
pub async fn submit_federated<H, P, N>(form: &H, provider: &P, navigator: &N) -> SubmitOutcome
where
    H: FormHandle,
    P: AuthProvider + ?Sized,
    N: Navigator + ?Sized,
{
    match form.try_update_form(AuthFormState::begin_google) {
        Some(Ok(request)) => run(form, provider, navigator, request).await,
        Some(Err(rejected)) => SubmitOutcome::Rejected(rejected),
        None => SubmitOutcome::Detached,
    }
}

async fn run<H, P, N>(form: &H, provider: &P, navigator: &N, request: AuthRequest) -> SubmitOutcome
where
    H: FormHandle,
    P: AuthProvider + ?Sized,
    N: Navigator + ?Sized,
{
    let result = request.dispatch(provider).await;
    if let Err(err) = &result {
        log::warn!("auth request failed: code={:?} message={err}", err.code);
    }
    match form.try_update_form(|state| state.finish(&request, result)) {
        Some(Some(path)) => {
            navigator.navigate(path);
            SubmitOutcome::Navigated
        }
        Some(None) => SubmitOutcome::Failed,
        None => {
            log::debug!("login form disposed before auth result arrived");
            SubmitOutcome::Detached
        }
    }
}
