use std::cell::RefCell;

use async_trait::async_trait;
use futures::channel::oneshot;
use futures::executor::block_on;

use super::*;
use crate::net::auth::{CODE_EMAIL_ALREADY_IN_USE, CODE_INVALID_CREDENTIAL, CODE_POPUP_CLOSED, CODE_USER_NOT_FOUND};

// =============================================================
// Fakes
// =============================================================

struct TestForm(RefCell<Option<AuthFormState>>);

impl TestForm {
    fn new(state: AuthFormState) -> Self {
        Self(RefCell::new(Some(state)))
    }

    fn snapshot(&self) -> AuthFormState {
        self.0.borrow().clone().expect("form disposed")
    }

    fn dispose(&self) {
        self.0.borrow_mut().take();
    }
}

impl FormHandle for TestForm {
    fn try_update_form<R>(&self, f: impl FnOnce(&mut AuthFormState) -> R) -> Option<R> {
        self.0.borrow_mut().as_mut().map(f)
    }
}

struct FakeProvider {
    outcome: Result<(), AuthError>,
    calls: RefCell<Vec<String>>,
}

impl FakeProvider {
    fn ok() -> Self {
        Self { outcome: Ok(()), calls: RefCell::new(Vec::new()) }
    }

    fn failing(err: AuthError) -> Self {
        Self { outcome: Err(err), calls: RefCell::new(Vec::new()) }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl AuthProvider for FakeProvider {
    async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.calls.borrow_mut().push(format!("login:{email}:{password}"));
        self.outcome.clone()
    }

    async fn signup(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.calls.borrow_mut().push(format!("signup:{email}:{password}"));
        self.outcome.clone()
    }

    async fn login_with_google(&self) -> Result<(), AuthError> {
        self.calls.borrow_mut().push("google".to_owned());
        self.outcome.clone()
    }
}

/// Provider whose calls stay pending until the test releases them.
struct GatedProvider {
    gate: RefCell<Option<oneshot::Receiver<Result<(), AuthError>>>>,
    calls: RefCell<usize>,
}

impl GatedProvider {
    fn new() -> (Self, oneshot::Sender<Result<(), AuthError>>) {
        let (tx, rx) = oneshot::channel();
        (Self { gate: RefCell::new(Some(rx)), calls: RefCell::new(0) }, tx)
    }

    async fn wait(&self) -> Result<(), AuthError> {
        *self.calls.borrow_mut() += 1;
        let rx = self.gate.borrow_mut().take().expect("gate already used");
        rx.await.unwrap_or_else(|_| Err(AuthError::with_message("gate dropped")))
    }
}

#[async_trait(?Send)]
impl AuthProvider for GatedProvider {
    async fn login(&self, _email: &str, _password: &str) -> Result<(), AuthError> {
        self.wait().await
    }

    async fn signup(&self, _email: &str, _password: &str) -> Result<(), AuthError> {
        self.wait().await
    }

    async fn login_with_google(&self) -> Result<(), AuthError> {
        self.wait().await
    }
}

#[derive(Default)]
struct RecordingNavigator(RefCell<Vec<String>>);

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.0.borrow_mut().push(path.to_owned());
    }
}

impl RecordingNavigator {
    fn visited(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

fn filled(mode: AuthMode) -> AuthFormState {
    AuthFormState {
        email: "admin@example.com".to_owned(),
        password: "secret123".to_owned(),
        mode,
        ..AuthFormState::default()
    }
}

// =============================================================
// Pure transitions
// =============================================================

#[test]
fn default_form_is_idle_sign_in() {
    let state = AuthFormState::default();
    assert_eq!(state.mode, AuthMode::SignIn);
    assert!(!state.loading);
    assert!(state.error.is_none());
}

#[test]
fn toggle_mode_clears_error_and_keeps_credentials() {
    let mut state = filled(AuthMode::SignIn);
    state.error = Some(SIGNIN_FAILED_MESSAGE.to_owned());
    assert!(state.toggle_mode());
    assert_eq!(state.mode, AuthMode::SignUp);
    assert!(state.error.is_none());
    assert_eq!(state.email, "admin@example.com");
    assert_eq!(state.password, "secret123");

    state.error = Some(EMAIL_IN_USE_MESSAGE.to_owned());
    assert!(state.toggle_mode());
    assert_eq!(state.mode, AuthMode::SignIn);
    assert!(state.error.is_none());
}

#[test]
fn toggle_mode_ignored_while_loading() {
    let mut state = filled(AuthMode::SignIn);
    state.loading = true;
    assert!(!state.toggle_mode());
    assert_eq!(state.mode, AuthMode::SignIn);
}

#[test]
fn begin_credentials_sets_loading_and_clears_error() {
    let mut state = filled(AuthMode::SignUp);
    state.error = Some("old".to_owned());
    let request = state.begin_credentials().unwrap();
    assert!(state.loading);
    assert!(state.error.is_none());
    assert_eq!(
        request,
        AuthRequest::Credentials {
            mode: AuthMode::SignUp,
            email: "admin@example.com".to_owned(),
            password: "secret123".to_owned(),
        }
    );
}

#[test]
fn begin_credentials_trims_email() {
    let mut state = filled(AuthMode::SignIn);
    state.email = "  admin@example.com ".to_owned();
    let AuthRequest::Credentials { email, .. } = state.begin_credentials().unwrap() else {
        panic!("expected credentials request");
    };
    assert_eq!(email, "admin@example.com");
}

#[test]
fn begin_credentials_rejects_second_request_without_touching_state() {
    let mut state = filled(AuthMode::SignIn);
    state.begin_credentials().unwrap();
    let before = state.clone();
    assert_eq!(state.begin_credentials(), Err(SubmitRejected::InFlight));
    assert_eq!(state.begin_google(), Err(SubmitRejected::InFlight));
    assert_eq!(state, before);
}

#[test]
fn begin_credentials_validates_locally() {
    let mut state = filled(AuthMode::SignIn);
    state.email = "   ".to_owned();
    assert_eq!(state.begin_credentials(), Err(SubmitRejected::Invalid));
    assert_eq!(state.error.as_deref(), Some(EMAIL_REQUIRED_MESSAGE));
    assert!(!state.loading);
}

#[test]
fn validate_credentials_rules() {
    assert_eq!(validate_credentials(AuthMode::SignIn, "", "secret"), Err(EMAIL_REQUIRED_MESSAGE));
    assert_eq!(validate_credentials(AuthMode::SignIn, "a@b.co", ""), Err(PASSWORD_REQUIRED_MESSAGE));
    assert_eq!(validate_credentials(AuthMode::SignUp, "a@b.co", "12345"), Err(PASSWORD_TOO_SHORT_MESSAGE));
    assert_eq!(validate_credentials(AuthMode::SignUp, "a@b.co", "123456"), Ok(()));
    // Length is only enforced for new accounts.
    assert_eq!(validate_credentials(AuthMode::SignIn, "a@b.co", "123"), Ok(()));
}

#[test]
fn short_password_counts_characters_not_bytes() {
    assert_eq!(validate_credentials(AuthMode::SignUp, "a@b.co", "ééééé"), Err(PASSWORD_TOO_SHORT_MESSAGE));
    assert_eq!(validate_credentials(AuthMode::SignUp, "a@b.co", "éééééé"), Ok(()));
}

#[test]
fn finish_always_clears_loading() {
    let mut state = filled(AuthMode::SignIn);
    let request = state.begin_credentials().unwrap();
    assert_eq!(state.finish(&request, Ok(())), Some(HOME_PATH));
    assert!(!state.loading);

    let request = state.begin_credentials().unwrap();
    assert_eq!(state.finish(&request, Err(AuthError::default())), None);
    assert!(!state.loading);
}

// =============================================================
// Error mapping
// =============================================================

fn sign_in() -> AuthRequest {
    AuthRequest::Credentials { mode: AuthMode::SignIn, email: "a@b.co".to_owned(), password: "x".to_owned() }
}

fn sign_up() -> AuthRequest {
    AuthRequest::Credentials { mode: AuthMode::SignUp, email: "a@b.co".to_owned(), password: "secret".to_owned() }
}

#[test]
fn sign_in_failures_never_leak_provider_detail() {
    for err in [
        AuthError::new(CODE_USER_NOT_FOUND, "There is no user record"),
        AuthError::new(CODE_INVALID_CREDENTIAL, "bad password"),
        AuthError::with_code(CODE_EMAIL_ALREADY_IN_USE),
        AuthError::default(),
    ] {
        assert_eq!(failure_message(&sign_in(), &err), "Invalid email or password");
    }
}

#[test]
fn sign_up_email_in_use_is_translated() {
    let err = AuthError::new(CODE_EMAIL_ALREADY_IN_USE, "Firebase: Error (auth/email-already-in-use).");
    assert_eq!(
        failure_message(&sign_up(), &err),
        "This email already has an account. Please log in instead."
    );
}

#[test]
fn sign_up_other_failures_use_provider_message_or_fallback() {
    let err = AuthError::new("auth/weak-password", "Password should be at least 6 characters.");
    assert_eq!(failure_message(&sign_up(), &err), "Password should be at least 6 characters.");
    assert_eq!(failure_message(&sign_up(), &AuthError::with_code("auth/x")), "Failed to create account");
    assert_eq!(failure_message(&sign_up(), &AuthError::with_message("")), "Failed to create account");
}

#[test]
fn google_failures_use_provider_message_or_fallback() {
    let err = AuthError::new(CODE_POPUP_CLOSED, "The sign-in window was closed.");
    assert_eq!(failure_message(&AuthRequest::Google, &err), "The sign-in window was closed.");
    assert_eq!(
        failure_message(&AuthRequest::Google, &AuthError::default()),
        "Failed to sign in with Google"
    );
}

// =============================================================
// Async lifecycle
// =============================================================

#[test]
fn successful_login_navigates_home_once() {
    let form = TestForm::new(filled(AuthMode::SignIn));
    let provider = FakeProvider::ok();
    let nav = RecordingNavigator::default();

    let outcome = block_on(submit_credentials(&form, &provider, &nav));

    assert_eq!(outcome, SubmitOutcome::Navigated);
    assert_eq!(nav.visited(), vec!["/".to_owned()]);
    assert_eq!(provider.calls(), vec!["login:admin@example.com:secret123".to_owned()]);
    let state = form.snapshot();
    assert!(!state.loading);
    assert!(state.error.is_none());
}

#[test]
fn successful_signup_navigates_home_once() {
    let form = TestForm::new(filled(AuthMode::SignUp));
    let provider = FakeProvider::ok();
    let nav = RecordingNavigator::default();

    let outcome = block_on(submit_credentials(&form, &provider, &nav));

    assert_eq!(outcome, SubmitOutcome::Navigated);
    assert_eq!(nav.visited(), vec!["/".to_owned()]);
    assert_eq!(provider.calls(), vec!["signup:admin@example.com:secret123".to_owned()]);
    assert!(!form.snapshot().loading);
}

#[test]
fn failed_login_shows_generic_message_and_stays() {
    let form = TestForm::new(filled(AuthMode::SignIn));
    let provider = FakeProvider::failing(AuthError::new(CODE_USER_NOT_FOUND, "no such user"));
    let nav = RecordingNavigator::default();

    let outcome = block_on(submit_credentials(&form, &provider, &nav));

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert!(nav.visited().is_empty());
    let state = form.snapshot();
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("Invalid email or password"));
}

#[test]
fn failed_signup_with_existing_email_shows_login_hint() {
    let form = TestForm::new(filled(AuthMode::SignUp));
    let provider = FakeProvider::failing(AuthError::with_code(CODE_EMAIL_ALREADY_IN_USE));
    let nav = RecordingNavigator::default();

    assert_eq!(block_on(submit_credentials(&form, &provider, &nav)), SubmitOutcome::Failed);
    assert_eq!(form.snapshot().error.as_deref(), Some(EMAIL_IN_USE_MESSAGE));
}

#[test]
fn invalid_input_never_reaches_provider() {
    let mut state = filled(AuthMode::SignUp);
    state.password = "abc".to_owned();
    let form = TestForm::new(state);
    let provider = FakeProvider::ok();
    let nav = RecordingNavigator::default();

    let outcome = block_on(submit_credentials(&form, &provider, &nav));

    assert_eq!(outcome, SubmitOutcome::Rejected(SubmitRejected::Invalid));
    assert!(provider.calls().is_empty());
    assert_eq!(form.snapshot().error.as_deref(), Some(PASSWORD_TOO_SHORT_MESSAGE));
}

#[test]
fn google_success_and_failure() {
    let form = TestForm::new(AuthFormState::default());
    let nav = RecordingNavigator::default();

    let failing = FakeProvider::failing(AuthError::default());
    assert_eq!(block_on(submit_federated(&form, &failing, &nav)), SubmitOutcome::Failed);
    assert_eq!(form.snapshot().error.as_deref(), Some(GOOGLE_FAILED_MESSAGE));
    assert!(!form.snapshot().loading);

    let ok = FakeProvider::ok();
    assert_eq!(block_on(submit_federated(&form, &ok, &nav)), SubmitOutcome::Navigated);
    assert_eq!(ok.calls(), vec!["google".to_owned()]);
    assert_eq!(nav.visited(), vec!["/".to_owned()]);
    assert!(form.snapshot().error.is_none());
}

#[test]
fn retry_after_failure_is_allowed() {
    let form = TestForm::new(filled(AuthMode::SignIn));
    let nav = RecordingNavigator::default();

    let failing = FakeProvider::failing(AuthError::default());
    assert_eq!(block_on(submit_credentials(&form, &failing, &nav)), SubmitOutcome::Failed);

    let ok = FakeProvider::ok();
    assert_eq!(block_on(submit_credentials(&form, &ok, &nav)), SubmitOutcome::Navigated);
    assert_eq!(nav.visited(), vec!["/".to_owned()]);
}

#[test]
fn second_submit_while_pending_is_rejected() {
    let form = TestForm::new(filled(AuthMode::SignIn));
    let (provider, release) = GatedProvider::new();
    let nav = RecordingNavigator::default();

    block_on(async {
        let first = submit_credentials(&form, &provider, &nav);
        futures::pin_mut!(first);
        assert!(futures::poll!(first.as_mut()).is_pending());
        assert!(form.snapshot().loading);

        assert_eq!(
            submit_credentials(&form, &provider, &nav).await,
            SubmitOutcome::Rejected(SubmitRejected::InFlight)
        );
        assert_eq!(
            submit_federated(&form, &provider, &nav).await,
            SubmitOutcome::Rejected(SubmitRejected::InFlight)
        );
        assert!(!form.0.borrow_mut().as_mut().unwrap().toggle_mode());

        release.send(Ok(())).unwrap();
        assert_eq!(first.await, SubmitOutcome::Navigated);
    });

    assert_eq!(*provider.calls.borrow(), 1);
    assert_eq!(nav.visited(), vec!["/".to_owned()]);
    assert!(!form.snapshot().loading);
}

#[test]
fn result_after_unmount_is_dropped() {
    let form = TestForm::new(filled(AuthMode::SignIn));
    let (provider, release) = GatedProvider::new();
    let nav = RecordingNavigator::default();

    let outcome = block_on(async {
        let pending = submit_credentials(&form, &provider, &nav);
        futures::pin_mut!(pending);
        assert!(futures::poll!(pending.as_mut()).is_pending());

        form.dispose();
        release.send(Ok(())).unwrap();
        pending.await
    });

    assert_eq!(outcome, SubmitOutcome::Detached);
    assert!(nav.visited().is_empty());
}

#[test]
fn submit_on_disposed_form_does_nothing() {
    let form = TestForm::new(AuthFormState::default());
    form.dispose();
    let provider = FakeProvider::ok();
    let nav = RecordingNavigator::default();

    assert_eq!(block_on(submit_federated(&form, &provider, &nav)), SubmitOutcome::Detached);
    assert!(provider.calls().is_empty());
}

// =============================================================
// Labels
// =============================================================

#[test]
fn submit_label_reflects_mode_and_loading() {
    assert_eq!(AuthMode::SignIn.submit_label(false), "Sign In");
    assert_eq!(AuthMode::SignIn.submit_label(true), "Signing in...");
    assert_eq!(AuthMode::SignUp.submit_label(false), "Create Account");
    assert_eq!(AuthMode::SignUp.submit_label(true), "Creating Account...");
}
