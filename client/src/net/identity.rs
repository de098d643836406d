//! Identity Toolkit REST adapter implementing `AuthProvider`.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, Google sign-in via a
//! popup window.
//! Server-side (SSR): stubs returning an error since sign-in only happens in
//! the browser.
//!
//! ERROR HANDLING
//! ==============
//! Provider error strings (`EMAIL_EXISTS`, `INVALID_LOGIN_CREDENTIALS`, ...)
//! are translated into canonical `auth/*` codes here, so the login form never
//! depends on this provider's vocabulary.
//!
//! GOOGLE FLOW
//! ===========
//! 1. Open a popup on Google's OAuth endpoint with `response_type=id_token`,
//!    redirecting back to `GOOGLE_CALLBACK_PATH` on this origin.
//! 2. Poll the popup. Its location is unreadable while it is on Google; once
//!    it is back on our origin the fragment carries `id_token` or `error`.
//! 3. Exchange the id token through `accounts:signInWithIdp`.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use async_trait::async_trait;
use leptos::prelude::*;
use url::Url;

use super::auth::*;
use crate::config::IdentityConfig;
use crate::state::auth::AuthState;

pub const GOOGLE_AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_CALLBACK_PATH: &str = "/auth/google/callback";
pub const GOOGLE_PROVIDER_ID: &str = "google.com";

#[cfg(feature = "hydrate")]
const POPUP_FEATURES: &str = "width=500,height=600,menubar=no,toolbar=no";
#[cfg(feature = "hydrate")]
const POPUP_POLL_MS: u64 = 250;
#[cfg(feature = "hydrate")]
const POPUP_MAX_POLLS: u32 = 4 * 60 * 5;

/// `AuthProvider` backed by the Identity Toolkit v1 REST API.
///
/// Successful sign-ins are recorded in the shared `AuthState` signal.
#[derive(Clone, Debug)]
pub struct IdentityToolkit {
    config: IdentityConfig,
    session: RwSignal<AuthState>,
}

impl IdentityToolkit {
    pub fn new(config: IdentityConfig, session: RwSignal<AuthState>) -> Self {
        Self { config, session }
    }

    #[cfg(feature = "hydrate")]
    fn api_key(&self) -> Result<&str, AuthError> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| AuthError::new(CODE_OPERATION_NOT_ALLOWED, "Sign-in is not configured for this site."))
    }

    #[cfg(feature = "hydrate")]
    async fn sign_in<B: serde::Serialize>(&self, method: &str, body: &B) -> Result<(), AuthError> {
        let url = identity_endpoint(&self.config.base_url, method, self.api_key()?)?;
        let resp = gloo_net::http::Request::post(url.as_str())
            .json(body)
            .map_err(|e| AuthError::network(e.to_string()))?
            .send()
            .await
            .map_err(|e| AuthError::network(e.to_string()))?;
        if !resp.ok() {
            let status = resp.status();
            return Err(match resp.json::<super::types::ErrorEnvelope>().await {
                Ok(envelope) => translate_provider_error(&envelope.error.message),
                Err(_) => AuthError::new(CODE_INTERNAL, identity_failed_message(status)),
            });
        }
        let body: super::types::SignInResponse =
            resp.json().await.map_err(|e| AuthError::new(CODE_INTERNAL, e.to_string()))?;
        let user = body.user();
        log::info!("signed in as {}", user.email.as_deref().unwrap_or(&user.id));
        let _ = self.session.try_update(|s| s.signed_in(user));
        Ok(())
    }
}

#[async_trait(?Send)]
impl AuthProvider for IdentityToolkit {
    async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let body = super::types::PasswordRequest { email, password, return_secure_token: true };
            self.sign_in("accounts:signInWithPassword", &body).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password);
            Err(not_available())
        }
    }

    async fn signup(&self, email: &str, password: &str) -> Result<(), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let body = super::types::PasswordRequest { email, password, return_secure_token: true };
            self.sign_in("accounts:signUp", &body).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password);
            Err(not_available())
        }
    }

    async fn login_with_google(&self) -> Result<(), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let client_id = self
                .config
                .google_client_id
                .as_deref()
                .ok_or_else(|| AuthError::new(CODE_OPERATION_NOT_ALLOWED, "Google sign-in is not enabled."))?;
            self.api_key()?;
            let origin = browser_origin()?;
            let id_token = google_popup_id_token(client_id, &origin).await?;
            let body = super::types::IdpRequest {
                post_body: idp_post_body(&id_token),
                request_uri: origin,
                return_secure_token: true,
                return_idp_credential: true,
            };
            self.sign_in("accounts:signInWithIdp", &body).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(not_available())
        }
    }
}

#[cfg(not(feature = "hydrate"))]
fn not_available() -> AuthError {
    AuthError::new(CODE_OPERATION_NOT_ALLOWED, "not available on server")
}

#[cfg(any(test, feature = "hydrate"))]
fn identity_failed_message(status: u16) -> String {
    format!("identity request failed: {status}")
}

/// Build `{base}/{method}?key={api_key}`.
///
/// # Errors
///
/// Returns `auth/internal-error` when the configured base URL is not a URL.
pub fn identity_endpoint(base_url: &str, method: &str, api_key: &str) -> Result<Url, AuthError> {
    Url::parse_with_params(&format!("{base_url}/{method}"), &[("key", api_key)])
        .map_err(|e| AuthError::new(CODE_INTERNAL, format!("invalid identity endpoint: {e}")))
}

/// Google OAuth URL that returns an id token in the redirect fragment.
///
/// # Errors
///
/// Returns `auth/internal-error` if the authorize endpoint cannot be parsed.
pub fn google_authorize_url(client_id: &str, redirect_uri: &str, nonce: &str) -> Result<Url, AuthError> {
    Url::parse_with_params(
        GOOGLE_AUTHORIZE_URL,
        &[
            ("client_id", client_id),
            ("redirect_uri", redirect_uri),
            ("response_type", "id_token"),
            ("scope", "openid email profile"),
            ("nonce", nonce),
            ("prompt", "select_account"),
        ],
    )
    .map_err(|e| AuthError::new(CODE_INTERNAL, format!("invalid authorize url: {e}")))
}

/// Read the OAuth redirect fragment.
///
/// Returns `None` when the fragment carries neither a token nor an error.
pub fn id_token_from_fragment(fragment: &str) -> Option<Result<String, AuthError>> {
    let pairs = url::form_urlencoded::parse(fragment.trim_start_matches('#').as_bytes());
    let mut error = None;
    for (key, value) in pairs {
        match key.as_ref() {
            "id_token" if !value.is_empty() => return Some(Ok(value.into_owned())),
            "error" => error = Some(value.into_owned()),
            _ => {}
        }
    }
    error.map(|e| {
        Err(match e.as_str() {
            "access_denied" => AuthError::new(CODE_USER_CANCELLED, "Google sign-in was cancelled."),
            other => AuthError::new(CODE_INTERNAL, format!("Google sign-in failed: {other}")),
        })
    })
}

/// Form-encoded credential for `accounts:signInWithIdp`.
pub fn idp_post_body(id_token: &str) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("id_token", id_token)
        .append_pair("providerId", GOOGLE_PROVIDER_ID)
        .finish()
}

/// Translate an Identity Toolkit error string into a canonical `AuthError`.
///
/// Some messages carry detail after ` : `, e.g.
/// `WEAK_PASSWORD : Password should be at least 6 characters`.
pub fn translate_provider_error(raw: &str) -> AuthError {
    let (reason, detail) = match raw.split_once(" : ") {
        Some((reason, detail)) => (reason.trim(), Some(detail.trim())),
        None => (raw.trim(), None),
    };
    let (code, message) = match reason {
        "EMAIL_EXISTS" => (CODE_EMAIL_ALREADY_IN_USE, "This email is already registered."),
        "EMAIL_NOT_FOUND" => (CODE_USER_NOT_FOUND, "No account exists for this email."),
        "INVALID_PASSWORD" => (CODE_WRONG_PASSWORD, "The password is incorrect."),
        "INVALID_LOGIN_CREDENTIALS" => (CODE_INVALID_CREDENTIAL, "The email or password is incorrect."),
        "INVALID_IDP_RESPONSE" => (CODE_INVALID_CREDENTIAL, "Google sign-in could not be verified."),
        "USER_DISABLED" => (CODE_USER_DISABLED, "This account has been disabled."),
        "INVALID_EMAIL" => (CODE_INVALID_EMAIL, "The email address is badly formatted."),
        "WEAK_PASSWORD" => (CODE_WEAK_PASSWORD, "Password should be at least 6 characters."),
        "MISSING_PASSWORD" => (CODE_WEAK_PASSWORD, "Please enter a password."),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => (CODE_TOO_MANY_REQUESTS, "Too many attempts. Please try again later."),
        "OPERATION_NOT_ALLOWED" => (CODE_OPERATION_NOT_ALLOWED, "This sign-in method is disabled."),
        _ => return AuthError::new(CODE_INTERNAL, raw.trim()),
    };
    AuthError::new(code, detail.filter(|d| !d.is_empty()).unwrap_or(message))
}

#[cfg(feature = "hydrate")]
fn browser_origin() -> Result<String, AuthError> {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .ok_or_else(|| AuthError::new(CODE_INTERNAL, "browser window unavailable"))
}

#[cfg(feature = "hydrate")]
fn random_nonce() -> String {
    format!("{:016x}{:016x}", js_sys::Math::random().to_bits(), js_sys::Date::now().to_bits())
}

#[cfg(feature = "hydrate")]
async fn google_popup_id_token(client_id: &str, origin: &str) -> Result<String, AuthError> {
    let window = web_sys::window().ok_or_else(|| AuthError::new(CODE_INTERNAL, "browser window unavailable"))?;
    let redirect_uri = format!("{origin}{GOOGLE_CALLBACK_PATH}");
    let authorize = google_authorize_url(client_id, &redirect_uri, &random_nonce())?;
    let popup = window
        .open_with_url_and_target_and_features(authorize.as_str(), "google-sign-in", POPUP_FEATURES)
        .ok()
        .flatten()
        .ok_or_else(|| AuthError::new(CODE_POPUP_BLOCKED, "The sign-in window was blocked by the browser."))?;

    for _ in 0..POPUP_MAX_POLLS {
        gloo_timers::future::sleep(std::time::Duration::from_millis(POPUP_POLL_MS)).await;
        if popup.closed().unwrap_or(true) {
            return Err(AuthError::new(CODE_POPUP_CLOSED, "The sign-in window was closed before completing."));
        }
        // Cross-origin reads throw until the popup is back on our origin.
        let Ok(href) = popup.location().href() else {
            continue;
        };
        if !href.starts_with(&redirect_uri) {
            continue;
        }
        let fragment = popup.location().hash().unwrap_or_default();
        let _ = popup.close();
        return id_token_from_fragment(&fragment)
            .unwrap_or_else(|| Err(AuthError::new(CODE_INTERNAL, "Google did not return an id token.")));
    }

    let _ = popup.close();
    Err(AuthError::new(CODE_TIMEOUT, "Google sign-in timed out."))
}
