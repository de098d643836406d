//! Build-time configuration for the browser bundle.
//!
//! Values are baked in with `option_env!` when the WASM bundle is compiled,
//! the same way a static site embeds its public identity-provider settings.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Identity provider settings.
///
/// Optional:
/// - `IDENTITY_API_KEY`: public web API key; credential sign-in is disabled without it
/// - `IDENTITY_BASE_URL`: default Identity Toolkit v1 endpoint
/// - `GOOGLE_CLIENT_ID`: OAuth client id; Google sign-in is disabled without it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentityConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub google_client_id: Option<String>,
}

impl IdentityConfig {
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("IDENTITY_API_KEY"),
            option_env!("IDENTITY_BASE_URL"),
            option_env!("GOOGLE_CLIENT_ID"),
        )
    }

    pub fn from_values(api_key: Option<&str>, base_url: Option<&str>, google_client_id: Option<&str>) -> Self {
        Self {
            api_key: non_empty(api_key),
            base_url: non_empty(base_url)
                .unwrap_or_else(|| DEFAULT_IDENTITY_BASE_URL.to_owned())
                .trim_end_matches('/')
                .to_owned(),
            google_client_id: non_empty(google_client_id),
        }
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self::from_values(None, None, None)
    }
}

fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim).filter(|v| !v.is_empty()).map(str::to_owned)
}
