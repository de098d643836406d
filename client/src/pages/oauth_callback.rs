//! Landing page for the Google sign-in popup.
//!
//! SYSTEM CONTEXT
//! ==============
//! Google redirects the popup here with the id token in the URL fragment. The
//! opener window reads the fragment and closes the popup, so this page only
//! has to render something while that happens.

use leptos::prelude::*;

#[component]
pub fn OAuthCallbackPage() -> impl IntoView {
    view! {
        <div class="login-page">
            <div class="login-card">
                <p class="login-card__subtitle">"Completing sign-in..."</p>
                <a class="login-link" href="/">"Back to Home"</a>
            </div>
        </div>
    }
}
