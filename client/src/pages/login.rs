//! Admin login page supporting email/password and Google sign-in.
//!
//! SYSTEM CONTEXT
//! ==============
//! Form state lives in a page-scoped signal, so it is disposed when the route
//! unmounts. Submissions run through `state::auth_form`, which owns the
//! in-flight guard, error mapping and the redirect to `/` on success.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::config::IdentityConfig;
use crate::net::identity::IdentityToolkit;
use crate::state::auth::AuthState;
use crate::state::auth_form::{AuthFormState, AuthMode, MIN_SIGNUP_PASSWORD_LEN, submit_credentials, submit_federated};

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<RwSignal<AuthState>>();
    let form = RwSignal::new(AuthFormState::default());
    let provider = IdentityToolkit::new(IdentityConfig::from_build_env(), session);
    let navigate = use_navigate();

    let on_submit = {
        let provider = provider.clone();
        let navigate = navigate.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let provider = provider.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let navigator = move |path: &str| navigate(path, NavigateOptions::default());
                submit_credentials(&form, &provider, &navigator).await;
            });
        }
    };

    let on_google = {
        let navigate = navigate.clone();
        move |_| {
            let provider = provider.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let navigator = move |path: &str| navigate(path, NavigateOptions::default());
                submit_federated(&form, &provider, &navigator).await;
            });
        }
    };

    let mode = move || form.with(|f| f.mode);
    let loading = move || form.with(|f| f.loading);

    view! {
        <div class="login-page">
            <div class="login-card">
                <div class="login-card__badge" aria-hidden="true">"🔒"</div>
                <h1>{move || mode().title()}</h1>
                <p class="login-card__subtitle">{move || mode().subtitle()}</p>

                <form class="login-form" on:submit=on_submit>
                    <Show when=move || form.with(|f| f.error.is_some())>
                        <p class="login-message login-message--error" role="alert">
                            {move || form.with(|f| f.error.clone().unwrap_or_default())}
                        </p>
                    </Show>

                    <label class="login-label">
                        "Email"
                        <input
                            class="login-input"
                            type="email"
                            placeholder="admin@example.com"
                            required
                            prop:value=move || form.with(|f| f.email.clone())
                            on:input=move |ev| form.update(|f| f.set_email(event_target_value(&ev)))
                        />
                    </label>

                    <label class="login-label">
                        "Password"
                        <input
                            class="login-input"
                            type="password"
                            placeholder="••••••••"
                            required
                            minlength=move || (mode() == AuthMode::SignUp).then(|| MIN_SIGNUP_PASSWORD_LEN.to_string())
                            prop:value=move || form.with(|f| f.password.clone())
                            on:input=move |ev| form.update(|f| f.set_password(event_target_value(&ev)))
                        />
                    </label>
                    <Show when=move || mode() == AuthMode::SignUp>
                        <p class="login-hint">"Password must be at least 6 characters"</p>
                    </Show>

                    <button class="login-button" type="submit" disabled=loading>
                        {move || mode().submit_label(loading())}
                    </button>
                </form>

                <div class="login-divider"><span>"Or continue with"</span></div>
                <button class="login-button login-button--google" type="button" disabled=loading on:click=on_google>
                    "Sign in with Google"
                </button>

                <div class="login-card__footer">
                    <button
                        class="login-link"
                        type="button"
                        disabled=loading
                        on:click=move |_| {
                            form.update(|f| {
                                f.toggle_mode();
                            });
                        }
                    >
                        {move || mode().toggle_prompt()}
                    </button>
                    <a class="login-link login-link--home" href="/">"Back to Home"</a>
                </div>
            </div>
        </div>
    }
}
