use leptos::prelude::*;

/// Full-height spinner shown while the product source is loading.
#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="loading" role="status" aria-label="Loading">
            <div class="loading__spinner"></div>
        </div>
    }
}
