//! Error Alert Component
//!
//! Board-wide error state with an explicit retry.

use leptos::prelude::*;

#[component]
pub fn ErrorAlert(
    /// Failure detail from the last listing
    #[prop(into)] message: String,
    #[prop(into)] on_retry: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="error-alert">
            <div class="error-icon">"!"</div>
            <div class="error-title">"Error loading todos"</div>
            <p class="error-hint">"Please try again"</p>
            <p class="error-detail">{message}</p>
            <button class="retry-btn" on:click=move |_| on_retry.run(())>
                "Retry"
            </button>
        </div>
    }
}
