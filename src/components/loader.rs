//! Loader Component

use leptos::prelude::*;

/// Spinner shown while the first listing is in flight
#[component]
pub fn Loader() -> impl IntoView {
    view! {
        <div class="loader">
            <div class="loader-rings">
                <div class="loader-ring"></div>
                <div class="loader-ring delayed"></div>
            </div>
            <span class="loader-text">"Loading todos..."</span>
        </div>
    }
}
