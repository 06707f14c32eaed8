//! Task Master App
//!
//! Page shell: title, task input and the three-column board.

use leptos::prelude::*;
use task_board::ApiConfig;

use crate::components::{TodoBoard, TodoInput};
use crate::context::BoardContext;

/// Resolve the API endpoint, honouring a build-time `TASK_MASTER_API_URL`.
fn api_config() -> ApiConfig {
    ApiConfig::from_override(option_env!("TASK_MASTER_API_URL")).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring TASK_MASTER_API_URL, using default collection");
        ApiConfig::default()
    })
}

#[component]
pub fn App() -> impl IntoView {
    let config = api_config();
    tracing::info!(base_url = %config.base_url, "[APP] starting");

    // Provide context to all children
    provide_context(BoardContext::new(config));

    view! {
        <div class="app-shell">
            <div class="app-container">
                <header class="app-header">
                    <h1 class="app-title">"Task Master"</h1>
                    <div class="app-title-rule"></div>
                    <TodoInput />
                </header>

                <main class="board-wrapper">
                    <TodoBoard />
                </main>

                <footer class="app-footer">"Built with passion"</footer>
            </div>
        </div>
    }
}
