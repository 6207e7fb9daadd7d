//! Fallback for unknown routes.

use leptos::prelude::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <main class="marketing">
            <h1>"Page not found"</h1>
            <a href="/">"Back to the shop"</a>
        </main>
    }
}
