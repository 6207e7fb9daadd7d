//! Neutral loading indicator.

use leptos::prelude::*;

#[component]
pub fn Spinner() -> impl IntoView {
    view! { <div class="spinner" role="status" aria-live="polite" aria-label="Loading"></div> }
}
