//! Public "Our Story" page.

use leptos::prelude::*;

#[component]
pub fn OurStoryPage() -> impl IntoView {
    view! {
        <main class="marketing">
            <h1>"Our Story"</h1>
            <p>"We started with one workbench and a handful of customers who cared how things are made."</p>
            <a href="/">"Back to the shop"</a>
        </main>
    }
}
