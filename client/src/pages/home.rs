//! Public landing page.

use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <main class="marketing">
            <h1>"Storefront"</h1>
            <p>"Small-batch goods, shipped from our workshop to your door."</p>
            <nav class="marketing__links">
                <a href="/our-story">"Our Story"</a>
                <a href="/dashboard">"Your Account"</a>
            </nav>
        </main>
    }
}
