//! Account settings. Enforces sign-in itself through the requirement hook.

use access::PolicyConfig;
use leptos::prelude::*;

use crate::components::spinner::Spinner;
use crate::util::auth::use_require_auth;

#[component]
pub fn SettingsPage() -> impl IntoView {
    let auth = use_require_auth(PolicyConfig::default());

    move || {
        let state = auth.get();
        if state.loading {
            return view! { <Spinner/> }.into_any();
        }
        // Anonymous visitors are being redirected; render nothing meanwhile.
        let Some(user) = state.user else {
            return ().into_any();
        };
        view! {
            <main class="account">
                <h1>"Settings"</h1>
                <dl class="account__details">
                    <dt>"Name"</dt>
                    <dd>{user.name}</dd>
                    <dt>"Email"</dt>
                    <dd>{user.email.unwrap_or_else(|| "not set".to_owned())}</dd>
                </dl>
                <a href="/dashboard">"Back to your account"</a>
            </main>
        }
        .into_any()
    }
}
