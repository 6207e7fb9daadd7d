//! Sign-in page: email verification code, guest-only.
//!
//! SYSTEM CONTEXT
//! ==============
//! Uses the requirement hook with the inverted policy, so a visitor who is
//! already signed in is pushed to `/`. After a successful sign-in the page
//! returns to the `from` query parameter the guard attached, falling back to
//! `/` when it is missing or unsafe.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use access::{PolicyConfig, origin_from_query, return_path};
use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::components::spinner::Spinner;
use crate::util::auth::use_require_auth;

const CODE_LEN: usize = 6;

pub(crate) fn normalize_code_input(raw: &str) -> String {
    raw.to_ascii_uppercase()
}

pub(crate) fn validate_request_code_input(email: &str) -> Result<String, &'static str> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Enter an email first.");
    }
    Ok(email.to_owned())
}

pub(crate) fn validate_verify_code_input(email: &str, code: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    let code = code.trim();
    if email.is_empty() || code.chars().count() != CODE_LEN {
        return Err("Enter both email and 6-char code.");
    }
    Ok((email.to_owned(), code.to_owned()))
}

/// Where to go once signed in, given the login page's query string.
pub(crate) fn post_login_target(search: &str) -> String {
    return_path(origin_from_query(search).as_deref()).to_owned()
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_require_auth(PolicyConfig::guest_only());
    let search = use_location().search;

    let email = RwSignal::new(String::new());
    let code = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let echoed_code = RwSignal::new(None::<String>);

    let on_request_code = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email_value = match validate_request_code_input(&email.get()) {
            Ok(value) => value,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Sending code...".to_owned());
        echoed_code.set(None);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::request_email_login_code(&email_value).await {
                Ok(code_opt) => {
                    echoed_code.set(code_opt);
                    info.set("Check your email for a 6-character code.".to_owned());
                }
                Err(e) => info.set(e),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = email_value;
    };

    let on_verify_code = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, code_value) = match validate_verify_code_input(&email.get(), &code.get()) {
            Ok(values) => values,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Verifying code...".to_owned());
        let target = post_login_target(&search.get_untracked());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::verify_email_login_code(&email_value, &code_value).await {
                Ok(()) => {
                    log::debug!("signed in, returning to {target}");
                    // Full reload so the provider re-resolves the new session.
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href(&target);
                    }
                }
                Err(e) => {
                    info.set(e);
                    busy.set(false);
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (email_value, code_value, target);
    };

    let show_form = move || auth.with(|state| !state.loading && state.user.is_none());

    view! {
        <Show
            when=show_form
            fallback=move || auth.with(|state| state.loading).then(|| view! { <Spinner/> })
        >
            <div class="login-page">
                <div class="login-card">
                    <h1>"Sign in"</h1>
                    <p class="login-card__subtitle">"We'll email you a 6-character code."</p>
                    <form class="login-form" on:submit=on_request_code>
                        <input
                            class="login-input"
                            type="email"
                            placeholder="you@example.com"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                        <button class="login-button" type="submit" disabled=move || busy.get()>
                            "Send code"
                        </button>
                    </form>
                    <form class="login-form" on:submit=on_verify_code>
                        <input
                            class="login-input login-input--code"
                            type="text"
                            maxlength="6"
                            placeholder="ABC123"
                            prop:value=move || code.get()
                            on:input=move |ev| code.set(normalize_code_input(&event_target_value(&ev)))
                        />
                        <button class="login-button" type="submit" disabled=move || busy.get()>
                            "Sign in"
                        </button>
                    </form>
                    <Show when=move || !info.get().is_empty()>
                        <p class="login-message">{move || info.get()}</p>
                    </Show>
                    <Show when=move || echoed_code.get().is_some()>
                        <p class="login-message login-message--code">
                            "Code: "
                            <span>{move || echoed_code.get().unwrap_or_default()}</span>
                        </p>
                    </Show>
                </div>
            </div>
        </Show>
    }
}
