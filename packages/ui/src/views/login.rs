//! Sign-in page with email/password form and OAuth buttons.

use dioxus::prelude::*;

use api::SupabaseAuth;

use crate::navigation::Destination;
use crate::notify::{Notification, NotificationSink, Toaster};
use crate::password::validate_email;
use crate::LoginButton;

use super::VIEWS_CSS;

#[component]
pub fn LoginView(
    auth: SupabaseAuth,
    toaster: Toaster,
    /// Absolute URL of the auth callback page, handed to OAuth providers.
    callback_url: String,
    on_navigate: EventHandler<Destination>,
) -> Element {
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let password_auth = auth.clone();
    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let auth = password_auth.clone();
        spawn(async move {
            error.set(None);

            let e = match validate_email(&email()) {
                Ok(e) => e,
                Err(err) => {
                    error.set(Some(err.to_string()));
                    return;
                }
            };
            let p = password();
            if p.is_empty() {
                error.set(Some("Password is required".to_string()));
                return;
            }

            loading.set(true);
            match auth.sign_in_with_password(&e, &p).await {
                Ok(user) => {
                    tracing::info!(user_id = %user.id, "Signed in with password");
                    toaster.notify(Notification::info(
                        "Welcome back!",
                        format!("Signed in as {}.", user.display_name()),
                    ));
                    on_navigate.call(Destination::Dashboard);
                }
                Err(err) => {
                    tracing::warn!("Password sign in failed: {}", err);
                    let message = err
                        .provider_message()
                        .unwrap_or_else(|| "Could not sign in. Please try again.".to_string());
                    error.set(Some(message));
                }
            }
            loading.set(false);
        });
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h1 { class: "auth-title", "Sign in to miamour" }
                p { class: "auth-subtitle", "Plan your celebration with us." }

                form {
                    class: "auth-form",
                    onsubmit: handle_login,
                    label { r#for: "email", "Email" }
                    input {
                        id: "email",
                        r#type: "email",
                        placeholder: "you@example.com",
                        value: "{email}",
                        disabled: loading(),
                        oninput: move |e: FormEvent| email.set(e.value()),
                    }
                    label { r#for: "password", "Password" }
                    input {
                        id: "password",
                        r#type: "password",
                        value: "{password}",
                        disabled: loading(),
                        oninput: move |e: FormEvent| password.set(e.value()),
                    }
                    if let Some(message) = error() {
                        p { class: "auth-error", "{message}" }
                    }
                    button {
                        class: "auth-btn primary",
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Signing in..." } else { "Sign in" }
                    }
                }

                button {
                    class: "auth-link",
                    r#type: "button",
                    onclick: move |_| on_navigate.call(Destination::ForgotPassword),
                    "Forgot your password?"
                }

                div { class: "auth-divider", span { "or" } }

                div {
                    class: "oauth-buttons",
                    LoginButton {
                        auth: auth.clone(),
                        toaster,
                        provider: "google",
                        redirect_to: callback_url.clone(),
                        label: "Continue with Google",
                        class: "auth-btn oauth google",
                    }
                    LoginButton {
                        auth: auth.clone(),
                        toaster,
                        provider: "facebook",
                        redirect_to: callback_url.clone(),
                        label: "Continue with Facebook",
                        class: "auth-btn oauth facebook",
                    }
                }
            }
        }
    }
}
