use std::rc::Rc;

use dioxus::prelude::*;

use api::SupabaseAuth;

use crate::navigation::Destination;
use crate::notify::Toaster;
use crate::password::{ForgotPasswordFlow, ForgotView};

use super::VIEWS_CSS;

/// Request a password-recovery email.
///
/// `redirect_to` is the absolute URL of the reset-password page the email links to.
#[component]
pub fn ForgotPasswordView(
    auth: SupabaseAuth,
    toaster: Toaster,
    redirect_to: String,
    on_navigate: EventHandler<Destination>,
) -> Element {
    let mut view = use_signal(ForgotView::default);
    let mut email = use_signal(String::new);
    let mut loading = use_signal(|| false);

    let flow = use_hook(move || Rc::new(ForgotPasswordFlow::new(auth, toaster, redirect_to)));

    let submit_flow = flow.clone();
    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let flow = submit_flow.clone();
        spawn(async move {
            loading.set(true);
            let next = flow.request_reset(&email()).await;
            view.set(next);
            loading.set(false);
        });
    };

    let handle_resend = move |_| {
        let flow = flow.clone();
        spawn(async move {
            loading.set(true);
            let current = view();
            let next = flow.resend_reset(&current).await;
            view.set(next);
            loading.set(false);
        });
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                match view() {
                    ForgotView::Form => rsx! {
                        h1 { class: "auth-title", "Forgot your password?" }
                        p {
                            class: "auth-subtitle",
                            "Enter your email and we'll send you a reset link."
                        }
                        form {
                            class: "auth-form",
                            onsubmit: handle_submit,
                            label { r#for: "email", "Email" }
                            input {
                                id: "email",
                                r#type: "email",
                                placeholder: "you@example.com",
                                value: "{email}",
                                disabled: loading(),
                                oninput: move |e: FormEvent| email.set(e.value()),
                            }
                            button {
                                class: "auth-btn primary",
                                r#type: "submit",
                                disabled: loading(),
                                if loading() { "Sending..." } else { "Send reset link" }
                            }
                        }
                    },
                    ForgotView::Confirmation { email } => rsx! {
                        h1 { class: "auth-title", "Check your email" }
                        p { class: "auth-subtitle", "We sent a password reset link to {email}." }
                        button {
                            class: "auth-btn secondary",
                            r#type: "button",
                            disabled: loading(),
                            onclick: handle_resend,
                            if loading() { "Sending..." } else { "Resend email" }
                        }
                    },
                }
                button {
                    class: "auth-link",
                    r#type: "button",
                    onclick: move |_| on_navigate.call(Destination::Login),
                    "Back to sign in"
                }
            }
        }
    }
}
