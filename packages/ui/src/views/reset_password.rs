use std::rc::Rc;

use dioxus::prelude::*;

use api::SupabaseAuth;

use crate::navigation::{current_fragment, Destination};
use crate::notify::Toaster;
use crate::password::{ResetPasswordFlow, ResetView, MIN_PASSWORD_LEN};
use crate::timer::use_scheduler;

use super::VIEWS_CSS;

/// Choose a new password after following a recovery link.
///
/// Visitors without a recovery link or a session are sent to forgot-password.
#[component]
pub fn ResetPasswordView(
    auth: SupabaseAuth,
    toaster: Toaster,
    on_navigate: EventHandler<Destination>,
) -> Element {
    let mut view = use_signal(ResetView::default);
    let mut allowed = use_signal(|| false);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);
    let scheduler = use_scheduler();

    let flow = use_hook(move || Rc::new(ResetPasswordFlow::new(auth, toaster)));

    let guard_flow = flow.clone();
    use_effect(move || match guard_flow.guard(&current_fragment()) {
        Some(destination) => on_navigate.call(destination),
        None => allowed.set(true),
    });

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let flow = flow.clone();
        spawn(async move {
            error.set(None);
            loading.set(true);
            match flow.submit(&password(), &confirm_password()).await {
                Ok(redirect) => {
                    view.set(ResetView::Complete);
                    scheduler.schedule(redirect.after, move || on_navigate.call(redirect.to));
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            loading.set(false);
        });
    };

    if !allowed() {
        return rsx! {};
    }

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                match view() {
                    ResetView::Form => rsx! {
                        h1 { class: "auth-title", "Set a new password" }
                        p { class: "auth-subtitle", "Use at least {MIN_PASSWORD_LEN} characters." }
                        form {
                            class: "auth-form",
                            onsubmit: handle_submit,
                            label { r#for: "password", "New password" }
                            input {
                                id: "password",
                                r#type: "password",
                                value: "{password}",
                                disabled: loading(),
                                oninput: move |e: FormEvent| password.set(e.value()),
                            }
                            label { r#for: "confirm-password", "Confirm password" }
                            input {
                                id: "confirm-password",
                                r#type: "password",
                                value: "{confirm_password}",
                                disabled: loading(),
                                oninput: move |e: FormEvent| confirm_password.set(e.value()),
                            }
                            if let Some(message) = error() {
                                p { class: "auth-error", "{message}" }
                            }
                            button {
                                class: "auth-btn primary",
                                r#type: "submit",
                                disabled: loading(),
                                if loading() { "Updating..." } else { "Update password" }
                            }
                        }
                    },
                    ResetView::Complete => rsx! {
                        h1 { class: "auth-title", "Password updated" }
                        p { class: "auth-subtitle", "Redirecting you to sign in..." }
                    },
                }
            }
        }
    }
}
