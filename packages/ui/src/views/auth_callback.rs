use dioxus::prelude::*;

use api::SupabaseAuth;

use crate::callback::{CallbackOutcome, CallbackReconciler, SuccessKind};
use crate::navigation::{current_fragment, Destination};
use crate::notify::Toaster;
use crate::timer::use_scheduler;
use crate::Loader;

use super::VIEWS_CSS;

/// Landing page for identity-provider redirects.
///
/// Reconciles the redirect once on mount, then either schedules the follow-up
/// navigation or offers a retry. A pending redirect is dropped if the page unmounts.
#[component]
pub fn AuthCallbackView(
    auth: SupabaseAuth,
    toaster: Toaster,
    on_navigate: EventHandler<Destination>,
) -> Element {
    let mut outcome = use_signal(CallbackOutcome::default);
    let scheduler = use_scheduler();

    use_hook(move || {
        let reconciler = CallbackReconciler::new(auth, toaster);
        scheduler.run(async move {
            let fragment = current_fragment();
            let result = reconciler.reconcile(&fragment).await;

            if !outcome.write().settle(result.outcome) {
                return;
            }
            if let Some(redirect) = result.redirect {
                scheduler.schedule(redirect.after, move || on_navigate.call(redirect.to));
            }
        })
    });

    let current = outcome();
    let retry = current.retry_destination();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                match current {
                    CallbackOutcome::Processing => rsx! {
                        h1 { class: "auth-title", "Signing you in" }
                        p {
                            class: "auth-subtitle",
                            "Please wait while we complete authentication..."
                        }
                        Loader { pending: true }
                    },
                    CallbackOutcome::Success(SuccessKind::Login) => rsx! {
                        h1 { class: "auth-title", "Welcome back!" }
                        p { class: "auth-subtitle", "Redirecting you to your dashboard..." }
                    },
                    CallbackOutcome::Success(SuccessKind::PasswordRecovery) => rsx! {
                        h1 { class: "auth-title", "Link verified" }
                        p { class: "auth-subtitle", "Redirecting you to choose a new password..." }
                    },
                    CallbackOutcome::Error(message) => rsx! {
                        h1 { class: "auth-title", "Authentication failed" }
                        p { class: "auth-error", "{message}" }
                    },
                }
                if let Some(destination) = retry {
                    button {
                        class: "auth-btn primary",
                        r#type: "button",
                        onclick: move |_| on_navigate.call(destination),
                        "Try Again"
                    }
                }
            }
        }
    }
}
