use std::time::Duration;

use dioxus::prelude::*;

use crate::notify::{NotificationVariant, Toast, Toaster};
use crate::timer::use_scheduler;

/// How long a toast stays up unless dismissed by hand.
pub const TOAST_LIFETIME: Duration = Duration::from_secs(5);

/// Renders the toaster's notifications, newest last.
#[component]
pub fn ToastStack(toaster: Toaster) -> Element {
    let toasts = toaster.toasts();

    if toasts.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "toast-stack",
            role: "status",
            "aria-live": "polite",
            for toast in toasts {
                ToastItem { key: "{toast.id}", toaster, toast }
            }
        }
    }
}

#[component]
fn ToastItem(toaster: Toaster, toast: Toast) -> Element {
    let scheduler = use_scheduler();
    let id = toast.id;

    use_hook(move || scheduler.schedule(TOAST_LIFETIME, move || toaster.dismiss(id)));

    let class = match toast.notification.variant {
        NotificationVariant::Destructive => "toast destructive",
        NotificationVariant::Informational => "toast info",
    };

    rsx! {
        div {
            class,
            div {
                class: "toast-body",
                strong { class: "toast-title", "{toast.notification.title}" }
                if !toast.notification.description.is_empty() {
                    p { class: "toast-description", "{toast.notification.description}" }
                }
            }
            button {
                class: "toast-close",
                r#type: "button",
                title: "Dismiss",
                onclick: move |_| toaster.dismiss(id),
                "×"
            }
        }
    }
}
