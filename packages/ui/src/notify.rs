//! In-app notifications.
//!
//! Flows report outcomes through the [`NotificationSink`] trait. The app-wide
//! implementation is [`Toaster`], a signal-backed list rendered by
//! [`ToastStack`](crate::ToastStack).

use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationVariant {
    Informational,
    Destructive,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Informational,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Destructive,
        }
    }
}

/// Anything that can show a transient message to the user.
pub trait NotificationSink {
    fn notify(&self, notification: Notification);
}

impl<T: NotificationSink + ?Sized> NotificationSink for &T {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub notification: Notification,
}

/// Signal-backed notification sink shared by the whole app.
///
/// Create it once at the composition root with [`use_toaster`] and pass copies to
/// the views that need it.
#[derive(Clone, Copy, PartialEq)]
pub struct Toaster {
    toasts: Signal<Vec<Toast>>,
    next_id: Signal<u64>,
}

impl Toaster {
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.read().clone()
    }

    pub fn dismiss(&self, id: u64) {
        let mut toasts = self.toasts;
        toasts.write().retain(|t| t.id != id);
    }
}

impl NotificationSink for Toaster {
    fn notify(&self, notification: Notification) {
        let mut next_id = self.next_id;
        let id = *next_id.peek();
        next_id.set(id + 1);

        let mut toasts = self.toasts;
        toasts.write().push(Toast { id, notification });
    }
}

/// Create the app's [`Toaster`]. Call once, at the root component.
pub fn use_toaster() -> Toaster {
    let toasts = use_signal(Vec::new);
    let next_id = use_signal(|| 0u64);
    Toaster { toasts, next_id }
}
