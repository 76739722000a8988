//! This crate contains the flows and shared UI for the workspace.
//!
//! Flow types ([`CallbackReconciler`], [`ForgotPasswordFlow`], [`ResetPasswordFlow`],
//! [`ImageUpload`]) take their collaborators as constructor arguments and know
//! nothing about rendering. The components in [`views`] wrap them for Dioxus and
//! report navigation through an `on_navigate` handler; the app decides which route
//! each [`Destination`] maps to.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const MIAMOUR_CSS: Asset = asset!("/assets/miamour.css");

pub mod notify;
pub use notify::{use_toaster, Notification, NotificationSink, NotificationVariant, Toast, Toaster};

pub mod timer;
pub use timer::{cancellable, schedule, sleep, use_scheduler, ScheduledTask, Scheduler};

mod navigation;
pub use navigation::{current_fragment, redirect_browser, Destination, AUTH_CALLBACK_PATH};

pub mod callback;
pub use callback::{
    CallbackOutcome, CallbackReconciler, CallbackTiming, DelayedRedirect, Reconciliation,
    SuccessKind, UNEXPECTED_ERROR_MESSAGE,
};

pub mod password;
pub use password::{
    validate_email, validate_new_password, ForgotPasswordFlow, ForgotView, ResetPasswordFlow,
    ResetView, SubmitError, ValidationError, MIN_PASSWORD_LEN,
};

pub mod loader;
pub use loader::{drive_loader, LoaderEvent, LoaderState, LoaderTimeline};

mod upload;
pub use upload::ImageUpload;

mod auth;
pub use auth::{
    load_current_user, use_current_user, use_fresh_user, AuthState, LoginButton, LogoutButton,
};

mod splash;
pub use splash::{Loader, SplashScreen};

mod toast_stack;
pub use toast_stack::{ToastStack, TOAST_LIFETIME};

pub mod views;
pub use views::ImageUploadField;

#[cfg(test)]
mod testing;
