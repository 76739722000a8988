use dioxus::prelude::*;

use ui::views::{ForgotPasswordView, ResetPasswordView};
use ui::{Destination, Toaster};

use crate::{use_destination_handler, Services};

#[component]
pub fn ForgotPassword() -> Element {
    let services = use_context::<Services>();
    let toaster = use_context::<Toaster>();
    let on_navigate = use_destination_handler();

    rsx! {
        ForgotPasswordView {
            auth: services.auth.clone(),
            toaster,
            redirect_to: services.link(Destination::ResetPassword.path()),
            on_navigate,
        }
    }
}

#[component]
pub fn ResetPassword() -> Element {
    let services = use_context::<Services>();
    let toaster = use_context::<Toaster>();
    let on_navigate = use_destination_handler();

    rsx! {
        ResetPasswordView {
            auth: services.auth.clone(),
            toaster,
            on_navigate,
        }
    }
}
