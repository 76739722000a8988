use dioxus::prelude::*;

use ui::views::AuthCallbackView;
use ui::Toaster;

use crate::{use_destination_handler, Services};

/// Target of every identity-provider redirect.
#[component]
pub fn AuthCallback() -> Element {
    let services = use_context::<Services>();
    let toaster = use_context::<Toaster>();
    let on_navigate = use_destination_handler();

    rsx! {
        AuthCallbackView {
            auth: services.auth.clone(),
            toaster,
            on_navigate,
        }
    }
}
