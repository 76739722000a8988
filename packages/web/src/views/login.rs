use dioxus::prelude::*;

use ui::views::LoginView;
use ui::{Toaster, AUTH_CALLBACK_PATH};

use crate::{use_destination_handler, Services};

#[component]
pub fn Login() -> Element {
    let services = use_context::<Services>();
    let toaster = use_context::<Toaster>();
    let on_navigate = use_destination_handler();

    rsx! {
        LoginView {
            auth: services.auth.clone(),
            toaster,
            callback_url: services.link(AUTH_CALLBACK_PATH),
            on_navigate,
        }
    }
}
