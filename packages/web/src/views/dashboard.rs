use dioxus::prelude::*;

use ui::views::DashboardView;
use ui::{AuthState, Toaster};

use crate::{use_destination_handler, Services};

#[component]
pub fn Dashboard() -> Element {
    let services = use_context::<Services>();
    let toaster = use_context::<Toaster>();
    let session = use_context::<Signal<AuthState>>();
    let on_navigate = use_destination_handler();

    rsx! {
        DashboardView {
            auth: services.auth.clone(),
            uploader: services.uploader.clone(),
            toaster,
            session,
            on_navigate,
        }
    }
}
