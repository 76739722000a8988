use dioxus::prelude::*;

use crate::Route;

/// Top navigation for the public pages.
#[component]
pub fn SiteNav() -> Element {
    rsx! {
        nav {
            class: "site-nav",
            Link { class: "brand", to: Route::Home {}, "miamour" }
            div {
                class: "site-nav-links",
                Link { to: Route::CeremonyPlanning {}, "Ceremony planning" }
                Link { class: "nav-cta", to: Route::Login {}, "Sign in" }
            }
        }
    }
}
