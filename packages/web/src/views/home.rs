use dioxus::prelude::*;

use crate::views::SiteNav;
use crate::Route;

#[component]
pub fn Home() -> Element {
    rsx! {
        SiteNav {}
        main {
            class: "page",
            section {
                class: "hero",
                h1 { "Your wedding, thoughtfully planned" }
                p {
                    "miamour helps couples plan ceremonies that feel like them, "
                    "from the first venue visit to the last dance."
                }
                div {
                    class: "hero-actions",
                    Link {
                        class: "button primary",
                        to: Route::CeremonyPlanning {},
                        "Explore ceremony planning"
                    }
                    Link { class: "button secondary", to: Route::Login {}, "Sign in" }
                }
            }
            section {
                class: "features",
                div {
                    class: "feature",
                    h2 { "Venues" }
                    p { "Shortlists of venues that match your guest count, budget and season." }
                }
                div {
                    class: "feature",
                    h2 { "Vendors" }
                    p { "Photographers, florists and caterers we have worked with and trust." }
                }
                div {
                    class: "feature",
                    h2 { "Timeline" }
                    p { "A shared plan so everyone knows what happens, and when." }
                }
            }
        }
    }
}
