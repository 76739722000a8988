use dioxus::prelude::*;

use crate::views::SiteNav;
use crate::Route;

/// Service description page.
#[component]
pub fn CeremonyPlanning() -> Element {
    let steps = [
        ("Discovery call", "We learn about you, your traditions and the day you imagine."),
        ("Ceremony design", "Readings, music and vows arranged into an order of service."),
        (
            "Officiant and rehearsal",
            "We coordinate the officiant and run the rehearsal with your party.",
        ),
        ("On the day", "A coordinator keeps the ceremony on time so you can be present."),
    ];

    rsx! {
        SiteNav {}
        main {
            class: "page",
            section {
                class: "hero",
                h1 { "Ceremony planning" }
                p { "Everything between the aisle and the first kiss, handled with care." }
            }
            ol {
                class: "steps",
                for (title, body) in steps {
                    li {
                        h2 { "{title}" }
                        p { "{body}" }
                    }
                }
            }
            Link { class: "button primary", to: Route::Login {}, "Start planning" }
        }
    }
}
