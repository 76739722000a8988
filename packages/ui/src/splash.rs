use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use futures::channel::oneshot;
use futures::FutureExt;

use crate::loader::{drive_loader, LoaderState, LoaderTimeline};
use crate::timer::use_scheduler;

/// Spinner shown while `pending`, with the timing rules of [`LoaderTimeline`].
///
/// Timing props are read once, at mount. Flip `pending` to `false` when the owning
/// operation finishes.
#[component]
pub fn Loader(
    #[props(default = 0)] initial_delay_ms: u64,
    #[props(default = 1000)] min_display_ms: u64,
    #[props(default = true)] pending: bool,
    label: Option<String>,
    #[props(default = false)] fullscreen: bool,
) -> Element {
    let timeline = LoaderTimeline::from_millis(initial_delay_ms, min_display_ms);
    let mut state = use_signal(|| LoaderState::new(&timeline));
    let scheduler = use_scheduler();
    let finish = use_hook(|| Rc::new(RefCell::new(None::<oneshot::Sender<()>>)));

    let sender = finish.clone();
    use_hook(move || {
        let (done, finished) = oneshot::channel();
        *sender.borrow_mut() = Some(done);
        scheduler.run(drive_loader(timeline, finished.map(|_| ()), move |next| {
            state.set(next)
        }));
    });

    use_effect(use_reactive((&pending,), move |(pending,)| {
        if !pending {
            if let Some(done) = finish.borrow_mut().take() {
                let _ = done.send(());
            }
        }
    }));

    if !state.read().is_visible() {
        return rsx! {};
    }

    rsx! {
        div {
            class: if fullscreen { "loader fullscreen" } else { "loader" },
            role: "progressbar",
            "aria-busy": "true",
            div { class: "spinner" }
            if let Some(label) = label {
                p { class: "loader-label", "{label}" }
            }
        }
    }
}

/// Full-screen brand splash shown while the app checks for an existing session.
#[component]
pub fn SplashScreen(pending: bool) -> Element {
    rsx! {
        Loader {
            pending,
            min_display_ms: 800,
            fullscreen: true,
            label: "miamour".to_string(),
        }
    }
}
