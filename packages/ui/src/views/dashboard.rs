use dioxus::prelude::*;

use api::{CloudinaryUploader, SupabaseAuth};

use crate::auth::{use_fresh_user, AuthState};
use crate::navigation::Destination;
use crate::notify::Toaster;
use crate::{ImageUploadField, LogoutButton, SplashScreen};

use super::VIEWS_CSS;

/// Landing screen for signed-in visitors. Anonymous visitors are sent to login.
///
/// `session` is the app-wide state from [`use_current_user`](crate::use_current_user).
#[component]
pub fn DashboardView(
    auth: SupabaseAuth,
    uploader: CloudinaryUploader,
    toaster: Toaster,
    session: Signal<AuthState>,
    on_navigate: EventHandler<Destination>,
) -> Element {
    let mut state = session;
    use_fresh_user(auth.clone(), state);
    let mut photo_url = use_signal(|| Option::<String>::None);

    use_effect(move || {
        let state = state();
        if !state.loading && state.user.is_none() {
            on_navigate.call(Destination::Login);
        }
    });

    let current = state();
    let Some(user) = current.user else {
        return rsx! {
            SplashScreen { pending: current.loading }
        };
    };

    let avatar = photo_url().or(user.avatar_url.clone());

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "dashboard",
            header {
                class: "dashboard-header",
                h1 { "Hello, {user.display_name()}" }
                LogoutButton {
                    auth,
                    toaster,
                    class: "auth-btn secondary",
                    on_signed_out: move |_| {
                        state.set(AuthState::settled(None));
                        on_navigate.call(Destination::Home);
                    },
                }
            }
            section {
                class: "dashboard-card",
                h2 { "Your profile photo" }
                if let Some(src) = avatar {
                    img { class: "avatar", src: "{src}", alt: "Profile photo" }
                } else {
                    div { class: "avatar placeholder" }
                }
                ImageUploadField {
                    uploader,
                    toaster,
                    on_uploaded: move |url: String| photo_url.set(Some(url)),
                }
            }
        }
    }
}
