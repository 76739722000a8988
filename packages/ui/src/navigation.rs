//! Navigation targets the flows can ask for, plus browser location helpers.

use api::RedirectFragment;

/// Screens a flow may send the visitor to. The app maps each to a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Destination {
    Home,
    Login,
    Dashboard,
    ResetPassword,
    ForgotPassword,
}

impl Destination {
    pub fn path(&self) -> &'static str {
        match self {
            Destination::Home => "/",
            Destination::Login => "/login",
            Destination::Dashboard => "/dashboard",
            Destination::ResetPassword => "/reset-password",
            Destination::ForgotPassword => "/forgot-password",
        }
    }
}

/// Path the identity provider redirects back to after a handshake.
pub const AUTH_CALLBACK_PATH: &str = "/auth/callback";

/// The fragment of the current page URL.
#[cfg(target_arch = "wasm32")]
pub fn current_fragment() -> RedirectFragment {
    let hash = web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default();
    RedirectFragment::parse(&hash)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn current_fragment() -> RedirectFragment {
    RedirectFragment::default()
}

/// Full-page navigation to an external URL, e.g. an OAuth provider.
pub fn redirect_browser(url: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if window.location().set_href(url).is_err() {
                tracing::error!("Failed to redirect browser");
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::warn!("Browser redirect to {} is only available on the web", url);
    }
}
