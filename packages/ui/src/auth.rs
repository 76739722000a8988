//! Session-aware components and hooks.

use api::{AuthClient, SupabaseAuth, UserInfo};
use dioxus::prelude::*;

use crate::navigation::redirect_browser;
use crate::notify::{Notification, NotificationSink, Toaster};

/// Authentication state of the current visitor.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<UserInfo>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

impl AuthState {
    /// Settled state for a known user, or for nobody.
    pub fn settled(user: Option<UserInfo>) -> Self {
        Self {
            user,
            loading: false,
        }
    }

    /// Whether a settled lookup no longer matches the stored session, as after a
    /// sign in or sign out that happened since it ran.
    pub fn is_stale(&self, has_session: bool) -> bool {
        !self.loading && self.user.is_some() != has_session
    }
}

/// Look up the user behind the stored session and publish the result to `state`.
///
/// A failed lookup simply means nobody is signed in.
pub async fn load_current_user(auth: &SupabaseAuth, mut state: Signal<AuthState>) {
    let user = if auth.get_session().is_some() {
        match auth.get_current_user().await {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("Stored session is no longer valid: {}", e);
                None
            }
        }
    } else {
        None
    };
    state.set(AuthState::settled(user));
}

/// Look up the signed-in user once on mount.
///
/// Returns `loading: true` until the lookup finishes. Call this once near the root
/// and share the signal; [`use_fresh_user`] re-checks it where a page depends on it.
pub fn use_current_user(auth: SupabaseAuth) -> Signal<AuthState> {
    let state = use_signal(AuthState::default);

    let _ = use_resource(move || {
        let auth = auth.clone();
        async move { load_current_user(&auth, state).await }
    });

    state
}

/// Reload a shared [`AuthState`] on mount if the session changed since it was loaded.
pub fn use_fresh_user(auth: SupabaseAuth, state: Signal<AuthState>) {
    use_hook(move || {
        if state.peek().is_stale(auth.get_session().is_some()) {
            let mut state = state;
            state.set(AuthState::default());
            spawn(async move { load_current_user(&auth, state).await });
        }
    });
}

/// Button to initiate login with a specific OAuth provider.
#[component]
pub fn LoginButton(
    auth: SupabaseAuth,
    toaster: Toaster,
    provider: String,
    /// Absolute URL of the auth callback page.
    redirect_to: String,
    #[props(default = "Login".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut loading = use_signal(|| false);

    let onclick = move |_| {
        loading.set(true);
        match auth.authorize_url(&provider, &redirect_to) {
            Ok(url) => redirect_browser(&url),
            Err(e) => {
                tracing::error!("Failed to build login URL: {}", e);
                toaster.notify(Notification::destructive(
                    "Sign in unavailable",
                    "Could not start sign in. Please try again.",
                ));
                loading.set(false);
            }
        }
    };

    rsx! {
        button {
            class: "{class}",
            r#type: "button",
            disabled: loading(),
            onclick: onclick,
            if loading() {
                "Redirecting..."
            } else {
                "{label}"
            }
        }
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    auth: SupabaseAuth,
    toaster: Toaster,
    on_signed_out: EventHandler<()>,
    #[props(default = "Sign out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let onclick = move |_| {
        let auth = auth.clone();
        async move {
            if let Err(e) = auth.sign_out().await {
                tracing::warn!("Sign out was not confirmed by the server: {}", e);
            }
            toaster.notify(Notification::info("Signed out", "See you soon."));
            on_signed_out.call(());
        }
    };

    rsx! {
        button {
            class: "{class}",
            r#type: "button",
            onclick: onclick,
            "{label}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn someone() -> UserInfo {
        UserInfo {
            id: "u1".to_string(),
            email: "ada@example.com".to_string(),
            name: None,
            avatar_url: None,
            provider: "email".to_string(),
        }
    }

    #[test]
    fn test_pending_lookup_is_never_stale() {
        assert!(!AuthState::default().is_stale(true));
        assert!(!AuthState::default().is_stale(false));
    }

    #[test]
    fn test_sign_in_after_lookup_is_stale() {
        let nobody = AuthState::settled(None);
        assert!(nobody.is_stale(true));
        assert!(!nobody.is_stale(false));
    }

    #[test]
    fn test_sign_out_after_lookup_is_stale() {
        let signed_in = AuthState::settled(Some(someone()));
        assert!(signed_in.is_stale(false));
        assert!(!signed_in.is_stale(true));
    }
}
