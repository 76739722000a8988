//! Authentication against the hosted identity provider.

use std::future::Future;

mod error;
mod fragment;
mod session;
mod supabase;

pub use error::AuthError;
pub use fragment::{RedirectFragment, RECOVERY_MARKER};
pub use session::{Session, SESSION_STORAGE_KEY};
pub use supabase::SupabaseAuth;

use crate::models::UserInfo;

/// The operations the site's flows need from the identity provider.
///
/// Flows take an implementation as a constructor argument, so tests can substitute
/// an in-memory fake for [`SupabaseAuth`].
pub trait AuthClient {
    /// Adopt whatever session tokens a provider redirect carried.
    fn receive_redirect(&self, fragment: &RedirectFragment);

    fn get_current_user(&self) -> impl Future<Output = Result<UserInfo, AuthError>>;

    /// The current session. Expired sessions are discarded and reported as `None`.
    fn get_session(&self) -> Option<Session>;

    /// Ask the provider to email a recovery link that returns to `redirect_to`.
    fn request_password_reset(
        &self,
        email: &str,
        redirect_to: &str,
    ) -> impl Future<Output = Result<(), AuthError>>;

    /// Set a new password for the signed-in user.
    fn update_credentials(&self, password: &str) -> impl Future<Output = Result<(), AuthError>>;
}
