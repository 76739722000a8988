//! Forgot-password and reset-password flows.
//!
//! Both flows are linear: a form, then a confirmation. They hold no view state of
//! their own; each operation returns the next view and the component stores it.

use std::time::Duration;

use api::{AuthClient, RedirectFragment};
use thiserror::Error;

use crate::callback::DelayedRedirect;
use crate::navigation::Destination;
use crate::notify::{Notification, NotificationSink};

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Password must be at least {min} characters")]
    TooShort { min: usize },
    #[error("Passwords do not match")]
    Mismatch,
    #[error("Please enter a valid email")]
    InvalidEmail,
}

/// Check a new password and its confirmation. The first failing rule wins.
pub fn validate_new_password(
    password: &str,
    confirm_password: &str,
) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    if password != confirm_password {
        return Err(ValidationError::Mismatch);
    }
    Ok(())
}

/// Trim and sanity-check an email address.
pub fn validate_email(email: &str) -> Result<String, ValidationError> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email.to_string()),
        _ => Err(ValidationError::InvalidEmail),
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ForgotView {
    #[default]
    Form,
    Confirmation { email: String },
}

/// Sends password-recovery emails.
pub struct ForgotPasswordFlow<A, N> {
    auth: A,
    notifier: N,
    redirect_to: String,
}

impl<A: AuthClient, N: NotificationSink> ForgotPasswordFlow<A, N> {
    /// `redirect_to` is the absolute URL of the reset-password page.
    pub fn new(auth: A, notifier: N, redirect_to: impl Into<String>) -> Self {
        Self {
            auth,
            notifier,
            redirect_to: redirect_to.into(),
        }
    }

    /// Email a recovery link. Stays on the form if anything fails.
    pub async fn request_reset(&self, email: &str) -> ForgotView {
        let email = match validate_email(email) {
            Ok(email) => email,
            Err(e) => {
                self.notifier
                    .notify(Notification::destructive("Check your email", e.to_string()));
                return ForgotView::Form;
            }
        };

        match self.auth.request_password_reset(&email, &self.redirect_to).await {
            Ok(()) => {
                self.notifier.notify(Notification::info(
                    "Check your inbox",
                    format!("We sent a password reset link to {email}."),
                ));
                ForgotView::Confirmation { email }
            }
            Err(e) => {
                tracing::error!("Password reset request failed: {}", e);
                let message = e.provider_message().unwrap_or_else(|| {
                    "Could not send the reset email. Please try again.".to_string()
                });
                self.notifier
                    .notify(Notification::destructive("Reset failed", message));
                ForgotView::Form
            }
        }
    }

    /// Send the link again to the address on the confirmation screen.
    pub async fn resend_reset(&self, current: &ForgotView) -> ForgotView {
        match current {
            ForgotView::Confirmation { email } => {
                match self.request_reset(email).await {
                    // A failed resend keeps the confirmation on screen.
                    ForgotView::Form => current.clone(),
                    next => next,
                }
            }
            ForgotView::Form => ForgotView::Form,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResetView {
    #[default]
    Form,
    Complete,
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("{0}")]
    Rejected(String),
}

/// Sets a new password for a visitor who arrived through a recovery link.
pub struct ResetPasswordFlow<A, N> {
    auth: A,
    notifier: N,
    redirect_delay: Duration,
}

impl<A: AuthClient, N: NotificationSink> ResetPasswordFlow<A, N> {
    pub fn new(auth: A, notifier: N) -> Self {
        Self {
            auth,
            notifier,
            redirect_delay: Duration::from_secs(3),
        }
    }

    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    /// Decide whether the page may be shown. Returns where to send the visitor if not.
    ///
    /// The page is reachable with a recovery link (fragment marker) or an existing
    /// session. Tokens in the fragment are handed to the client first.
    pub fn guard(&self, fragment: &RedirectFragment) -> Option<Destination> {
        if let Some(message) = fragment.error() {
            tracing::warn!("Recovery link rejected by provider: {}", message);
            self.notifier
                .notify(Notification::destructive("Reset link invalid", message));
            return Some(Destination::ForgotPassword);
        }

        self.auth.receive_redirect(fragment);
        if fragment.is_recovery() || self.auth.get_session().is_some() {
            None
        } else {
            Some(Destination::ForgotPassword)
        }
    }

    /// Validate and apply a new password. On success the view becomes
    /// [`ResetView::Complete`] and the returned redirect leads to login.
    pub async fn submit(
        &self,
        password: &str,
        confirm_password: &str,
    ) -> Result<DelayedRedirect, SubmitError> {
        if let Err(e) = validate_new_password(password, confirm_password) {
            self.notifier
                .notify(Notification::destructive("Invalid password", e.to_string()));
            return Err(e.into());
        }

        match self.auth.update_credentials(password).await {
            Ok(()) => {
                self.notifier.notify(Notification::info(
                    "Password updated",
                    "Your password has been reset. You can now sign in.",
                ));
                Ok(DelayedRedirect {
                    to: Destination::Login,
                    after: self.redirect_delay,
                })
            }
            Err(e) => {
                tracing::error!("Password update failed: {}", e);
                let message = e.provider_message().unwrap_or_else(|| {
                    "Could not update your password. Please try again.".to_string()
                });
                self.notifier
                    .notify(Notification::destructive("Update failed", message.clone()));
                Err(SubmitError::Rejected(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NotificationVariant;
    use crate::testing::{FakeAuth, RecordingSink, UserLookup};

    const RESET_URL: &str = "https://miamour.example/reset-password";

    #[test]
    fn test_password_rules() {
        assert_eq!(
            validate_new_password("short1", "short1"),
            Err(ValidationError::TooShort { min: 8 })
        );
        assert_eq!(
            validate_new_password("longenough1", "different"),
            Err(ValidationError::Mismatch)
        );
        assert_eq!(validate_new_password("longenough1", "longenough1"), Ok(()));
    }

    #[test]
    fn test_too_short_wins_over_mismatch() {
        assert_eq!(
            validate_new_password("abc", "xyz"),
            Err(ValidationError::TooShort { min: 8 })
        );
    }

    #[test]
    fn test_length_counts_characters() {
        assert!(validate_new_password("señorita", "señorita").is_ok());
        assert!(validate_new_password("ñññññññ", "ñññññññ").is_err());
    }

    #[test]
    fn test_email_check() {
        assert_eq!(validate_email("  ana@example.com "), Ok("ana@example.com".to_string()));
        assert_eq!(validate_email("ana"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("@example.com"), Err(ValidationError::InvalidEmail));
    }

    #[tokio::test]
    async fn test_request_reset_moves_to_confirmation() {
        let auth = FakeAuth::new(UserLookup::Found);
        let sink = RecordingSink::default();
        let flow = ForgotPasswordFlow::new(auth.clone(), sink.clone(), RESET_URL);

        let view = flow.request_reset(" ana@example.com").await;

        assert_eq!(
            view,
            ForgotView::Confirmation {
                email: "ana@example.com".to_string()
            }
        );
        assert_eq!(
            auth.reset_requests.borrow().as_slice(),
            &[("ana@example.com".to_string(), RESET_URL.to_string())]
        );
        assert_eq!(sink.count(NotificationVariant::Destructive), 0);
    }

    #[tokio::test]
    async fn test_request_reset_failure_stays_on_form() {
        let auth = FakeAuth::new(UserLookup::Found).failing_reset(
            "For security purposes, you can only request this once every 60 seconds",
        );
        let sink = RecordingSink::default();
        let flow = ForgotPasswordFlow::new(auth, sink.clone(), RESET_URL);

        let view = flow.request_reset("ana@example.com").await;

        assert_eq!(view, ForgotView::Form);
        let seen = sink.all();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].variant, NotificationVariant::Destructive);
        assert!(seen[0].description.contains("60 seconds"));
    }

    #[tokio::test]
    async fn test_invalid_email_never_reaches_provider() {
        let auth = FakeAuth::new(UserLookup::Found);
        let sink = RecordingSink::default();
        let flow = ForgotPasswordFlow::new(auth.clone(), sink.clone(), RESET_URL);

        assert_eq!(flow.request_reset("not-an-email").await, ForgotView::Form);
        assert!(auth.reset_requests.borrow().is_empty());
        assert_eq!(sink.count(NotificationVariant::Destructive), 1);
    }

    #[tokio::test]
    async fn test_resend_repeats_the_request() {
        let auth = FakeAuth::new(UserLookup::Found);
        let flow = ForgotPasswordFlow::new(auth.clone(), RecordingSink::default(), RESET_URL);

        let view = flow.request_reset("ana@example.com").await;
        let view = flow.resend_reset(&view).await;

        assert!(matches!(view, ForgotView::Confirmation { .. }));
        assert_eq!(auth.reset_requests.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_resend_keeps_confirmation() {
        let auth = FakeAuth::new(UserLookup::Found).failing_reset("Email rate limit exceeded");
        let sink = RecordingSink::default();
        let flow = ForgotPasswordFlow::new(auth, sink.clone(), RESET_URL);
        let current = ForgotView::Confirmation {
            email: "ana@example.com".to_string(),
        };

        assert_eq!(flow.resend_reset(&current).await, current);
        assert_eq!(sink.count(NotificationVariant::Destructive), 1);
    }

    #[test]
    fn test_guard_requires_marker_or_session() {
        let sink = RecordingSink::default();

        let anonymous = ResetPasswordFlow::new(FakeAuth::new(UserLookup::Found), sink.clone());
        assert_eq!(
            anonymous.guard(&RedirectFragment::default()),
            Some(Destination::ForgotPassword)
        );
        assert_eq!(anonymous.guard(&RedirectFragment::parse("#type=recovery")), None);

        let signed_in = ResetPasswordFlow::new(FakeAuth::signed_in(), sink.clone());
        assert_eq!(signed_in.guard(&RedirectFragment::default()), None);
        assert!(sink.all().is_empty());
    }

    #[test]
    fn test_guard_adopts_recovery_tokens() {
        let auth = FakeAuth::new(UserLookup::Found);
        let flow = ResetPasswordFlow::new(auth.clone(), RecordingSink::default());

        assert_eq!(
            flow.guard(&RedirectFragment::parse("#access_token=rec&type=recovery")),
            None
        );
        assert_eq!(auth.get_session().unwrap().access_token, "rec");
    }

    #[test]
    fn test_guard_ignores_expired_session() {
        let auth = FakeAuth::new(UserLookup::Found);
        auth.receive_redirect(&RedirectFragment::parse(
            "#access_token=old&expires_in=3600&expires_at=1&type=signup",
        ));
        let flow = ResetPasswordFlow::new(auth.clone(), RecordingSink::default());

        assert_eq!(
            flow.guard(&RedirectFragment::default()),
            Some(Destination::ForgotPassword)
        );
        assert!(auth.get_session().is_none());
    }

    #[test]
    fn test_guard_rejects_expired_link() {
        let sink = RecordingSink::default();
        let flow = ResetPasswordFlow::new(FakeAuth::signed_in(), sink.clone());

        let fragment =
            RedirectFragment::parse("#error=access_denied&error_description=Link+expired");
        assert_eq!(flow.guard(&fragment), Some(Destination::ForgotPassword));
        assert_eq!(sink.all()[0].description, "Link expired");
    }

    #[tokio::test]
    async fn test_submit_validation_blocks_remote_call() {
        let auth = FakeAuth::signed_in();
        let sink = RecordingSink::default();
        let flow = ResetPasswordFlow::new(auth.clone(), sink.clone());

        assert_eq!(
            flow.submit("short1", "short1").await,
            Err(SubmitError::Invalid(ValidationError::TooShort { min: 8 }))
        );
        assert_eq!(
            flow.submit("longenough1", "different").await,
            Err(SubmitError::Invalid(ValidationError::Mismatch))
        );
        assert!(auth.updated_passwords.borrow().is_empty());
        assert_eq!(sink.count(NotificationVariant::Destructive), 2);
    }

    #[tokio::test]
    async fn test_submit_success_redirects_to_login() {
        let auth = FakeAuth::signed_in();
        let sink = RecordingSink::default();
        let flow = ResetPasswordFlow::new(auth.clone(), sink.clone());

        let redirect = flow.submit("longenough1", "longenough1").await.unwrap();

        assert_eq!(
            redirect,
            DelayedRedirect {
                to: Destination::Login,
                after: Duration::from_secs(3),
            }
        );
        assert_eq!(auth.updated_passwords.borrow().as_slice(), &["longenough1".to_string()]);
        assert_eq!(sink.count(NotificationVariant::Informational), 1);
    }

    #[tokio::test]
    async fn test_submit_rejection_stays_on_form() {
        let auth = FakeAuth::signed_in()
            .failing_update("New password should be different from the old password.");
        let sink = RecordingSink::default();
        let flow = ResetPasswordFlow::new(auth, sink.clone());

        let err = flow.submit("longenough1", "longenough1").await.unwrap_err();

        assert_eq!(
            err,
            SubmitError::Rejected(
                "New password should be different from the old password.".to_string()
            )
        );
        assert_eq!(sink.count(NotificationVariant::Destructive), 1);
    }
}
