//! # Auth callback reconciliation
//!
//! After an OAuth handshake or a password-recovery link, the identity provider sends
//! the browser back to [`AUTH_CALLBACK_PATH`](crate::AUTH_CALLBACK_PATH) with the
//! result in the URL fragment. [`CallbackReconciler::reconcile`] turns that into
//! exactly one terminal [`CallbackOutcome`]:
//!
//! | Situation | Outcome | Notification | Follow-up |
//! |-----------|---------|--------------|-----------|
//! | fragment carries a provider error, or the user lookup is refused | `Error(provider message)` | destructive | "Try Again" → login |
//! | lookup succeeds, fragment has `type=recovery` | `Success(PasswordRecovery)` | none | reset-password after a delay |
//! | lookup succeeds otherwise | `Success(Login)` | informational | dashboard after a delay |
//! | anything else goes wrong (transport, decoding, a panic in the client) | `Error(generic)` | destructive | "Try Again" → login |

use std::panic::AssertUnwindSafe;
use std::time::Duration;

use api::{AuthClient, RedirectFragment};
use futures::FutureExt;

use crate::navigation::Destination;
use crate::notify::{Notification, NotificationSink};

/// Message shown when the failure did not come from the provider.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuccessKind {
    Login,
    PasswordRecovery,
}

/// State of the callback screen. `Success` and `Error` are terminal.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CallbackOutcome {
    #[default]
    Processing,
    Success(SuccessKind),
    Error(String),
}

impl CallbackOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, CallbackOutcome::Processing)
    }

    /// Move to `next` if still processing. Returns whether the state changed.
    pub fn settle(&mut self, next: CallbackOutcome) -> bool {
        if self.is_terminal() || !next.is_terminal() {
            return false;
        }
        *self = next;
        true
    }

    /// Where the manual "Try Again" action leads. Only offered on error.
    pub fn retry_destination(&self) -> Option<Destination> {
        match self {
            CallbackOutcome::Error(_) => Some(Destination::Login),
            CallbackOutcome::Processing | CallbackOutcome::Success(_) => None,
        }
    }
}

/// Navigation to perform once a delay has passed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DelayedRedirect {
    pub to: Destination,
    pub after: Duration,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Reconciliation {
    pub outcome: CallbackOutcome,
    pub redirect: Option<DelayedRedirect>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallbackTiming {
    /// How long the success message stays up before navigating on.
    pub redirect_delay: Duration,
}

impl Default for CallbackTiming {
    fn default() -> Self {
        Self {
            redirect_delay: Duration::from_secs(2),
        }
    }
}

pub struct CallbackReconciler<A, N> {
    auth: A,
    notifier: N,
    timing: CallbackTiming,
}

impl<A: AuthClient, N: NotificationSink> CallbackReconciler<A, N> {
    pub fn new(auth: A, notifier: N) -> Self {
        Self {
            auth,
            notifier,
            timing: CallbackTiming::default(),
        }
    }

    pub fn with_timing(mut self, timing: CallbackTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Classify a provider redirect and report the result.
    pub async fn reconcile(&self, fragment: &RedirectFragment) -> Reconciliation {
        let classified = AssertUnwindSafe(self.classify(fragment))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| {
                tracing::error!("Auth callback handler panicked");
                Err(UNEXPECTED_ERROR_MESSAGE.to_string())
            });

        match classified {
            Ok(kind) => {
                let to = match kind {
                    SuccessKind::PasswordRecovery => Destination::ResetPassword,
                    SuccessKind::Login => {
                        self.notifier.notify(Notification::info(
                            "Welcome back!",
                            "You have been signed in successfully.",
                        ));
                        Destination::Dashboard
                    }
                };
                Reconciliation {
                    outcome: CallbackOutcome::Success(kind),
                    redirect: Some(DelayedRedirect {
                        to,
                        after: self.timing.redirect_delay,
                    }),
                }
            }
            Err(message) => {
                self.notifier
                    .notify(Notification::destructive("Authentication failed", message.clone()));
                Reconciliation {
                    outcome: CallbackOutcome::Error(message),
                    redirect: None,
                }
            }
        }
    }

    async fn classify(&self, fragment: &RedirectFragment) -> Result<SuccessKind, String> {
        if let Some(message) = fragment.error() {
            tracing::warn!("Provider reported an error in the redirect: {}", message);
            return Err(message);
        }

        self.auth.receive_redirect(fragment);

        match self.auth.get_current_user().await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "Auth callback resolved a session");
                if fragment.is_recovery() {
                    Ok(SuccessKind::PasswordRecovery)
                } else {
                    Ok(SuccessKind::Login)
                }
            }
            Err(e) => {
                tracing::error!("Error during auth callback: {}", e);
                Err(e
                    .provider_message()
                    .unwrap_or_else(|| UNEXPECTED_ERROR_MESSAGE.to_string()))
            }
        }
    }
}
