use thiserror::Error;

/// Failure talking to the hosted auth service.
///
/// `Provider` and `SessionMissing` are answers from the service itself and carry a
/// message fit for the user. `Http` and `Decode` mean the exchange broke down and
/// should be reported generically.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{message}")]
    Provider { status: u16, message: String },
    #[error("Auth session missing")]
    SessionMissing,
    #[error("auth request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected auth response: {0}")]
    Decode(String),
}

impl AuthError {
    /// The message to show the user, if this error came from the provider.
    pub fn provider_message(&self) -> Option<String> {
        match self {
            AuthError::Provider { message, .. } => Some(message.clone()),
            AuthError::SessionMissing => Some(self.to_string()),
            AuthError::Http(_) | AuthError::Decode(_) => None,
        }
    }
}
