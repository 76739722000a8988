//! Session data types and browser persistence.

use serde::{Deserialize, Serialize};

use crate::models::UserInfo;

/// Key for storing the session in `localStorage`.
pub const SESSION_STORAGE_KEY: &str = "miamour.auth.session";

/// Tokens issued by the auth service for the signed-in visitor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub token_type: String,
    /// Lifetime of the access token in seconds, as reported at issue time.
    pub expires_in: Option<u64>,
    /// Unix time in seconds at which the access token stops being accepted.
    #[serde(default)]
    pub expires_at: Option<u64>,
    #[serde(default)]
    pub user: Option<UserInfo>,
}

impl Session {
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            token_type: "bearer".to_string(),
            expires_in: None,
            expires_at: None,
            user: None,
        }
    }

    /// A session without a known expiry never expires locally.
    pub fn is_expired_at(&self, now: u64) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(unix_now())
    }
}

/// Absolute expiry for a token, preferring the issuer's `expires_at`.
pub(crate) fn expiry(expires_at: Option<u64>, expires_in: Option<u64>, now: u64) -> Option<u64> {
    expires_at.or_else(|| expires_in.map(|secs| now.saturating_add(secs)))
}

/// Current Unix time in seconds.
#[cfg(target_arch = "wasm32")]
pub(crate) fn unix_now() -> u64 {
    (js_sys::Date::now() / 1000.0) as u64
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Read the session saved by a previous page load.
#[cfg(target_arch = "wasm32")]
pub(crate) fn load_persisted() -> Option<Session> {
    let storage = web_sys::window()?.local_storage().ok()??;
    let raw = storage.get_item(SESSION_STORAGE_KEY).ok()??;
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::warn!("Discarding unreadable stored session: {}", e);
            let _ = storage.remove_item(SESSION_STORAGE_KEY);
            None
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn load_persisted() -> Option<Session> {
    None
}

/// Save or clear the session so it survives full-page redirects.
#[cfg(target_arch = "wasm32")]
pub(crate) fn persist(session: Option<&Session>) {
    let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
        return;
    };
    let result = match session {
        Some(session) => match serde_json::to_string(session) {
            Ok(raw) => storage.set_item(SESSION_STORAGE_KEY, &raw),
            Err(e) => {
                tracing::error!("Failed to serialize session: {}", e);
                return;
            }
        },
        None => storage.remove_item(SESSION_STORAGE_KEY),
    };
    if result.is_err() {
        tracing::warn!("Browser storage rejected session update");
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn persist(_session: Option<&Session>) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_prefers_absolute_time() {
        assert_eq!(expiry(Some(50), Some(3600), 1000), Some(50));
        assert_eq!(expiry(None, Some(3600), 1000), Some(4600));
        assert_eq!(expiry(None, None, 1000), None);
    }

    #[test]
    fn test_expired_sessions() {
        let mut session = Session::bearer("tok");
        assert!(!session.is_expired());

        session.expires_at = Some(1);
        assert!(session.is_expired());
        assert!(session.is_expired_at(1));
        assert!(!session.is_expired_at(0));
    }

    #[test]
    fn test_stored_session_without_expiry_still_loads() {
        let stored = serde_json::json!({
            "access_token": "tok",
            "refresh_token": null,
            "token_type": "bearer",
            "expires_in": 3600
        });
        let session: Session = serde_json::from_value(stored).unwrap();
        assert_eq!(session.expires_at, None);
    }
}
