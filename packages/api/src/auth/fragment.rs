//! Parsing of the URL fragment the auth service redirects back with.
//!
//! After an OAuth handshake or a password-recovery link the service sends the browser
//! to `/auth/callback#access_token=...&refresh_token=...&expires_in=3600&token_type=bearer`,
//! adding `type=recovery` when the visit came from a reset email. Failed handshakes
//! come back as `#error=access_denied&error_description=...` instead.

use super::session::{self, Session};

/// Key/value pair that marks a password-recovery redirect.
pub const RECOVERY_MARKER: (&str, &str) = ("type", "recovery");

/// Decoded key/value pairs of a redirect fragment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RedirectFragment {
    params: Vec<(String, String)>,
}

impl RedirectFragment {
    /// Parse a fragment with or without its leading `#`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('#').unwrap_or(raw);
        let params = url::form_urlencoded::parse(raw.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { params }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Whether this redirect came from a password-recovery link.
    pub fn is_recovery(&self) -> bool {
        let (key, value) = RECOVERY_MARKER;
        self.params.iter().any(|(k, v)| k == key && v == value)
    }

    /// Session tokens carried by the fragment, if any.
    pub fn session(&self) -> Option<Session> {
        self.session_at(session::unix_now())
    }

    /// Like [`session`](Self::session), with `now` used to stamp a relative expiry.
    pub fn session_at(&self, now: u64) -> Option<Session> {
        let access_token = self.get("access_token").filter(|t| !t.is_empty())?;
        let expires_in = self.get("expires_in").and_then(|s| s.parse().ok());
        let expires_at = self.get("expires_at").and_then(|s| s.parse().ok());
        Some(Session {
            access_token: access_token.to_string(),
            refresh_token: self.get("refresh_token").map(str::to_string),
            token_type: self.get("token_type").unwrap_or("bearer").to_string(),
            expires_in,
            expires_at: session::expiry(expires_at, expires_in, now),
            user: None,
        })
    }

    /// Error reported by the provider, preferring the human readable description.
    pub fn error(&self) -> Option<String> {
        self.get("error_description")
            .or_else(|| self.get("error"))
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovery_fragment() {
        let fragment = RedirectFragment::parse(
            "#access_token=tok&expires_in=3600&refresh_token=ref&token_type=bearer&type=recovery",
        );

        assert!(fragment.is_recovery());
        let session = fragment.session().unwrap();
        assert_eq!(session.access_token, "tok");
        assert_eq!(session.refresh_token.as_deref(), Some("ref"));
        assert_eq!(session.expires_in, Some(3600));
        assert!(fragment.error().is_none());
    }

    #[test]
    fn test_fragment_expiry() {
        let relative = RedirectFragment::parse("#access_token=tok&expires_in=3600");
        assert_eq!(relative.session_at(1_000).unwrap().expires_at, Some(4_600));

        let absolute = RedirectFragment::parse("#access_token=tok&expires_in=3600&expires_at=1");
        let session = absolute.session_at(1_000).unwrap();
        assert_eq!(session.expires_at, Some(1));
        assert!(session.is_expired_at(1_000));
    }

    #[test]
    fn test_login_fragment_is_not_recovery() {
        let fragment = RedirectFragment::parse("access_token=tok&type=signup");
        assert!(!fragment.is_recovery());
        assert!(fragment.session().is_some());
    }

    #[test]
    fn test_marker_value_must_match_exactly() {
        assert!(!RedirectFragment::parse("#type=recovery_later").is_recovery());
        assert!(!RedirectFragment::parse("#kind=recovery").is_recovery());
    }

    #[test]
    fn test_error_fragment_is_decoded() {
        let fragment = RedirectFragment::parse(
            "#error=access_denied&error_code=403&error_description=Email+link+is+invalid+or+has+expired",
        );

        assert_eq!(
            fragment.error().as_deref(),
            Some("Email link is invalid or has expired")
        );
        assert!(fragment.session().is_none());
    }

    #[test]
    fn test_empty_fragment() {
        let fragment = RedirectFragment::parse("");
        assert!(fragment.is_empty());
        assert!(!fragment.is_recovery());
        assert!(fragment.session().is_none());
    }
}
