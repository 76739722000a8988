//! # User model for authenticated visitors
//!
//! The hosted auth service returns a large user object (`/auth/v1/user`). Only a few
//! fields matter to this site, so the wire shape ([`GoTrueUser`]) is decoded and then
//! projected into [`UserInfo`], the type the rest of the workspace passes around.
//!
//! Profile fields live in `user_metadata` and differ by provider: Google sets
//! `full_name` and `avatar_url`, email sign-ups only have whatever the sign-up form
//! stored (`name`). The sign-in provider comes from `app_metadata.provider`.

use serde::{Deserialize, Serialize};

/// User record as returned by the auth service.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GoTrueUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
    #[serde(default)]
    pub app_metadata: AppMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct UserMetadata {
    pub full_name: Option<String>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub picture: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct AppMetadata {
    pub provider: Option<String>,
}

impl GoTrueUser {
    /// Convert to UserInfo for the UI.
    pub fn to_info(&self) -> UserInfo {
        let meta = &self.user_metadata;
        UserInfo {
            id: self.id.clone(),
            email: self.email.clone().unwrap_or_default(),
            name: meta.full_name.clone().or_else(|| meta.name.clone()),
            avatar_url: meta.avatar_url.clone().or_else(|| meta.picture.clone()),
            provider: self
                .app_metadata
                .provider
                .clone()
                .unwrap_or_else(|| "email".to_string()),
        }
    }
}

/// User information the UI works with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub provider: String,
}

impl UserInfo {
    /// Get display name, falling back to email if name is not set.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_profile_projection() {
        let raw = r#"{
            "id": "4f1c",
            "email": "ana@example.com",
            "user_metadata": { "full_name": "Ana Lima", "avatar_url": "https://img/a.png" },
            "app_metadata": { "provider": "google" },
            "aud": "authenticated"
        }"#;
        let user: GoTrueUser = serde_json::from_str(raw).unwrap();
        let info = user.to_info();

        assert_eq!(info.display_name(), "Ana Lima");
        assert_eq!(info.avatar_url.as_deref(), Some("https://img/a.png"));
        assert_eq!(info.provider, "google");
    }

    #[test]
    fn test_email_user_falls_back_to_email() {
        let user: GoTrueUser =
            serde_json::from_str(r#"{ "id": "1", "email": "bo@example.com" }"#).unwrap();
        let info = user.to_info();

        assert_eq!(info.display_name(), "bo@example.com");
        assert_eq!(info.provider, "email");
    }
}
