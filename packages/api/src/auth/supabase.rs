//! # Hosted auth client (GoTrue REST API)
//!
//! [`SupabaseAuth`] talks to the `/auth/v1` endpoints of a hosted Supabase project.
//! Every request carries the project's public anon key in the `apikey` header;
//! calls on behalf of the visitor add `Authorization: Bearer <access_token>` from
//! the current [`Session`].
//!
//! ## Endpoints
//!
//! | Method | Request | Used by |
//! |--------|---------|---------|
//! | [`get_current_user`](AuthClient::get_current_user) | `GET /user` | callback reconciliation, dashboard |
//! | [`request_password_reset`](AuthClient::request_password_reset) | `POST /recover?redirect_to=` | forgot-password form |
//! | [`update_credentials`](AuthClient::update_credentials) | `PUT /user` | reset-password form |
//! | [`sign_in_with_password`](SupabaseAuth::sign_in_with_password) | `POST /token?grant_type=password` | login form |
//! | [`sign_out`](SupabaseAuth::sign_out) | `POST /logout` | dashboard |
//! | [`authorize_url`](SupabaseAuth::authorize_url) | `GET /authorize?provider=` (browser redirect) | OAuth buttons |
//!
//! ## Session handling
//!
//! The session lives behind an `Arc<Mutex<_>>` shared by every clone of the client,
//! so the composition root can hand copies to each view. Sessions arrive either from
//! a password sign-in or from the redirect fragment ([`AuthClient::receive_redirect`]),
//! and are mirrored to `localStorage` on the web.

use std::sync::{Arc, Mutex, PoisonError};

use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;
use url::Url;

use super::error::AuthError;
use super::fragment::RedirectFragment;
use super::session::{self, Session};
use super::AuthClient;
use crate::config::{self, SiteConfig};
use crate::models::{GoTrueUser, UserInfo};

/// Token grant response from `/token`.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    token_type: Option<String>,
    expires_in: Option<u64>,
    expires_at: Option<u64>,
    user: Option<GoTrueUser>,
}

/// Error body shapes the service uses, depending on the endpoint.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.msg
            .or(self.message)
            .or(self.error_description)
            .or(self.error)
    }
}

struct Inner {
    base: Url,
    anon_key: String,
    http: Client,
    session: Mutex<Option<Session>>,
}

/// Client for the hosted auth service. Cheap to clone.
#[derive(Clone)]
pub struct SupabaseAuth {
    inner: Arc<Inner>,
}

impl PartialEq for SupabaseAuth {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for SupabaseAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseAuth")
            .field("base", &self.inner.base.as_str())
            .finish_non_exhaustive()
    }
}

impl SupabaseAuth {
    /// Create a client for the project at `project_url`, restoring any stored session.
    pub fn new(project_url: Url, anon_key: impl Into<String>) -> Self {
        let base = config::base_url(project_url);
        Self {
            inner: Arc::new(Inner {
                base,
                anon_key: anon_key.into(),
                http: Client::new(),
                session: Mutex::new(session::load_persisted()),
            }),
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(config.supabase_url.clone(), config.supabase_anon_key.clone())
    }

    fn endpoint(&self, path: &str) -> Result<Url, AuthError> {
        self.inner
            .base
            .join("auth/v1/")
            .and_then(|u| u.join(path))
            .map_err(|e| AuthError::Decode(format!("bad auth endpoint {path}: {e}")))
    }

    fn with_api_key(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("apikey", &self.inner.anon_key)
    }

    /// The stored session, dropping it first if its access token has expired.
    fn live_session(&self) -> Option<Session> {
        let mut guard = self
            .inner
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if guard.as_ref().is_some_and(Session::is_expired) {
            tracing::info!("Stored session has expired, discarding it");
            *guard = None;
            session::persist(None);
        }
        guard.clone()
    }

    fn access_token(&self) -> Result<String, AuthError> {
        self.live_session()
            .map(|s| s.access_token)
            .ok_or(AuthError::SessionMissing)
    }

    fn set_session(&self, new_session: Option<Session>) {
        session::persist(new_session.as_ref());
        *self
            .inner
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = new_session;
    }

    fn remember_user(&self, user: &UserInfo) {
        let mut guard = self
            .inner
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(current) = guard.as_mut() {
            current.user = Some(user.clone());
            session::persist(Some(current));
        }
    }

    /// Sign in with email and password, replacing any current session.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserInfo, AuthError> {
        let url = self.endpoint("token")?;
        let response = self
            .with_api_key(self.inner.http.post(url))
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email.trim(), "password": password }))
            .send()
            .await?;
        let token: TokenResponse = decode(check(response).await?).await?;

        let user = token.user.as_ref().map(GoTrueUser::to_info);
        self.set_session(Some(Session {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            token_type: token.token_type.unwrap_or_else(|| "bearer".to_string()),
            expires_in: token.expires_in,
            expires_at: session::expiry(token.expires_at, token.expires_in, session::unix_now()),
            user: user.clone(),
        }));

        match user {
            Some(user) => Ok(user),
            None => self.get_current_user().await,
        }
    }

    /// URL the browser should be sent to for an OAuth sign-in with `provider`.
    pub fn authorize_url(&self, provider: &str, redirect_to: &str) -> Result<String, AuthError> {
        let base = self.endpoint("authorize")?;
        let url = Url::parse_with_params(
            base.as_str(),
            &[("provider", provider), ("redirect_to", redirect_to)],
        )
        .map_err(|e| AuthError::Decode(e.to_string()))?;
        Ok(url.to_string())
    }

    /// Revoke the session server-side and forget it locally.
    ///
    /// The local session is cleared even when the revoke call fails.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let token = match self.access_token() {
            Ok(token) => token,
            Err(AuthError::SessionMissing) => return Ok(()),
            Err(e) => return Err(e),
        };
        let url = self.endpoint("logout")?;
        let result = self
            .with_api_key(self.inner.http.post(url))
            .bearer_auth(token)
            .send()
            .await
            .map_err(AuthError::from);
        self.set_session(None);

        check(result?).await.map(|_| ())
    }
}

impl AuthClient for SupabaseAuth {
    fn receive_redirect(&self, fragment: &RedirectFragment) {
        if let Some(session) = fragment.session() {
            tracing::debug!("Adopting session from redirect fragment");
            self.set_session(Some(session));
        }
    }

    async fn get_current_user(&self) -> Result<UserInfo, AuthError> {
        let token = self.access_token()?;
        let url = self.endpoint("user")?;
        let response = self
            .with_api_key(self.inner.http.get(url))
            .bearer_auth(token)
            .send()
            .await?;
        let user: GoTrueUser = decode(check(response).await?).await?;
        let info = user.to_info();
        self.remember_user(&info);
        Ok(info)
    }

    fn get_session(&self) -> Option<Session> {
        self.live_session()
    }

    async fn request_password_reset(
        &self,
        email: &str,
        redirect_to: &str,
    ) -> Result<(), AuthError> {
        let url = self.endpoint("recover")?;
        let response = self
            .with_api_key(self.inner.http.post(url))
            .query(&[("redirect_to", redirect_to)])
            .json(&json!({ "email": email }))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    async fn update_credentials(&self, password: &str) -> Result<(), AuthError> {
        let token = self.access_token()?;
        let url = self.endpoint("user")?;
        let response = self
            .with_api_key(self.inner.http.put(url))
            .bearer_auth(token)
            .json(&json!({ "password": password }))
            .send()
            .await?;
        let user: GoTrueUser = decode(check(response).await?).await?;
        self.remember_user(&user.to_info());
        Ok(())
    }
}

/// Turn a non-2xx response into a provider error carrying the service's message.
async fn check(response: Response) -> Result<Response, AuthError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| format!("Authentication service returned {status}"));
    tracing::warn!(status = status.as_u16(), "Auth request rejected: {}", message);
    Err(AuthError::Provider {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, AuthError> {
    response
        .json()
        .await
        .map_err(|e| AuthError::Decode(e.to_string()))
}
