//! # Site configuration
//!
//! Everything the frontend needs to reach its hosted collaborators. On native targets
//! the values come from the process environment (a `.env` file is loaded first via
//! `dotenvy`); the web build has no environment at runtime, so
//! [`SiteConfig::from_build_env`] captures the same variables when the crate is
//! compiled.
//!
//! | Variable | Required | Meaning |
//! |----------|----------|---------|
//! | `MIAMOUR_SUPABASE_URL` | yes | Base URL of the hosted auth project |
//! | `MIAMOUR_SUPABASE_ANON_KEY` | yes | Public anon key sent as `apikey` |
//! | `MIAMOUR_SITE_URL` | yes | Public origin of this site, used for redirect targets |
//! | `MIAMOUR_CLOUDINARY_CLOUD_NAME` | yes | Media host account |
//! | `MIAMOUR_CLOUDINARY_UPLOAD_PRESET` | yes | Unsigned upload preset |
//! | `MIAMOUR_CLOUDINARY_API_KEY` | yes | Public media host api key |
//! | `MIAMOUR_CLOUDINARY_BASE_URL` | no | Override for the media host origin |

use thiserror::Error;
use url::Url;

/// Default origin of the media host upload API.
pub const DEFAULT_CLOUDINARY_BASE_URL: &str = "https://api.cloudinary.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),
    #[error("{key} is not a valid URL: {source}")]
    InvalidUrl {
        key: &'static str,
        #[source]
        source: url::ParseError,
    },
}

/// `url` with a trailing `/` on its path, so relative joins append to it.
pub fn base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Connection settings for the hosted auth and media services.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub supabase_url: Url,
    pub supabase_anon_key: String,
    pub site_url: Url,
    pub cloudinary_cloud_name: String,
    pub cloudinary_upload_preset: String,
    pub cloudinary_api_key: String,
    pub cloudinary_base_url: Url,
}

impl SiteConfig {
    /// Build a config from a key lookup. Shared by the runtime and build-time loaders.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let parse_url = |key: &'static str, raw: &str| {
            Url::parse(raw)
                .map(base_url)
                .map_err(|source| ConfigError::InvalidUrl { key, source })
        };

        let supabase_url = parse_url(
            "MIAMOUR_SUPABASE_URL",
            &required("MIAMOUR_SUPABASE_URL")?,
        )?;
        let site_url = parse_url("MIAMOUR_SITE_URL", &required("MIAMOUR_SITE_URL")?)?;
        let cloudinary_base_url = match lookup("MIAMOUR_CLOUDINARY_BASE_URL") {
            Some(raw) if !raw.trim().is_empty() => {
                parse_url("MIAMOUR_CLOUDINARY_BASE_URL", raw.trim())?
            }
            _ => parse_url("MIAMOUR_CLOUDINARY_BASE_URL", DEFAULT_CLOUDINARY_BASE_URL)?,
        };

        Ok(Self {
            supabase_url,
            supabase_anon_key: required("MIAMOUR_SUPABASE_ANON_KEY")?,
            site_url,
            cloudinary_cloud_name: required("MIAMOUR_CLOUDINARY_CLOUD_NAME")?,
            cloudinary_upload_preset: required("MIAMOUR_CLOUDINARY_UPLOAD_PRESET")?,
            cloudinary_api_key: required("MIAMOUR_CLOUDINARY_API_KEY")?,
            cloudinary_base_url,
        })
    }

    /// Load from the process environment, reading `.env` first if present.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the values captured from the environment at compile time.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| {
            let value = match key {
                "MIAMOUR_SUPABASE_URL" => option_env!("MIAMOUR_SUPABASE_URL"),
                "MIAMOUR_SUPABASE_ANON_KEY" => option_env!("MIAMOUR_SUPABASE_ANON_KEY"),
                "MIAMOUR_SITE_URL" => option_env!("MIAMOUR_SITE_URL"),
                "MIAMOUR_CLOUDINARY_CLOUD_NAME" => option_env!("MIAMOUR_CLOUDINARY_CLOUD_NAME"),
                "MIAMOUR_CLOUDINARY_UPLOAD_PRESET" => {
                    option_env!("MIAMOUR_CLOUDINARY_UPLOAD_PRESET")
                }
                "MIAMOUR_CLOUDINARY_API_KEY" => option_env!("MIAMOUR_CLOUDINARY_API_KEY"),
                "MIAMOUR_CLOUDINARY_BASE_URL" => option_env!("MIAMOUR_CLOUDINARY_BASE_URL"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }

    /// Absolute URL of a path on this site, e.g. `/auth/callback`. The path is taken
    /// relative to `site_url`, so a site served under a prefix keeps it.
    pub fn site_link(&self, path: &str) -> String {
        match base_url(self.site_url.clone()).join(path.trim_start_matches('/')) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}{}", self.site_url.as_str().trim_end_matches('/'), path),
        }
    }
}
