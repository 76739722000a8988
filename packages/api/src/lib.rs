//! # API crate: hosted collaborators for the miamour frontend
//!
//! This crate wraps the two third-party services the miamour site talks to, plus the
//! configuration and data types they share. It compiles for both `wasm32` (the web
//! app) and native targets (tests and tooling), so every client is built on
//! `reqwest`, which uses `fetch` in the browser and hyper everywhere else.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | [`AuthClient`] trait, the GoTrue-backed [`SupabaseAuth`] implementation, redirect fragment parsing, session types |
//! | [`upload`] | [`UploadClient`] trait and the Cloudinary-backed [`CloudinaryUploader`] |
//! | [`config`] | [`SiteConfig`], loaded from the environment (native) or captured at build time (web) |
//! | [`models`] | [`UserInfo`] and [`ImageFile`] |
//!
//! ## Errors
//!
//! Each collaborator has its own error enum ([`AuthError`], [`UploadError`],
//! [`ConfigError`]). Flow code in the `ui` crate decides how each class is surfaced
//! to the user; nothing here talks to the UI.

pub mod auth;
pub mod config;
pub mod models;
pub mod upload;

pub use auth::{AuthClient, AuthError, RedirectFragment, Session, SupabaseAuth};
pub use config::{ConfigError, SiteConfig};
pub use models::{ImageFile, UserInfo};
pub use upload::{CloudinaryUploader, UploadClient, UploadError};
