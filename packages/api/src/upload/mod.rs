//! Image uploads to the hosted media CDN.

use std::future::Future;

use thiserror::Error;

mod cloudinary;

pub use cloudinary::CloudinaryUploader;

use crate::models::ImageFile;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("upload rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("upload request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("upload response had no secure_url")]
    MissingUrl,
}

/// Stores an image remotely and returns its public URL.
pub trait UploadClient {
    fn upload(&self, file: &ImageFile) -> impl Future<Output = Result<String, UploadError>>;
}
