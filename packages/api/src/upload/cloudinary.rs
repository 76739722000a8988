//! # Unsigned uploads to Cloudinary
//!
//! Uploads go straight from the browser to `POST <base>/v1_1/<cloud>/image/upload`
//! as multipart form data with three fields: `file`, `upload_preset` and `api_key`.
//! The preset is configured as unsigned on the media host, so no secret ever reaches
//! the client. A successful response is JSON whose `secure_url` is the HTTPS address
//! of the stored image.

use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::{UploadClient, UploadError};
use crate::config::{self, SiteConfig};
use crate::models::ImageFile;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UploadErrorBody {
    error: Option<UploadErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct UploadErrorDetail {
    message: String,
}

struct Inner {
    endpoint: Url,
    upload_preset: String,
    api_key: String,
    http: Client,
}

/// Client for the media host's unsigned upload endpoint. Cheap to clone.
#[derive(Clone)]
pub struct CloudinaryUploader {
    inner: Arc<Inner>,
}

impl PartialEq for CloudinaryUploader {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for CloudinaryUploader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryUploader")
            .field("endpoint", &self.inner.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl CloudinaryUploader {
    /// Create an uploader for an exact endpoint URL.
    pub fn new(
        endpoint: Url,
        upload_preset: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                endpoint,
                upload_preset: upload_preset.into(),
                api_key: api_key.into(),
                http: Client::new(),
            }),
        }
    }

    pub fn from_config(config: &SiteConfig) -> Result<Self, url::ParseError> {
        let endpoint = config::base_url(config.cloudinary_base_url.clone()).join(&format!(
            "v1_1/{}/image/upload",
            config.cloudinary_cloud_name
        ))?;
        Ok(Self::new(
            endpoint,
            config.cloudinary_upload_preset.clone(),
            config.cloudinary_api_key.clone(),
        ))
    }

    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    fn form(&self, file: &ImageFile) -> Result<Form, UploadError> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.content_type)?;
        Ok(Form::new()
            .part("file", part)
            .text("upload_preset", self.inner.upload_preset.clone())
            .text("api_key", self.inner.api_key.clone()))
    }
}

impl UploadClient for CloudinaryUploader {
    async fn upload(&self, file: &ImageFile) -> Result<String, UploadError> {
        let form = self.form(file)?;
        let response = self
            .inner
            .http
            .post(self.inner.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<UploadErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .map(|d| d.message)
                .unwrap_or_else(|| format!("media host returned {status}"));
            return Err(UploadError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: UploadResponse = response.json().await?;
        body.secure_url
            .filter(|u| !u.is_empty())
            .ok_or(UploadError::MissingUrl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn uploader(server: &MockServer) -> CloudinaryUploader {
        let endpoint = Url::parse(&format!("{}/v1_1/demo/image/upload", server.uri())).unwrap();
        CloudinaryUploader::new(endpoint, "unsigned", "key-1")
    }

    fn photo() -> ImageFile {
        ImageFile::from_name("ring.png", vec![0x89, b'P', b'N', b'G'])
    }

    #[tokio::test]
    async fn test_upload_returns_secure_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1_1/demo/image/upload"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "secure_url": "https://x/y.png" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let url = uploader(&server).upload(&photo()).await.unwrap();
        assert_eq!(url, "https://x/y.png");

        let requests = server.received_requests().await.unwrap();
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains("name=\"upload_preset\""));
        assert!(body.contains("unsigned"));
        assert!(body.contains("name=\"api_key\""));
        assert!(body.contains("filename=\"ring.png\""));
    }

    #[tokio::test]
    async fn test_rejection_carries_host_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({ "error": { "message": "Upload preset not found" } })),
            )
            .mount(&server)
            .await;

        let err = uploader(&server).upload(&photo()).await.unwrap_err();
        match err {
            UploadError::Rejected { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Upload preset not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_url_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "public_id": "abc" })))
            .mount(&server)
            .await;

        let err = uploader(&server).upload(&photo()).await.unwrap_err();
        assert!(matches!(err, UploadError::MissingUrl));
    }

    fn config_with(base_url: Option<&'static str>) -> SiteConfig {
        SiteConfig::from_lookup(|key| {
            let v = match key {
                "MIAMOUR_SUPABASE_URL" => "https://abc.supabase.co",
                "MIAMOUR_SUPABASE_ANON_KEY" => "anon",
                "MIAMOUR_SITE_URL" => "https://miamour.example",
                "MIAMOUR_CLOUDINARY_CLOUD_NAME" => "miamour",
                "MIAMOUR_CLOUDINARY_UPLOAD_PRESET" => "profile",
                "MIAMOUR_CLOUDINARY_API_KEY" => "123",
                "MIAMOUR_CLOUDINARY_BASE_URL" => base_url?,
                _ => return None,
            };
            Some(v.to_string())
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_from_config() {
        let uploader = CloudinaryUploader::from_config(&config_with(None)).unwrap();
        assert_eq!(
            uploader.endpoint().as_str(),
            "https://api.cloudinary.com/v1_1/miamour/image/upload"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        let config = config_with(Some("https://media.example/cdn"));
        let uploader = CloudinaryUploader::from_config(&config).unwrap();
        assert_eq!(
            uploader.endpoint().as_str(),
            "https://media.example/cdn/v1_1/miamour/image/upload"
        );

        let unnormalised = SiteConfig {
            cloudinary_base_url: Url::parse("https://media.example/cdn").unwrap(),
            ..config
        };
        let uploader = CloudinaryUploader::from_config(&unnormalised).unwrap();
        assert_eq!(
            uploader.endpoint().as_str(),
            "https://media.example/cdn/v1_1/miamour/image/upload"
        );
    }
}
