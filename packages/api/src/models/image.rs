/// An image picked by the user, read fully into memory before upload.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Guess the content type from the file extension when the browser gave none.
    pub fn from_name(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let ext = name.rsplit('.').next().unwrap_or_default().to_ascii_lowercase();
        let content_type = match ext.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "svg" => "image/svg+xml",
            _ => "application/octet-stream",
        };
        Self::new(name, content_type, bytes)
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}
