//! Image upload with user-facing error reporting.

use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use api::{ImageFile, UploadClient};

use crate::notify::{Notification, NotificationSink};

/// Uploads images and reports failures through a notification sink.
///
/// `is_uploading` is a single flag shared by all clones. Two overlapping uploads
/// both write it and whichever finishes last wins; calls are not queued.
#[derive(Clone)]
pub struct ImageUpload<U, N> {
    client: U,
    notifier: N,
    uploading: Arc<AtomicBool>,
    on_change: Option<Rc<dyn Fn(bool)>>,
}

impl<U: UploadClient, N: NotificationSink> ImageUpload<U, N> {
    pub fn new(client: U, notifier: N) -> Self {
        Self {
            client,
            notifier,
            uploading: Arc::new(AtomicBool::new(false)),
            on_change: None,
        }
    }

    /// Call `listener` with the new value whenever `is_uploading` changes.
    pub fn on_change(mut self, listener: impl Fn(bool) + 'static) -> Self {
        self.on_change = Some(Rc::new(listener));
        self
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading.load(Ordering::SeqCst)
    }

    fn set_uploading(&self, uploading: bool) {
        self.uploading.store(uploading, Ordering::SeqCst);
        if let Some(listener) = &self.on_change {
            listener(uploading);
        }
    }

    /// Upload `file` and return its public URL, or `None` after notifying the user.
    pub async fn upload_image(&self, file: &ImageFile) -> Option<String> {
        if !file.is_image() {
            self.notifier.notify(Notification::destructive(
                "Upload failed",
                "Please choose an image file.",
            ));
            return None;
        }

        self.set_uploading(true);
        let result = self.client.upload(file).await;
        self.set_uploading(false);

        match result {
            Ok(url) => {
                tracing::debug!("Uploaded {} to {}", file.name, url);
                Some(url)
            }
            Err(e) => {
                tracing::error!("Error uploading image {}: {}", file.name, e);
                self.notifier.notify(Notification::destructive(
                    "Upload failed",
                    "There was an error uploading your image. Please try again.",
                ));
                None
            }
        }
    }
}
