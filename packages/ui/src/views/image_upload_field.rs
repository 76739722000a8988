use dioxus::prelude::*;

use api::{CloudinaryUploader, ImageFile};

use crate::notify::{Notification, NotificationSink, Toaster};
use crate::upload::ImageUpload;
use crate::Icon;
use crate::icons::FaCamera;

/// File picker that uploads the chosen image and reports its public URL.
#[component]
pub fn ImageUploadField(
    uploader: CloudinaryUploader,
    toaster: Toaster,
    on_uploaded: EventHandler<String>,
    #[props(default = "Upload photo".to_string())] label: String,
) -> Element {
    let uploading = use_signal(|| false);
    let upload = use_hook(move || {
        ImageUpload::new(uploader, toaster).on_change(move |busy| {
            let mut uploading = uploading;
            uploading.set(busy);
        })
    });

    let handle_change = move |evt: FormEvent| {
        let upload = upload.clone();
        async move {
            let Some(picked) = evt.files().into_iter().next() else {
                return;
            };
            let bytes = match picked.read_bytes().await {
                Ok(bytes) => bytes.to_vec(),
                Err(e) => {
                    tracing::error!("Could not read {}: {}", picked.name(), e);
                    toaster.notify(Notification::destructive(
                        "Upload failed",
                        "Could not read the selected file.",
                    ));
                    return;
                }
            };
            let file = match picked.content_type() {
                Some(content_type) => ImageFile::new(picked.name(), content_type, bytes),
                None => ImageFile::from_name(picked.name(), bytes),
            };
            if let Some(url) = upload.upload_image(&file).await {
                on_uploaded.call(url);
            }
        }
    };

    rsx! {
        label {
            class: if uploading() { "upload-field busy" } else { "upload-field" },
            Icon { icon: FaCamera, width: 16, height: 16 }
            span { if uploading() { "Uploading..." } else { "{label}" } }
            input {
                r#type: "file",
                accept: "image/*",
                disabled: uploading(),
                onchange: handle_change,
            }
        }
    }
}
