use dioxus::prelude::*;

pub(crate) const VIEWS_CSS: Asset = asset!("/src/views/views.css");

mod auth_callback;
pub use auth_callback::AuthCallbackView;

mod forgot_password;
pub use forgot_password::ForgotPasswordView;

mod reset_password;
pub use reset_password::ResetPasswordView;

mod login;
pub use login::LoginView;

mod dashboard;
pub use dashboard::DashboardView;

mod image_upload_field;
pub use image_upload_field::ImageUploadField;
