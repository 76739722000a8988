//! Data models shared by the clients and the UI.

mod image;
mod user;

pub use image::ImageFile;
pub(crate) use user::GoTrueUser;
pub use user::UserInfo;
