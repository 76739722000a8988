mod home;
pub use home::Home;

mod ceremony_planning;
pub use ceremony_planning::CeremonyPlanning;

mod login;
pub use login::Login;

mod dashboard;
pub use dashboard::Dashboard;

mod auth_callback;
pub use auth_callback::AuthCallback;

mod password;
pub use password::{ForgotPassword, ResetPassword};

mod site_nav;
pub use site_nav::SiteNav;
