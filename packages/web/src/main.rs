use dioxus::prelude::*;

use api::{CloudinaryUploader, SiteConfig, SupabaseAuth};
use ui::{use_current_user, use_toaster, Destination, SplashScreen, ToastStack};
use views::{AuthCallback, CeremonyPlanning, Dashboard, ForgotPassword, Home, Login, ResetPassword};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Home {},
    #[route("/services/ceremony-planning")]
    CeremonyPlanning {},
    #[route("/login")]
    Login {},
    #[route("/dashboard")]
    Dashboard {},
    #[route("/auth/callback")]
    AuthCallback {},
    #[route("/forgot-password")]
    ForgotPassword {},
    #[route("/reset-password")]
    ResetPassword {},
}

impl From<Destination> for Route {
    fn from(destination: Destination) -> Self {
        match destination {
            Destination::Home => Route::Home {},
            Destination::Login => Route::Login {},
            Destination::Dashboard => Route::Dashboard {},
            Destination::ResetPassword => Route::ResetPassword {},
            Destination::ForgotPassword => Route::ForgotPassword {},
        }
    }
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

/// Clients shared by every route. Built once from [`SiteConfig`].
#[derive(Clone, PartialEq)]
pub(crate) struct Services {
    pub auth: SupabaseAuth,
    pub uploader: CloudinaryUploader,
    pub config: SiteConfig,
}

impl Services {
    fn build(config: SiteConfig) -> Result<Self, String> {
        let uploader = CloudinaryUploader::from_config(&config)
            .map_err(|e| format!("Invalid media host configuration: {e}"))?;
        Ok(Self {
            auth: SupabaseAuth::from_config(&config),
            uploader,
            config,
        })
    }

    /// Absolute URL of a page on this site.
    pub fn link(&self, path: &str) -> String {
        self.config.site_link(path)
    }
}

#[component]
fn App() -> Element {
    let services = use_hook(|| {
        SiteConfig::from_build_env()
            .map_err(|e| e.to_string())
            .and_then(Services::build)
    });

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: ui::MIAMOUR_CSS }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        match services {
            Ok(services) => rsx! { Shell { services } },
            Err(message) => rsx! { ConfigErrorScreen { message } },
        }
    }
}

/// Provides the clients, toaster and signed-in user to every route, once.
#[component]
fn Shell(services: Services) -> Element {
    let toaster = use_toaster();
    let session = use_current_user(services.auth.clone());
    use_context_provider(|| services);
    use_context_provider(|| toaster);
    use_context_provider(|| session);

    rsx! {
        SplashScreen { pending: session().loading }
        Router::<Route> {}
        ToastStack { toaster }
    }
}

#[component]
fn ConfigErrorScreen(message: String) -> Element {
    tracing::error!("Site configuration is incomplete: {}", message);

    rsx! {
        div {
            class: "config-error",
            h1 { "miamour is not configured" }
            p { "{message}" }
        }
    }
}

/// Router-backed handler for the `on_navigate` events the ui views emit.
pub(crate) fn use_destination_handler() -> EventHandler<Destination> {
    let nav = use_navigator();
    EventHandler::new(move |destination: Destination| {
        nav.replace(Route::from(destination));
    })
}
