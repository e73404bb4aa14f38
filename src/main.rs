#![allow(non_snake_case)]

use dioxus::prelude::*;

// Modules
mod components;
mod config;
mod services;
mod utils;

use components::DcloginProfile;
use config::LoaderConfig;

fn main() {
    // Initialize panic hook for better error messages in browser console
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    }

    log::info!("Starting dclogin profile generator");

    // Pages served by the relay already carry the link and QR elements
    #[cfg(target_arch = "wasm32")]
    {
        if run_in_host_page() {
            return;
        }
    }

    // Otherwise render our own card into #main
    dioxus::launch(App);
}

/// Fill the host page's own elements, if it has them
#[cfg(target_arch = "wasm32")]
fn run_in_host_page() -> bool {
    use crate::services::profile_loader::{generate_profile, ProfileTarget};
    use crate::services::relay::RelayClient;
    use crate::utils::dom::DocumentTarget;

    let Some(mut target) = DocumentTarget::current() else {
        return false;
    };
    let config = LoaderConfig::from_document(target.document());
    if !target.has_element(&config.container_id) {
        return false;
    }

    log::info!("Using host page elements ({})", config.variant.as_str());
    wasm_bindgen_futures::spawn_local(async move {
        let client = RelayClient::new(config.endpoint.clone());
        generate_profile(&client, &mut target, &config).await;
    });
    true
}

/// Read a `data-*` override from the element the card mounts into
fn mount_attribute(name: &str) -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()?
            .document()?
            .get_element_by_id("main")?
            .get_attribute(name)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = name;
        None
    }
}

#[component]
fn App() -> Element {
    let config = use_hook(|| LoaderConfig::default().with_overrides(mount_attribute));

    rsx! {
        DcloginProfile {
            config,
        }
    }
}
