use dioxus::prelude::*;

use crate::config::{LoaderConfig, RenderVariant};
use crate::services::profile_loader::{generate_profile, LoadState, ProfileTarget};
use crate::services::relay::RelayClient;
use crate::utils::dclogin::DcLogin;

/// Loader output held in component signals instead of host page elements
struct SignalTarget {
    config: LoaderConfig,
    primary_href: Signal<Option<String>>,
    secondary_href: Signal<Option<String>>,
    qr_markup: Signal<Option<String>>,
}

impl ProfileTarget for SignalTarget {
    fn has_element(&self, id: &str) -> bool {
        id == self.config.primary_link_id
            || id == self.config.secondary_link_id
            || id == self.config.container_id
    }

    fn set_link(&mut self, id: &str, href: &str) -> bool {
        if id == self.config.primary_link_id {
            self.primary_href.set(Some(href.to_string()));
        } else if id == self.config.secondary_link_id {
            self.secondary_href.set(Some(href.to_string()));
        } else {
            return false;
        }
        true
    }

    fn set_markup(&mut self, id: &str, html: &str) -> bool {
        if id != self.config.container_id {
            return false;
        }
        self.qr_markup.set(Some(html.to_string()));
        true
    }
}

/// Self-contained profile card, used when the host page has no
/// `#dclogin-link` / `#qr-code` elements of its own
#[component]
pub fn DcloginProfile(config: LoaderConfig) -> Element {
    let mut state = use_signal(LoadState::default);
    let primary_href = use_signal(|| None::<String>);
    let secondary_href = use_signal(|| None::<String>);
    let qr_markup = use_signal(|| None::<String>);

    let load_config = config.clone();
    use_effect(move || {
        let config = load_config.clone();
        spawn(async move {
            let client = RelayClient::new(config.endpoint.clone());
            let mut target = SignalTarget {
                config: config.clone(),
                primary_href,
                secondary_href,
                qr_markup,
            };
            let result = generate_profile(&client, &mut target, &config).await;
            state.set(result);
        });
    });

    let login = state.read().url().and_then(|url| DcLogin::parse(url).ok());
    let address = login.as_ref().map(|l| l.address.clone());
    let self_signed_domain = login
        .as_ref()
        .filter(|l| l.accepts_invalid_certificates())
        .and_then(|l| l.domain().map(str::to_string));
    let href = primary_href.read().clone().unwrap_or_default();
    let qr_href = secondary_href.read().clone().unwrap_or_default();
    let wrapped = config.variant == RenderVariant::WrappedLink;
    let container_id = config.container_id.clone();
    let primary_id = config.primary_link_id.clone();
    let secondary_id = config.secondary_link_id.clone();

    rsx! {
        div {
            class: "max-w-sm mx-auto p-6 space-y-4 text-center",

            h2 {
                class: "text-xl font-bold",
                "Your chat profile"
            }

            if let Some(addr) = address {
                p {
                    class: "font-mono text-sm break-all text-muted-foreground",
                    "{addr}"
                }
            }

            if let Some(domain) = self_signed_domain {
                p {
                    class: "text-xs text-muted-foreground",
                    "{domain} uses a self-signed certificate"
                }
            }

            // QR code
            if wrapped {
                div {
                    id: "{container_id}",
                    class: "flex justify-center bg-white p-4 rounded-lg",
                    if let Some(qr) = qr_markup.read().as_ref() {
                        div { dangerous_inner_html: "{qr}" }
                    } else {
                        QrPlaceholder {}
                    }
                }
            } else {
                a {
                    id: "{secondary_id}",
                    href: "{qr_href}",
                    div {
                        id: "{container_id}",
                        class: "flex justify-center bg-white p-4 rounded-lg",
                        if let Some(qr) = qr_markup.read().as_ref() {
                            div { dangerous_inner_html: "{qr}" }
                        } else {
                            QrPlaceholder {}
                        }
                    }
                }
            }

            a {
                id: "{primary_id}",
                class: "inline-block w-full bg-primary text-primary-foreground px-4 py-2 rounded hover:bg-primary/90 transition",
                href: "{href}",
                "Open in Delta Chat"
            }
        }
    }
}

#[component]
fn QrPlaceholder() -> Element {
    rsx! {
        div {
            class: "animate-pulse w-[300px] h-[300px] bg-muted rounded flex items-center justify-center",
            role: "status",
            aria_busy: "true",
            span {
                class: "text-sm text-muted-foreground",
                "Creating profile…"
            }
        }
    }
}

