//! Loader configuration
//!
//! Defaults match the relay's shipped page. A page can override a few of
//! them through `data-*` attributes on the QR container, e.g.
//! `<div id="qr-code" data-variant="wrapped" data-size="256">`.

use crate::services::relay::NEW_ACCOUNT_PATH;
use crate::utils::qr::QrStyle;

pub const PRIMARY_LINK_ID: &str = "dclogin-link";
pub const SECONDARY_LINK_ID: &str = "qr-link";
pub const CONTAINER_ID: &str = "qr-code";

/// Smallest QR size still scannable from a phone screen
const MIN_SIZE: u32 = 64;
const MAX_SIZE: u32 = 2048;

/// How the activation URL is projected into the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderVariant {
    /// Primary and secondary anchors get the URL, the container gets the bare code
    #[default]
    DualLinks,
    /// Primary anchor gets the URL, the container gets the code wrapped in its own anchor
    WrappedLink,
}

impl RenderVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderVariant::DualLinks => "dual",
            RenderVariant::WrappedLink => "wrapped",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dual" | "dual-links" => Some(RenderVariant::DualLinks),
            "wrapped" | "wrapped-link" => Some(RenderVariant::WrappedLink),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoaderConfig {
    pub endpoint: String,
    pub primary_link_id: String,
    pub secondary_link_id: String,
    pub container_id: String,
    pub variant: RenderVariant,
    pub qr: QrStyle,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            endpoint: NEW_ACCOUNT_PATH.to_string(),
            primary_link_id: PRIMARY_LINK_ID.to_string(),
            secondary_link_id: SECONDARY_LINK_ID.to_string(),
            container_id: CONTAINER_ID.to_string(),
            variant: RenderVariant::default(),
            qr: QrStyle::default(),
        }
    }
}

impl LoaderConfig {
    /// Apply overrides looked up by attribute name (`data-endpoint`, ...)
    ///
    /// Invalid values are logged and skipped.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup("data-endpoint") {
            let endpoint = endpoint.trim();
            if endpoint.is_empty() {
                log::warn!("Ignoring empty data-endpoint");
            } else {
                self.endpoint = endpoint.to_string();
            }
        }

        if let Some(variant) = lookup("data-variant") {
            match RenderVariant::from_str(&variant) {
                Some(v) => self.variant = v,
                None => log::warn!("Ignoring unknown data-variant {:?}", variant),
            }
        }

        if let Some(size) = lookup("data-size") {
            match size.trim().parse::<u32>() {
                Ok(px) if (MIN_SIZE..=MAX_SIZE).contains(&px) => {
                    self.qr = QrStyle {
                        padding: self.qr.padding,
                        join: self.qr.join,
                        ..QrStyle::square(px)
                    };
                }
                _ => log::warn!("Ignoring invalid data-size {:?}", size),
            }
        }

        self
    }

    /// Read overrides from the container element of the current document
    #[cfg(target_arch = "wasm32")]
    pub fn from_document(document: &web_sys::Document) -> Self {
        let config = Self::default();
        match document.get_element_by_id(&config.container_id) {
            Some(container) => config.with_overrides(|name| container.get_attribute(name)),
            None => config,
        }
    }
}
