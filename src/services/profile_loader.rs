//! Profile loader
//!
//! Fetches a fresh credential record from the relay and projects its
//! activation URL into the page: link targets plus a QR code of the URL.
//! Failures are logged and leave the page untouched.

use crate::config::{LoaderConfig, RenderVariant};
use crate::services::relay::{CredentialRecord, CredentialSource, RelayError};
use crate::utils::dclogin::{DcLogin, DcLoginError};
use crate::utils::escape_attr;
use crate::utils::qr::{render_svg, QrRenderError};

/// Page elements the loader writes into
pub trait ProfileTarget {
    fn has_element(&self, id: &str) -> bool;

    /// Point the anchor `id` at `href`. Returns false if there is no such element.
    fn set_link(&mut self, id: &str, href: &str) -> bool;

    /// Replace the inner markup of `id`. Returns false if there is no such element.
    fn set_markup(&mut self, id: &str, html: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    #[default]
    NotLoaded,
    Loaded(String),
}

impl LoadState {
    pub fn url(&self) -> Option<&str> {
        match self {
            LoadState::Loaded(url) => Some(url),
            LoadState::NotLoaded => None,
        }
    }
}

/// What was written into the page
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedProfile {
    pub url: String,
    pub login: DcLogin,
    pub markup: String,
    pub secondary_link: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    MissingElement(String),
    InvalidUrl(DcLoginError),
    Qr(QrRenderError),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            RenderError::MissingElement(id) => write!(f, "No element with id \"{}\"", id),
            RenderError::InvalidUrl(e) => write!(f, "Invalid activation URL: {}", e),
            RenderError::Qr(e) => write!(f, "QR rendering failed: {}", e),
        }
    }
}

impl std::error::Error for RenderError {}

#[derive(Debug, Clone, PartialEq)]
pub enum LoaderError {
    Relay(RelayError),
    Render(RenderError),
}

impl std::fmt::Display for LoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LoaderError::Relay(e) => write!(f, "{}", e),
            LoaderError::Render(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for LoaderError {}

impl From<RelayError> for LoaderError {
    fn from(e: RelayError) -> Self {
        LoaderError::Relay(e)
    }
}

impl From<RenderError> for LoaderError {
    fn from(e: RenderError) -> Self {
        LoaderError::Render(e)
    }
}

/// Markup written into the QR container for `url`
pub fn container_markup(url: &str, config: &LoaderConfig) -> Result<String, QrRenderError> {
    let svg = render_svg(url, &config.qr)?;
    Ok(match config.variant {
        RenderVariant::DualLinks => svg,
        RenderVariant::WrappedLink => format!(r#"<a href="{}">{}</a>"#, escape_attr(url), svg),
    })
}

/// Write `record` into `target`
///
/// Everything that can fail is checked before the first write, so an
/// error never leaves the page half-rendered.
pub fn render_profile<T>(
    target: &mut T,
    config: &LoaderConfig,
    record: &CredentialRecord,
) -> Result<RenderedProfile, RenderError>
where
    T: ProfileTarget + ?Sized,
{
    // Written out exactly as the relay returned it
    let url = record.dclogin_url.as_str();
    let login = record.login().map_err(RenderError::InvalidUrl)?;
    let markup = container_markup(url, config).map_err(RenderError::Qr)?;

    for id in [&config.primary_link_id, &config.container_id] {
        if !target.has_element(id) {
            return Err(RenderError::MissingElement(id.clone()));
        }
    }

    target.set_link(&config.primary_link_id, url);
    let secondary_link = match config.variant {
        RenderVariant::DualLinks => target.set_link(&config.secondary_link_id, url),
        RenderVariant::WrappedLink => false,
    };
    target.set_markup(&config.container_id, &markup);

    Ok(RenderedProfile {
        url: url.to_string(),
        login,
        markup,
        secondary_link,
    })
}

/// Fetch credentials and render them, reporting any failure
pub async fn try_generate_profile<S, T>(
    source: &S,
    target: &mut T,
    config: &LoaderConfig,
) -> Result<RenderedProfile, LoaderError>
where
    S: CredentialSource + ?Sized,
    T: ProfileTarget + ?Sized,
{
    let record = source.fetch_credentials().await?;
    Ok(render_profile(target, config, &record)?)
}

/// Fetch credentials and render them
///
/// Never fails: errors are logged and the page stays in its initial state.
pub async fn generate_profile<S, T>(source: &S, target: &mut T, config: &LoaderConfig) -> LoadState
where
    S: CredentialSource + ?Sized,
    T: ProfileTarget + ?Sized,
{
    match try_generate_profile(source, target, config).await {
        Ok(profile) => {
            log::info!(
                "Rendered dclogin profile for {} ({})",
                profile.login.address,
                config.variant.as_str()
            );
            LoadState::Loaded(profile.url)
        }
        Err(e) => {
            log::warn!("Failed to generate dclogin profile: {}", e);
            LoadState::NotLoaded
        }
    }
}
