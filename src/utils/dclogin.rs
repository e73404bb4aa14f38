//! `dclogin:` activation URLs
//!
//! A chatmail relay hands out credentials as a single URL of the form
//! `dclogin:<address>?p=<password>&v=1&ic=3`. Address and password are
//! percent-encoded; `ic=3` tells the client to accept the relay's
//! self-signed certificate.

use std::fmt;
use url::Url;

pub const SCHEME: &str = "dclogin";

/// `ic=3`: accept invalid certificates
const CERT_CHECKS_ACCEPT_INVALID: u32 = 3;

/// Error type for dclogin URL handling
#[derive(Debug, Clone, PartialEq)]
pub enum DcLoginError {
    Malformed(String),
    WrongScheme(String),
    MissingAddress,
    InvalidEncoding(String),
}

impl fmt::Display for DcLoginError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DcLoginError::Malformed(e) => write!(f, "Malformed dclogin URL: {}", e),
            DcLoginError::WrongScheme(s) => write!(f, "Expected dclogin: scheme, got {}:", s),
            DcLoginError::MissingAddress => write!(f, "dclogin URL has no address"),
            DcLoginError::InvalidEncoding(e) => write!(f, "Invalid percent-encoding: {}", e),
        }
    }
}

impl std::error::Error for DcLoginError {}

/// Decoded activation URL
#[derive(Debug, Clone, PartialEq)]
pub struct DcLogin {
    pub address: String,
    pub password: Option<String>,
    pub version: Option<u32>,
    pub certificate_checks: Option<u32>,
}

impl DcLogin {
    /// Parse a `dclogin:` URL
    ///
    /// Accepts both the opaque form `dclogin:user%40host?p=...` and the
    /// authority form `dclogin://host`.
    pub fn parse(input: &str) -> Result<Self, DcLoginError> {
        let url = Url::parse(input.trim()).map_err(|e| DcLoginError::Malformed(e.to_string()))?;

        if url.scheme() != SCHEME {
            return Err(DcLoginError::WrongScheme(url.scheme().to_string()));
        }

        let address = match url.host_str() {
            Some(host) if !url.username().is_empty() => {
                format!("{}@{}", decode(url.username())?, host)
            }
            Some(host) => host.to_string(),
            None => decode(url.path())?,
        };

        if address.is_empty() {
            return Err(DcLoginError::MissingAddress);
        }

        let mut login = DcLogin {
            address,
            password: None,
            version: None,
            certificate_checks: None,
        };

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "p" => login.password = Some(value.into_owned()),
                "v" => login.version = value.parse().ok(),
                "ic" => login.certificate_checks = value.parse().ok(),
                _ => {}
            }
        }

        Ok(login)
    }

    /// Whether the URL asks the client to skip certificate validation
    pub fn accepts_invalid_certificates(&self) -> bool {
        self.certificate_checks == Some(CERT_CHECKS_ACCEPT_INVALID)
    }

    /// Mailbox domain, i.e. the part after the last `@`
    pub fn domain(&self) -> Option<&str> {
        self.address.rsplit_once('@').map(|(_, domain)| domain)
    }
}

impl fmt::Display for DcLogin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", SCHEME, urlencoding::encode(&self.address))?;

        let mut params = Vec::new();
        if let Some(password) = &self.password {
            params.push(format!("p={}", urlencoding::encode(password)));
        }
        if let Some(v) = self.version {
            params.push(format!("v={}", v));
        }
        if let Some(ic) = self.certificate_checks {
            params.push(format!("ic={}", ic));
        }

        if !params.is_empty() {
            write!(f, "?{}", params.join("&"))?;
        }
        Ok(())
    }
}

fn decode(s: &str) -> Result<String, DcLoginError> {
    urlencoding::decode(s)
        .map(|c| c.into_owned())
        .map_err(|e| DcLoginError::InvalidEncoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Credentials as the relay issues them for a self-signed setup
    fn relay_login(address: &str, password: &str) -> DcLogin {
        DcLogin {
            address: address.to_string(),
            password: Some(password.to_string()),
            version: Some(1),
            certificate_checks: Some(3),
        }
    }

    #[test]
    fn test_build_encodes_reserved_characters() {
        let url = relay_login("user@example.org", "p@ss w+rd").to_string();
        assert!(url.starts_with("dclogin:"));
        assert!(url.contains("user%40example.org"));
        assert!(url.contains("p%40ss"));
        assert!(url.contains("w%2Brd"));
        assert!(url.contains("%20"));
        assert!(url.contains("v=1"));
        assert!(url.contains("ic=3"));
    }

    #[test]
    fn test_parse_relay_url() {
        let url = "dclogin:abc123%40chat.example.org?p=s3cr%2Bt%21&v=1&ic=3";
        let login = DcLogin::parse(url).unwrap();
        assert_eq!(login.address, "abc123@chat.example.org");
        assert_eq!(login.password.as_deref(), Some("s3cr+t!"));
        assert_eq!(login.version, Some(1));
        assert!(login.accepts_invalid_certificates());
        assert_eq!(login.domain(), Some("chat.example.org"));
    }

    #[test]
    fn test_parse_what_we_build() {
        let original = relay_login("user@example.org", "p@ss w+rd");
        let parsed = DcLogin::parse(&original.to_string()).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_parse_authority_form() {
        let login = DcLogin::parse("dclogin://example").unwrap();
        assert_eq!(login.address, "example");
        assert_eq!(login.password, None);
        assert!(!login.accepts_invalid_certificates());
    }

    #[test]
    fn test_parse_rejects_other_schemes() {
        assert!(matches!(
            DcLogin::parse("javascript:alert(1)"),
            Err(DcLoginError::WrongScheme(_))
        ));
        assert!(matches!(
            DcLogin::parse("https://example.org/"),
            Err(DcLoginError::WrongScheme(_))
        ));
        assert!(matches!(
            DcLogin::parse("not a url"),
            Err(DcLoginError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_requires_address() {
        assert_eq!(DcLogin::parse("dclogin:?p=x"), Err(DcLoginError::MissingAddress));
    }
}
