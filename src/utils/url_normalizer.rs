//! URL canonicalization and redirection-target rewriting.
//!
//! The [`url`] crate only decides whether the input is a valid absolute URL.
//! Output is reassembled from the input's own text, so nothing the rules do not
//! mention is rewritten: host case, punycode, default ports and `.`/`..`
//! segments all pass through as written.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

/// Host every redirection-form URL points at.
pub const REDIRECTION_HOST: &str = "www.byfood.com";

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("URL has no host: {0}")]
    MissingHost(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

/// Transformation applied by [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlOperation {
    /// Query removed, single trailing slash trimmed.
    Canonical,
    /// Host replaced with [`REDIRECTION_HOST`], whole string lower-cased.
    Redirection,
    /// `Canonical` followed by `Redirection`.
    All,
}

impl UrlOperation {
    pub const VARIANTS: [UrlOperation; 3] = [Self::Canonical, Self::Redirection, Self::All];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Canonical => "canonical",
            Self::Redirection => "redirection",
            Self::All => "all",
        }
    }
}

impl fmt::Display for UrlOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UrlOperation {
    type Err = UrlError;

    /// Accepts exactly the three lowercase literals.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "canonical" => Ok(Self::Canonical),
            "redirection" => Ok(Self::Redirection),
            "all" => Ok(Self::All),
            other => Err(UrlError::InvalidOperation(other.to_string())),
        }
    }
}

/// Absolute URL split into its textual components, as written.
#[derive(Debug, Clone, PartialEq, Eq)]
struct UrlParts {
    scheme: String,
    userinfo: Option<String>,
    host: String,
    port: Option<String>,
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

impl UrlParts {
    /// Validates `input` with [`Url::parse`], then splits the input text itself
    /// so host case, explicit ports and dot segments survive untouched.
    fn parse(input: &str) -> Result<Self, UrlError> {
        let url = Url::parse(input).map_err(|e| UrlError::InvalidFormat(e.to_string()))?;
        let missing_host = || UrlError::MissingHost(input.to_string());

        if url.host_str().filter(|h| !h.is_empty()).is_none() {
            return Err(missing_host());
        }

        let text = input.trim_matches(|c: char| c.is_ascii_whitespace() || c.is_ascii_control());
        let (scheme, rest) = text.split_once(':').ok_or_else(missing_host)?;
        let rest = rest.strip_prefix("//").ok_or_else(missing_host)?;

        let (rest, fragment) = match rest.split_once('#') {
            Some((before, fragment)) => (before, Some(fragment.to_string())),
            None => (rest, None),
        };
        let (rest, query) = match rest.split_once('?') {
            Some((before, query)) => (before, Some(query.to_string())),
            None => (rest, None),
        };
        let (authority, path) = rest.split_at(rest.find('/').unwrap_or(rest.len()));

        let (userinfo, host_port) = match authority.rsplit_once('@') {
            Some((userinfo, host_port)) => (Some(userinfo.to_string()), host_port),
            None => (None, authority),
        };
        let (host, port) = split_port(host_port);
        if host.is_empty() {
            return Err(missing_host());
        }

        Ok(Self {
            scheme: scheme.to_string(),
            userinfo,
            host: host.to_string(),
            port: port.map(str::to_string),
            path: path.to_string(),
            query,
            fragment,
        })
    }

    fn canonical(mut self) -> Self {
        self.query = None;
        if self.path.ends_with('/') {
            self.path.pop();
        }
        self
    }

    fn redirection(mut self) -> Self {
        self.host = REDIRECTION_HOST.to_string();
        self.port = None;
        self
    }
}

impl fmt::Display for UrlParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://", self.scheme)?;
        if let Some(userinfo) = &self.userinfo {
            write!(f, "{userinfo}@")?;
        }
        f.write_str(&self.host)?;
        if let Some(port) = &self.port {
            write!(f, ":{port}")?;
        }
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

/// Splits `host[:port]`, leaving bracketed IPv6 literals intact.
fn split_port(host_port: &str) -> (&str, Option<&str>) {
    let from = host_port.rfind(']').unwrap_or(0);
    match host_port[from..].rfind(':') {
        Some(i) => (&host_port[..from + i], Some(&host_port[from + i + 1..])),
        None => (host_port, None),
    }
}

/// Rewrites `input` according to `operation`.
///
/// # Rules
///
/// - **canonical**: query dropped, one trailing `/` trimmed from the path
///   (a bare `/` path becomes empty). Scheme, host and fragment are kept.
/// - **redirection**: host (and any explicit port) replaced with
///   [`REDIRECTION_HOST`]; the *entire* output is lower-cased, path included.
/// - **all**: canonical, then redirection on the canonical components.
///
/// Components are taken verbatim from `input`, so canonical output of
/// `https://Example.COM:443/a/../B/` is `https://Example.COM:443/a/../B`.
///
/// # Errors
///
/// Returns [`UrlError::InvalidFormat`] for strings that are not absolute URLs
/// and [`UrlError::MissingHost`] for URLs without a host (`mailto:`, `data:`).
///
/// # Examples
///
/// ```
/// use library_backend::utils::url_normalizer::{normalize, UrlOperation};
///
/// assert_eq!(
///     normalize("https://example.com/path/?q=1", UrlOperation::Canonical).unwrap(),
///     "https://example.com/path"
/// );
/// assert_eq!(
///     normalize("HTTP://Example.com/Path", UrlOperation::Redirection).unwrap(),
///     "http://www.byfood.com/path"
/// );
/// ```
pub fn normalize(input: &str, operation: UrlOperation) -> Result<String, UrlError> {
    let parts = UrlParts::parse(input)?;

    let processed = match operation {
        UrlOperation::Canonical => parts.canonical().to_string(),
        UrlOperation::Redirection => parts.redirection().to_string().to_lowercase(),
        UrlOperation::All => parts.canonical().redirection().to_string().to_lowercase(),
    };

    Ok(processed)
}
