//! Redirect resolution for possibly-shortened URLs.
//!
//! Known shortener hosts are answered from the [`ShortenerRegistry`] without
//! any I/O. Everything else goes through one HEAD request on the configured
//! [`HeadTransport`]. A transport failure is never an error here: it becomes
//! an "unknown" answer, distinct from "not redirected".

use std::fmt;
use std::sync::Arc;

use url::Url;

use crate::config::UnwindConfig;
use crate::error::{require_url, Result, UnwindError};
use crate::fetch_head::{classify_failure, CurlTransport, HeadTransport};
use crate::registry::ShortenerRegistry;

/// Tri-state answer to "does this URL redirect?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    Redirected,
    NotRedirected,
    /// The transport produced no response, so the answer is not known.
    Unknown,
}

impl Redirect {
    /// `Some(bool)` when determined, `None` when unknown.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Redirect::Redirected => Some(true),
            Redirect::NotRedirected => Some(false),
            Redirect::Unknown => None,
        }
    }
}

impl From<bool> for Redirect {
    fn from(redirected: bool) -> Self {
        if redirected {
            Redirect::Redirected
        } else {
            Redirect::NotRedirected
        }
    }
}

impl fmt::Display for Redirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Redirect::Redirected => write!(f, "true"),
            Redirect::NotRedirected => write!(f, "false"),
            Redirect::Unknown => write!(f, "unknown"),
        }
    }
}

/// Result of one HEAD probe.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Probe {
    NoResponse,
    Response { redirected: bool, final_url: Url },
}

/// Operations for unwinding shortened URLs.
pub trait UnwindService {
    /// Offline check against the shortener registry.
    fn is_major_shortener(&self, url: &str) -> Result<bool>;

    /// Whether `url` redirects. Known shorteners answer `Redirected` without
    /// network access; an unreachable target answers `Unknown`.
    fn is_redirected_url(&self, url: &str) -> Result<Redirect>;

    /// Final destination as a parsed URL. Fails with
    /// [`UnwindError::UriSyntax`] when `url` itself does not parse; that check
    /// runs before any request is made.
    /// `None` when the target could not be reached.
    fn final_uri(&self, url: &str) -> Result<Option<Url>>;

    /// Final destination as a string. Input is not validated beyond being
    /// non-blank; without a redirect it is echoed back verbatim.
    /// `None` when the target could not be reached.
    fn final_url(&self, url: &str) -> Result<Option<String>>;
}

/// [`UnwindService`] over a shared registry and a HEAD transport.
pub struct Unwinder<T = CurlTransport> {
    registry: Arc<ShortenerRegistry>,
    transport: T,
}

impl Unwinder<CurlTransport> {
    /// Build from config: registry from `[shorteners]`, curl transport from `[http]`.
    pub fn from_config(cfg: &UnwindConfig) -> Self {
        Self::new(
            Arc::new(ShortenerRegistry::from_config(&cfg.shorteners)),
            CurlTransport::new(&cfg.http),
        )
    }
}

impl<T: HeadTransport> Unwinder<T> {
    pub fn new(registry: Arc<ShortenerRegistry>, transport: T) -> Self {
        Self {
            registry,
            transport,
        }
    }

    pub fn registry(&self) -> &Arc<ShortenerRegistry> {
        &self.registry
    }

    /// Issue a single HEAD request. Every transport failure ends up as
    /// `Probe::NoResponse`; this is the only place errors are swallowed.
    fn probe(&self, url: &str) -> Result<Probe> {
        require_url(url)?;
        tracing::debug!(url, "HEAD probe");
        match self.transport.head(url) {
            Ok(resp) => {
                let redirected = resp.has_redirects();
                tracing::debug!(
                    url,
                    status = resp.status,
                    redirects = resp.redirect_count,
                    final_url = %resp.final_url,
                    "HEAD probe answered"
                );
                Ok(Probe::Response {
                    redirected,
                    final_url: resp.final_url,
                })
            }
            Err(err) => {
                tracing::debug!(
                    url,
                    kind = ?classify_failure(&err),
                    error = %err,
                    "HEAD probe got no response"
                );
                Ok(Probe::NoResponse)
            }
        }
    }
}

impl<T: HeadTransport> UnwindService for Unwinder<T> {
    fn is_major_shortener(&self, url: &str) -> Result<bool> {
        self.registry.is_major_shortener(url)
    }

    fn is_redirected_url(&self, url: &str) -> Result<Redirect> {
        require_url(url)?;

        if self.registry.is_major_shortener(url)? {
            tracing::trace!(url, "known shortener, skipping probe");
            return Ok(Redirect::Redirected);
        }

        Ok(match self.probe(url)? {
            Probe::NoResponse => Redirect::Unknown,
            Probe::Response { redirected, .. } => Redirect::from(redirected),
        })
    }

    fn final_uri(&self, url: &str) -> Result<Option<Url>> {
        require_url(url)?;
        let parsed = Url::parse(url).map_err(|source| UnwindError::UriSyntax {
            url: url.to_string(),
            source,
        })?;

        Ok(match self.probe(url)? {
            Probe::NoResponse => None,
            Probe::Response {
                redirected: false, ..
            } => Some(parsed),
            Probe::Response { final_url, .. } => Some(final_url),
        })
    }

    fn final_url(&self, url: &str) -> Result<Option<String>> {
        require_url(url)?;

        Ok(match self.probe(url)? {
            Probe::NoResponse => None,
            Probe::Response {
                redirected: false, ..
            } => Some(url.to_string()),
            Probe::Response { final_url, .. } => Some(final_url.into()),
        })
    }
}
