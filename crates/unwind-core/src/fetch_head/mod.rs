//! HTTP HEAD probing.
//!
//! [`HeadTransport`] is the seam the resolver talks to. [`CurlTransport`] uses
//! the curl crate (libcurl) to issue a HEAD request, let libcurl follow any
//! redirects, and report how many hops it took and where it ended up.

mod classify;

use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::config::HttpConfig;

pub use classify::{classify_failure, FailureKind};

/// Outcome of a HEAD request that produced an HTTP response (any status).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadResponse {
    /// Status code of the last response in the redirect chain.
    pub status: u32,
    /// Number of redirects followed to reach `final_url`.
    pub redirect_count: u32,
    /// Effective URL after all redirects.
    pub final_url: Url,
}

impl HeadResponse {
    pub fn has_redirects(&self) -> bool {
        self.redirect_count > 0
    }
}

/// Failure to obtain any HTTP response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HEAD request failed: {0}")]
    Curl(#[from] curl::Error),
    #[error("transport did not report an effective URL")]
    MissingEffectiveUrl,
    #[error("effective URL is not valid: {0}")]
    InvalidEffectiveUrl(#[from] url::ParseError),
}

/// Anything that can issue a single HEAD request.
///
/// Implementations follow redirects themselves; callers only see the final
/// location and the hop count.
pub trait HeadTransport {
    fn head(&self, url: &str) -> Result<HeadResponse, TransportError>;
}

/// libcurl-backed transport. One Easy handle per request, no retries.
///
/// Blocks the current thread; call from `spawn_blocking` if used from async code.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    connect_timeout: Duration,
    timeout: Duration,
    max_redirects: u32,
    user_agent: String,
}

/// libcurl treats a zero timeout as unlimited.
const MIN_TIMEOUT: Duration = Duration::from_secs(1);

impl CurlTransport {
    pub fn new(cfg: &HttpConfig) -> Self {
        Self {
            connect_timeout: cfg.connect_timeout().max(MIN_TIMEOUT),
            timeout: cfg.timeout().max(MIN_TIMEOUT),
            max_redirects: cfg.max_redirects,
            user_agent: cfg.user_agent.clone(),
        }
    }
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self::new(&HttpConfig::default())
    }
}

impl HeadTransport for CurlTransport {
    fn head(&self, url: &str) -> Result<HeadResponse, TransportError> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.nobody(true)?; // HEAD request
        easy.follow_location(true)?;
        easy.max_redirections(self.max_redirects)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;
        easy.useragent(&self.user_agent)?;
        easy.perform()?;

        let status = easy.response_code()?;
        let redirect_count = easy.redirect_count()?;
        let effective = easy
            .effective_url()?
            .ok_or(TransportError::MissingEffectiveUrl)?;
        let final_url = Url::parse(effective)?;

        Ok(HeadResponse {
            status,
            redirect_count,
            final_url,
        })
    }
}
