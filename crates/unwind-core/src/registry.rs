//! Registry of hostnames known to be URL shorteners.
//!
//! Lookups are purely local: a URL whose host is in the registry is treated as
//! a redirect without touching the network. Each registry owns its own lock,
//! so independent instances never interfere with each other.

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::ShortenerConfig;
use crate::error::{is_blank, require_url, Result, UnwindError};
use crate::host::{extract_host, normalize_host};

/// Built-in seed list. `bit.ly` appears twice; the set keeps one copy.
pub const DEFAULT_SHORTENERS: &[&str] = &[
    "t.co",
    "bit.ly",
    "lnkd.in",
    "g.co",
    "goo.gl",
    "bit.ly",
    "is.gd",
    "u.to",
    "twitthis.com",
    "j.mp",
    "u.bb",
    "qr.net",
    "1url.com",
    "v.gd",
    "tr.im",
];

/// Mutable set of lowercase shortener hostnames (IDNs stored as punycode).
#[derive(Debug, Default)]
pub struct ShortenerRegistry {
    hosts: RwLock<HashSet<String>>,
}

impl ShortenerRegistry {
    /// Registry seeded with [`DEFAULT_SHORTENERS`].
    pub fn new() -> Self {
        Self::with_hosts(DEFAULT_SHORTENERS.iter().copied())
    }

    /// Registry with no hosts at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry holding exactly the given hosts (normalised; blanks skipped).
    pub fn with_hosts<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = hosts
            .into_iter()
            .filter(|h| !is_blank(h.as_ref()))
            .map(|h| normalize_host(h.as_ref()))
            .collect();
        Self {
            hosts: RwLock::new(set),
        }
    }

    /// Build a registry from the `[shorteners]` config section: defaults
    /// (unless disabled), plus `extra`, minus `removed`.
    pub fn from_config(cfg: &ShortenerConfig) -> Self {
        let registry = if cfg.include_defaults {
            Self::new()
        } else {
            Self::empty()
        };
        {
            let mut hosts = registry.write();
            for host in non_blank(&cfg.extra, "extra") {
                hosts.insert(normalize_host(host));
            }
            for host in non_blank(&cfg.removed, "removed") {
                hosts.remove(&normalize_host(host));
            }
        }
        tracing::debug!(hosts = registry.len(), "shortener registry built from config");
        registry
    }

    /// Add a shortener host. Fails on blank input.
    pub fn add_host(&self, host: &str) -> Result<()> {
        let host = require_host(host)?;
        self.write().insert(host);
        Ok(())
    }

    /// Remove a shortener host; absent hosts are ignored. Fails on blank input.
    pub fn remove_host(&self, host: &str) -> Result<()> {
        let host = require_host(host)?;
        self.write().remove(&host);
        Ok(())
    }

    /// Snapshot of the current hosts. Changes to the returned set do not
    /// affect the registry.
    pub fn hosts(&self) -> HashSet<String> {
        self.read().clone()
    }

    /// Membership check on a bare hostname (case-insensitive).
    pub fn contains_host(&self, host: &str) -> bool {
        self.read().contains(&normalize_host(host))
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// True iff the host of `url` is a known shortener. Never touches the
    /// network.
    ///
    /// Fails with [`UnwindError::InvalidArgument`] when `url` is blank or has
    /// no extractable host.
    pub fn is_major_shortener(&self, url: &str) -> Result<bool> {
        require_url(url)?;
        let host = extract_host(url)
            .ok_or(UnwindError::InvalidArgument("URL does not contain any valid host"))?;
        Ok(self.read().contains(&host))
    }

    // A panic while holding the lock cannot leave the set half-updated, so
    // poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, HashSet<String>> {
        self.hosts.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashSet<String>> {
        self.hosts.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Config entries with blanks skipped, each skip logged.
fn non_blank<'a>(entries: &'a [String], section: &'static str) -> impl Iterator<Item = &'a str> {
    entries.iter().map(String::as_str).filter(move |host| {
        if is_blank(host) {
            tracing::warn!(section, "ignoring blank shortener host in config");
            return false;
        }
        true
    })
}

fn require_host(host: &str) -> Result<String> {
    if is_blank(host) {
        return Err(UnwindError::InvalidArgument("host name cannot be empty"));
    }
    Ok(normalize_host(host))
}
