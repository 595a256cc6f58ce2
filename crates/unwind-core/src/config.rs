use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// HEAD transport parameters (optional `[http]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Seconds allowed for the TCP/TLS connect phase.
    pub connect_timeout_secs: u64,
    /// Seconds allowed for the whole request, redirects included.
    pub timeout_secs: u64,
    /// Maximum redirect hops the transport will follow before giving up.
    pub max_redirects: u32,
    /// `User-Agent` header sent with every probe.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 3,
            timeout_secs: 8,
            max_redirects: 10,
            user_agent: concat!("unwind/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// libcurl reads a zero timeout as "no timeout", so zero is rejected.
    pub fn validate(&self) -> Result<()> {
        if self.connect_timeout_secs == 0 {
            bail!("http.connect_timeout_secs must be at least 1");
        }
        if self.timeout_secs == 0 {
            bail!("http.timeout_secs must be at least 1");
        }
        Ok(())
    }
}

/// Adjustments to the built-in shortener list (optional `[shorteners]` section).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortenerConfig {
    /// Seed the registry with the built-in list before applying `extra`/`removed`.
    pub include_defaults: bool,
    /// Additional shortener hosts.
    pub extra: Vec<String>,
    /// Hosts to drop from the registry after seeding.
    pub removed: Vec<String>,
}

impl Default for ShortenerConfig {
    fn default() -> Self {
        Self {
            include_defaults: true,
            extra: Vec::new(),
            removed: Vec::new(),
        }
    }
}

/// Global configuration loaded from `~/.config/unwind/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnwindConfig {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub shorteners: ShortenerConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("unwind")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<UnwindConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = UnwindConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit path; the file must exist.
pub fn load_from(path: &Path) -> Result<UnwindConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: UnwindConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    cfg.http
        .validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
