//! CLI for expanding shortened URLs.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use unwind_core::config::{self, UnwindConfig};
use unwind_core::Unwinder;

use commands::{run_check, run_expand, run_redirected, run_shorteners};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "unwind")]
#[command(about = "unwind: expand shortened URLs to their final destination", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,

    /// Read config from this file instead of ~/.config/unwind/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Treat this host as a shortener (repeatable).
    #[arg(long = "add-shortener", global = true, value_name = "HOST")]
    pub add_shorteners: Vec<String>,

    /// Do not treat this host as a shortener (repeatable).
    #[arg(long = "remove-shortener", global = true, value_name = "HOST")]
    pub remove_shorteners: Vec<String>,

    /// Total request timeout in seconds (overrides config).
    #[arg(
        long,
        global = true,
        value_name = "SECS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: Option<u64>,

    /// More detailed logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Check offline whether the URL's host is a known shortener.
    Check {
        url: String,
    },

    /// Probe whether the URL redirects: prints true, false or unknown.
    Redirected {
        url: String,
    },

    /// Print the final destination of the URL, or "unknown" if unreachable.
    Expand {
        url: String,

        /// Reject input that is not a valid absolute URL.
        #[arg(long)]
        strict: bool,
    },

    /// List the known shortener hosts.
    Shorteners,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let cfg = self.load_config()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let unwinder = Arc::new(Unwinder::from_config(&cfg));

        match self.command {
            CliCommand::Check { url } => run_check(&unwinder, &url)?,
            CliCommand::Redirected { url } => run_redirected(unwinder, url).await?,
            CliCommand::Expand { url, strict } => run_expand(unwinder, url, strict).await?,
            CliCommand::Shorteners => run_shorteners(unwinder.registry()),
        }

        Ok(())
    }

    fn load_config(&self) -> Result<UnwindConfig> {
        let mut cfg = match &self.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        self.apply_overrides(&mut cfg);
        Ok(cfg)
    }

    /// Command-line flags win over the config file.
    fn apply_overrides(&self, cfg: &mut UnwindConfig) {
        cfg.shorteners
            .extra
            .extend(self.add_shorteners.iter().cloned());
        cfg.shorteners
            .removed
            .extend(self.remove_shorteners.iter().cloned());
        if let Some(secs) = self.timeout {
            cfg.http.timeout_secs = secs;
            cfg.http.connect_timeout_secs = cfg.http.connect_timeout_secs.min(secs);
        }
    }
}

#[cfg(test)]
mod tests;
