//! Logging init: append to a file under the XDG state dir, falling back to stderr.

use anyhow::{anyhow, Context, Result};
use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,unwind=debug,unwind_core=debug";
const VERBOSE_FILTER: &str = "debug,unwind=trace,unwind_core=trace";

/// Log file handle, or stderr when the handle cannot be cloned.
enum LogSink {
    File(File),
    Stderr,
}

impl io::Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogSink::File(f) => f.write(buf),
            LogSink::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogSink::File(f) => f.flush(),
            LogSink::Stderr => io::stderr().lock().flush(),
        }
    }
}

struct SharedLogFile(File);

impl<'a> MakeWriter<'a> for SharedLogFile {
    type Writer = LogSink;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(LogSink::File)
            .unwrap_or(LogSink::Stderr)
    }
}

/// `RUST_LOG` wins; otherwise the built-in default (or the verbose one).
fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER })
    })
}

/// `~/.local/state/unwind/unwind.log`.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("unwind")?;
    Ok(xdg_dirs.get_state_home().join("unwind.log"))
}

/// Initialize structured logging to [`log_file_path`].
/// Returns Err (without installing anything) when the file cannot be opened.
pub fn init_logging(verbose: bool) -> Result<PathBuf> {
    let path = log_file_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(BoxMakeWriter::new(SharedLogFile(file)))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("install log subscriber: {e}"))?;

    tracing::info!("unwind logging initialized at {}", path.display());
    Ok(path)
}

/// Initialize logging to stderr only.
pub fn init_logging_stderr(verbose: bool) {
    // Ignore "already installed": a second init is a no-op.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}

/// File logging, or stderr if that fails. Never fails itself.
pub fn init(verbose: bool) {
    if let Err(err) = init_logging(verbose) {
        init_logging_stderr(verbose);
        tracing::warn!("file logging unavailable, using stderr: {err:#}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_lives_under_unwind_state_dir() {
        let path = log_file_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "unwind.log");
        assert!(path.parent().unwrap().ends_with("unwind"));
    }

    #[test]
    fn stderr_init_twice_is_harmless() {
        init_logging_stderr(false);
        init_logging_stderr(true);
        tracing::debug!("still alive");
    }
}
