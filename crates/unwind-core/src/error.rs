//! Error types surfaced to callers of the registry and resolver.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, UnwindError>;

/// Validation failures. Transport failures never show up here; the resolver
/// turns them into an "unknown" result instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnwindError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("invalid URI {url:?}: {source}")]
    UriSyntax {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Returns true for empty or whitespace-only input.
pub(crate) fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Rejects blank URL input before any lookup or I/O happens.
pub(crate) fn require_url(url: &str) -> Result<()> {
    if is_blank(url) {
        return Err(UnwindError::InvalidArgument("URL cannot be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_detection() {
        assert!(is_blank(""));
        assert!(is_blank("   \t\n"));
        assert!(!is_blank(" x "));
    }

    #[test]
    fn require_url_rejects_blank() {
        assert_eq!(
            require_url(" "),
            Err(UnwindError::InvalidArgument("URL cannot be empty"))
        );
        assert!(require_url("http://example.com").is_ok());
    }

    #[test]
    fn uri_syntax_display_includes_input() {
        let err = UnwindError::UriSyntax {
            url: "nope".to_string(),
            source: url::ParseError::RelativeUrlWithoutBase,
        };
        let msg = err.to_string();
        assert!(msg.contains("\"nope\""));
        assert!(msg.contains("relative URL without a base"));
    }
}
