use url::{Host, Url};

/// Extract the host component of `url`, lowercased.
///
/// Returns `None` when the input is not an absolute URL or has no authority
/// (e.g. `"not a url"`, `"mailto:someone@example.com"`, `"file:///tmp/x"`).
pub fn extract_host(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?;
    if host.is_empty() {
        return None;
    }
    Some(host.to_ascii_lowercase())
}

/// Normalise a bare hostname the way the registry stores it.
///
/// Domains go through the same IDNA mapping as URL parsing, so the result
/// matches what [`extract_host`] yields for that host. Input `Host::parse`
/// rejects (e.g. `host:port`) is only lowercased.
pub(crate) fn normalize_host(host: &str) -> String {
    let host = host.trim();
    match Host::parse(host) {
        Ok(parsed) => parsed.to_string(),
        Err(_) => host.to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_host_from_http_urls() {
        assert_eq!(extract_host("http://bit.ly/abc").as_deref(), Some("bit.ly"));
        assert_eq!(
            extract_host("https://Example.COM:8443/path?q=1").as_deref(),
            Some("example.com")
        );
    }

    #[test]
    fn extracts_ip_hosts() {
        assert_eq!(
            extract_host("http://127.0.0.1:8080/").as_deref(),
            Some("127.0.0.1")
        );
        assert_eq!(extract_host("http://[::1]/").as_deref(), Some("[::1]"));
    }

    #[test]
    fn no_host_for_malformed_or_authorityless_input() {
        assert!(extract_host("not a url").is_none());
        assert!(extract_host("bit.ly/abc").is_none());
        assert!(extract_host("mailto:someone@example.com").is_none());
        assert!(extract_host("file:///tmp/x").is_none());
        assert!(extract_host("").is_none());
    }

    #[test]
    fn normalize_host_lowercases_and_trims() {
        assert_eq!(normalize_host("  Bit.LY "), "bit.ly");
    }

    #[test]
    fn normalize_host_matches_extracted_host_for_idn() {
        for host in ["BÜCHER.de", "bücher.de", "xn--bcher-kva.de"] {
            assert_eq!(normalize_host(host), "xn--bcher-kva.de");
            assert_eq!(
                extract_host(&format!("http://{host}/x")).as_deref(),
                Some("xn--bcher-kva.de")
            );
        }
    }

    #[test]
    fn normalize_host_keeps_ip_literals() {
        assert_eq!(normalize_host("127.0.0.1"), "127.0.0.1");
        assert_eq!(normalize_host("[::1]"), "[::1]");
        assert_eq!(normalize_host("Example.COM:8080"), "example.com:8080");
    }
}
