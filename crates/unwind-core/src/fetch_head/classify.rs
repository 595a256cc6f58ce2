//! Classify transport failures for logging.

use super::TransportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Timeout,
    Connection,
    InvalidUrl,
    TooManyRedirects,
    Other,
}

/// Classify a curl error.
fn classify_curl_error(e: &curl::Error) -> FailureKind {
    if e.is_operation_timedout() {
        return FailureKind::Timeout;
    }
    if e.is_too_many_redirects() {
        return FailureKind::TooManyRedirects;
    }
    if e.is_url_malformed() || e.is_unsupported_protocol() {
        return FailureKind::InvalidUrl;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_ssl_connect_error()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return FailureKind::Connection;
    }
    FailureKind::Other
}

/// Classify any transport error into a FailureKind.
pub fn classify_failure(e: &TransportError) -> FailureKind {
    match e {
        TransportError::Curl(ce) => classify_curl_error(ce),
        TransportError::InvalidEffectiveUrl(_) => FailureKind::InvalidUrl,
        TransportError::MissingEffectiveUrl => FailureKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // CURLE_* codes from curl.h.
    const OPERATION_TIMEDOUT: i32 = 28;
    const COULDNT_CONNECT: i32 = 7;
    const COULDNT_RESOLVE_HOST: i32 = 6;
    const URL_MALFORMAT: i32 = 3;
    const TOO_MANY_REDIRECTS: i32 = 47;
    const WRITE_ERROR: i32 = 23;

    fn curl(code: i32) -> TransportError {
        TransportError::Curl(curl::Error::new(code as _))
    }

    #[test]
    fn timeouts() {
        assert_eq!(classify_failure(&curl(OPERATION_TIMEDOUT)), FailureKind::Timeout);
    }

    #[test]
    fn connection_failures() {
        assert_eq!(classify_failure(&curl(COULDNT_CONNECT)), FailureKind::Connection);
        assert_eq!(
            classify_failure(&curl(COULDNT_RESOLVE_HOST)),
            FailureKind::Connection
        );
    }

    #[test]
    fn bad_urls_and_redirect_loops() {
        assert_eq!(classify_failure(&curl(URL_MALFORMAT)), FailureKind::InvalidUrl);
        assert_eq!(
            classify_failure(&curl(TOO_MANY_REDIRECTS)),
            FailureKind::TooManyRedirects
        );
        assert_eq!(
            classify_failure(&TransportError::InvalidEffectiveUrl(
                url::ParseError::EmptyHost
            )),
            FailureKind::InvalidUrl
        );
    }

    #[test]
    fn everything_else() {
        assert_eq!(classify_failure(&curl(WRITE_ERROR)), FailureKind::Other);
        assert_eq!(
            classify_failure(&TransportError::MissingEffectiveUrl),
            FailureKind::Other
        );
    }
}
