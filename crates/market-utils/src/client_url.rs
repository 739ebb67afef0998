use url::Url;

/// The only host allowed to complete the exchange's OAuth flow.
pub const CLIENT_URL_HOST: &str = "accounts.binance.com";

/// Checks that `url` is the exchange's OAuth authorize page:
/// `https://accounts.binance.com/<locale>/oauth/authorize`.
///
/// Query strings and fragments are allowed; explicit non-default ports, extra
/// path levels and a missing locale are not. Never panics.
pub fn is_valid_client_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!(error = %e, "client URL did not parse");
            return false;
        }
    };

    if parsed.scheme() != "https" {
        return false;
    }

    if parsed.host_str() != Some(CLIENT_URL_HOST) || parsed.port().is_some() {
        return false;
    }

    // ["", locale, "oauth", "authorize"]
    let segments: Vec<&str> = parsed.path().split('/').collect();
    segments.len() == 4 && segments[2] == "oauth" && segments[3] == "authorize"
}
