//! URL normalization for scraped attribute values.

use url::Url;

use crate::error::ExtractError;

fn has_http_scheme(raw: &str) -> bool {
    let lower = raw.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn invalid(value: &str, reason: impl ToString) -> ExtractError {
    ExtractError::InvalidUrl { value: value.to_string(), reason: reason.to_string() }
}

// Relative values are cut textually at the first `?` or `#`.
pub fn strip_query(raw: &str) -> Result<String, ExtractError> {
    let raw = raw.trim();
    if has_http_scheme(raw) {
        let mut url = Url::parse(raw).map_err(|e| invalid(raw, e))?;
        url.set_query(None);
        url.set_fragment(None);
        return Ok(url.to_string());
    }
    let end = raw.find(|c: char| c == '?' || c == '#').unwrap_or(raw.len());
    Ok(raw[..end].to_string())
}

/// Resolves `raw` against `base` unless it already carries an http(s) scheme.
/// Anything that ends up under another scheme (`data:`, `javascript:`, `ftp:`) is rejected.
pub fn absolutize(base: &Url, raw: &str) -> Result<String, ExtractError> {
    let raw = raw.trim();
    let url = if has_http_scheme(raw) {
        Url::parse(raw)
    } else {
        base.join(raw)
    }
    .map_err(|e| invalid(raw, e))?;

    match url.scheme() {
        "http" | "https" => Ok(url.into()),
        other => Err(invalid(raw, format!("unsupported scheme {other:?}"))),
    }
}
