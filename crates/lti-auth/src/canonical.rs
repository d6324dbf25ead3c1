//! Signature base string construction for OAuth 1.0a.
//!
//! RFC 5849 derives a deterministic "signature base string" from the
//! request:
//!
//! ```text
//! METHOD & percent_encode(base_uri) & percent_encode(normalized_params)
//! ```
//!
//! Each component is normalized exactly as RFC 5849 prescribes so that the
//! launching platform and the tool provider arrive at the same bytes.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::error::AuthError;

/// The characters that survive percent-encoding: the RFC 3986 unreserved
/// set (`A-Z a-z 0-9 - . _ ~`).
///
/// Everything else is encoded as uppercase `%XX`, `/` included. Space
/// encodes to `%20`, never `+`.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode `input` per RFC 5849 §3.6.
///
/// # Examples
///
/// ```
/// use lti_auth::canonical::percent_encode;
///
/// assert_eq!(percent_encode("/"), "%2F");
/// assert_eq!(percent_encode(" "), "%20");
/// assert_eq!(percent_encode("~"), "~");
/// ```
#[must_use]
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, OAUTH_ENCODE_SET).to_string()
}

/// Normalize the request URL into the base string URI.
///
/// The scheme and authority are lower-cased (a non-default port stays as
/// written), the path keeps its case, and any query string or fragment is
/// dropped.
///
/// # Examples
///
/// ```
/// use lti_auth::canonical::normalize_base_uri;
///
/// assert_eq!(
///     normalize_base_uri("HTTP://Example.COM:8080/Path?q=1").unwrap(),
///     "http://example.com:8080/Path"
/// );
/// ```
///
/// # Errors
///
/// Returns [`AuthError::InvalidRequestUrl`] when the URL is not an absolute
/// URI.
pub fn normalize_base_uri(url: &str) -> Result<String, AuthError> {
    // `http::Uri` is a request-target type and has no fragment support.
    let without_fragment = url.split_once('#').map_or(url, |(base, _)| base);
    let uri: http::Uri = without_fragment
        .parse()
        .map_err(|_| AuthError::InvalidRequestUrl(url.to_owned()))?;

    let scheme = uri
        .scheme_str()
        .ok_or_else(|| AuthError::InvalidRequestUrl(url.to_owned()))?;
    let authority = uri
        .authority()
        .ok_or_else(|| AuthError::InvalidRequestUrl(url.to_owned()))?;

    Ok(format!(
        "{}://{}{}",
        scheme.to_lowercase(),
        authority.as_str().to_lowercase(),
        uri.path()
    ))
}

/// Build the normalized parameter string.
///
/// Every name and value is percent-encoded independently, pairs are sorted
/// by encoded name and then encoded value (byte order, so duplicate names
/// from different sources stay in a deterministic order), and joined as
/// `name=value` with `&`.
#[must_use]
pub fn build_parameter_string(params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(name, value)| (percent_encode(name), percent_encode(value)))
        .collect();
    encoded.sort_unstable();

    encoded
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the full signature base string.
///
/// `params` is the signed parameter collection with `oauth_signature`
/// already excluded. The three components are joined with literal `&`; only
/// the components themselves are encoded.
///
/// # Errors
///
/// Returns [`AuthError::InvalidRequestUrl`] when `url` cannot be
/// normalized.
pub fn build_signature_base_string(
    method: &str,
    url: &str,
    params: &[(String, String)],
) -> Result<String, AuthError> {
    let method = percent_encode(&method.to_uppercase());
    let base_uri = normalize_base_uri(url)?;
    let param_string = build_parameter_string(params);

    Ok(format!(
        "{method}&{}&{}",
        percent_encode(&base_uri),
        percent_encode(&param_string)
    ))
}
