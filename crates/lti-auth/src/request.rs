//! Launch request description.
//!
//! Transport-level parsing is out of scope for this crate: by the time a
//! request reaches verification, the hosting framework has already decoded
//! headers and parameters into plain maps. [`LaunchRequest`] is that decoded
//! form.

use std::collections::HashMap;

/// A header value as handed over by the hosting framework.
///
/// Some frameworks pass the raw header line through; others pre-split the
/// `Authorization` header into `key=value` elements and percent-decode them
/// on the way.
#[derive(Debug, Clone)]
pub enum HeaderValue {
    /// The unparsed header line.
    Raw(String),
    /// Already-parsed `key=value` elements, percent-decoded upstream.
    Split(Vec<String>),
}

/// An inbound LTI launch request, immutable for the duration of a
/// verification call.
///
/// The same parameter name may legally appear in both `get_params` and
/// `post_params` with different values; both entries contribute to the
/// signed parameter collection independently.
#[derive(Debug, Clone, Default)]
pub struct LaunchRequest {
    /// HTTP method.
    pub method: String,
    /// Absolute request URL including the scheme and, for non-default
    /// ports, the port. A query string, if present, is ignored when the
    /// base URI is built.
    pub url: String,
    /// Request headers.
    pub headers: HashMap<String, HeaderValue>,
    /// Decoded GET parameters.
    pub get_params: HashMap<String, String>,
    /// Decoded POST body parameters.
    pub post_params: HashMap<String, String>,
}
