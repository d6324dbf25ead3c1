//! Error types for launch verification.
//!
//! A signature mismatch is NOT represented here: [`crate::verify_signature`]
//! returns `Ok(false)` for a well-formed request whose signature does not
//! match. Errors are reserved for requests that cannot be verified at all.

/// Errors that can occur while preparing a launch request for verification.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No candidate source (POST body, `Authorization` header, GET params)
    /// holds a complete, valid OAuth parameter set.
    #[error("could not locate OAuth fields")]
    OAuthFieldsNotFound,

    /// The request URL is not an absolute URI a base string can be built
    /// from (missing scheme or authority, or unparsable).
    #[error("invalid request URL: {0}")]
    InvalidRequestUrl(String),
}
