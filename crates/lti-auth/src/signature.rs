//! OAuth 1.0a HMAC-SHA1 signature verification.
//!
//! The verification flow:
//!
//! 1. Locate the OAuth parameter set (POST body, `Authorization` header, or
//!    GET params).
//! 2. Collect the signed parameter set and build the signature base string
//!    from the method, normalized URL, and parameters.
//! 3. Derive the signing key from the consumer and token secrets.
//! 4. Compute `Base64(HMAC-SHA1(key, base string))` and compare it to the
//!    supplied `oauth_signature`.
//!
//! The main entry point is [`verify_signature`].

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, KeyInit, Mac};
use sha1::Sha1;
use tracing::debug;

use crate::canonical::{build_signature_base_string, percent_encode};
use crate::error::AuthError;
use crate::params::OAuthParams;
use crate::request::LaunchRequest;
use crate::store::SecretStore;

type HmacSha1 = Hmac<Sha1>;

/// Verify the OAuth 1.0a signature on a launch request.
///
/// Returns `Ok(false)` for a well-formed request whose signature does not
/// match: a mismatch is the expected negative outcome, not an error.
/// Repeated calls on the same request and store return the same verdict.
///
/// # Errors
///
/// Returns [`AuthError::OAuthFieldsNotFound`] when no source holds a valid
/// OAuth parameter set, or [`AuthError::InvalidRequestUrl`] when the
/// request URL cannot be parsed.
pub fn verify_signature(
    request: &LaunchRequest,
    store: &dyn SecretStore,
) -> Result<bool, AuthError> {
    let oauth = OAuthParams::locate(&request.headers, &request.get_params, &request.post_params)?;

    let params = collect_signed_params(request, &oauth);
    let base_string = build_signature_base_string(&request.method, &request.url, &params)?;

    debug!(base_string, "built signature base string");

    let consumer_secret = store.get_secret(oauth.consumer_key());
    let token_secret = store.get_secret(oauth.token_key());
    let signing_key = format!(
        "{}&{}",
        percent_encode(&consumer_secret),
        percent_encode(&token_secret)
    );

    let expected = compute_signature(&signing_key, &base_string);

    if expected == oauth.signature() {
        debug!(consumer_key = %oauth.consumer_key(), "signature verification succeeded");
        Ok(true)
    } else {
        debug!(
            expected = %expected,
            provided = %oauth.signature(),
            "signature mismatch"
        );
        Ok(false)
    }
}

/// Gather every parameter that participates in the base string.
///
/// GET and POST entries always participate. The OAuth parameter set itself
/// is added only when it was carried in the `Authorization` header; when it
/// came from GET or POST it is already in that collection and must not be
/// added twice. `oauth_signature` never participates, whichever source it
/// came from.
fn collect_signed_params(request: &LaunchRequest, oauth: &OAuthParams) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = Vec::new();

    for (name, value) in request.get_params.iter().chain(&request.post_params) {
        if name == "oauth_signature" {
            continue;
        }
        params.push((name.clone(), value.clone()));
    }

    if oauth.found_in_header() {
        for (name, value) in oauth.params() {
            if name == "oauth_signature" {
                continue;
            }
            params.push((name.clone(), value.to_string()));
        }
    }

    params
}

/// Compute `Base64(HMAC-SHA1(signing_key, data))`.
#[must_use]
pub fn compute_signature(signing_key: &str, data: &str) -> String {
    let mut mac = HmacSha1::new_from_slice(signing_key.as_bytes())
        .expect("HMAC can accept any key length");
    mac.update(data.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}
