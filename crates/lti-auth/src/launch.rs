//! Basic LTI launch message checking.
//!
//! A basic LTI launch is an HMAC-SHA1 signed POST whose body carries the
//! launch message fields alongside the OAuth parameters. Launch
//! verification layers the message schema on top of the signature check: a
//! launch is accepted only when the signature matches AND the message
//! fields validate.

use lti_validate::{FieldRule, Record, Schema, Value};
use tracing::debug;

use crate::error::AuthError;
use crate::request::LaunchRequest;
use crate::signature::verify_signature;
use crate::store::SecretStore;

/// The basic LTI launch message schema.
///
/// `lti_message_type`, `lti_version`, and `resource_link_id` are required
/// by LTI v1. The remaining fields are recommended: consumers routinely
/// send them and tools degrade without them, so their absence warns but
/// never fails the launch.
#[must_use]
pub fn launch_schema() -> Schema {
    Schema::new([
        (
            "lti_message_type",
            FieldRule {
                required: true,
                allowed_values: vec!["basic-lti-launch-request".to_owned()],
                ..FieldRule::default()
            },
        ),
        (
            "lti_version",
            FieldRule {
                required: true,
                allowed_values: vec!["LTI-1p0".to_owned(), "LTI-2p0".to_owned()],
                ..FieldRule::default()
            },
        ),
        (
            "resource_link_id",
            FieldRule {
                required: true,
                ..FieldRule::default()
            },
        ),
        (
            "user_id",
            FieldRule {
                recommended: true,
                ..FieldRule::default()
            },
        ),
        (
            "roles",
            FieldRule {
                recommended: true,
                ..FieldRule::default()
            },
        ),
        (
            "context_id",
            FieldRule {
                recommended: true,
                ..FieldRule::default()
            },
        ),
        (
            "launch_presentation_return_url",
            FieldRule {
                recommended: true,
                ..FieldRule::default()
            },
        ),
    ])
}

/// Verify a basic LTI launch: the OAuth signature first, then the launch
/// message fields in the POST body.
///
/// Returns `Ok(false)` when the signature does not match or the body is not
/// a valid launch message; missing recommended fields only warn.
///
/// # Errors
///
/// Propagates [`AuthError`] from signature verification (OAuth fields not
/// locatable, unparsable URL).
pub fn verify_launch(request: &LaunchRequest, store: &dyn SecretStore) -> Result<bool, AuthError> {
    if !verify_signature(request, store)? {
        return Ok(false);
    }

    let record: Record = request
        .post_params
        .iter()
        .map(|(name, value)| (name.clone(), Value::Str(value.clone())))
        .collect();

    match launch_schema().validate(&record) {
        Ok(_) => Ok(true),
        Err(err) => {
            debug!(%err, "launch message validation failed");
            Ok(false)
        }
    }
}
