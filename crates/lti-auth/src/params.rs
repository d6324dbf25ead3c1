//! OAuth parameter location and filtering.
//!
//! OAuth 1.0a lets the launching platform place its protocol parameters in
//! one of three locations: the POST body, the HTTP `Authorization` header,
//! or the query string. Exactly one location is selected per request. POST
//! wins over the header, which wins over GET; a candidate wins when the
//! full OAuth field schema validates against it.

use std::collections::HashMap;

use lti_validate::{FieldRule, FieldType, Record, Schema, Value};
use percent_encoding::percent_decode_str;
use tracing::debug;

use crate::error::AuthError;
use crate::request::HeaderValue;

/// The OAuth 1.0a field schema for HMAC-SHA1 signed launches.
///
/// `oauth_version` is optional per the OAuth 1.0 spec but restricted to
/// `"1.0"` when present; `oauth_callback` and `oauth_token` are carried but
/// unrestricted (LTI ignores their values).
#[must_use]
pub fn oauth_schema() -> Schema {
    Schema::new([
        (
            "oauth_consumer_key",
            FieldRule {
                required: true,
                ..FieldRule::default()
            },
        ),
        (
            "oauth_signature_method",
            FieldRule {
                required: true,
                allowed_values: vec!["HMAC-SHA1".to_owned()],
                ..FieldRule::default()
            },
        ),
        (
            "oauth_timestamp",
            FieldRule {
                required: true,
                expected_type: FieldType::Int,
                ..FieldRule::default()
            },
        ),
        (
            "oauth_nonce",
            FieldRule {
                required: true,
                ..FieldRule::default()
            },
        ),
        (
            "oauth_signature",
            FieldRule {
                required: true,
                ..FieldRule::default()
            },
        ),
        (
            "oauth_version",
            FieldRule {
                allowed_values: vec!["1.0".to_owned()],
                ..FieldRule::default()
            },
        ),
        ("oauth_callback", FieldRule::default()),
        ("oauth_token", FieldRule::default()),
    ])
}

/// The validated OAuth parameter set for one request, filtered down to the
/// fields the OAuth schema recognizes.
#[derive(Debug, Clone)]
pub struct OAuthParams {
    params: Record,
    signature: String,
    consumer_key: String,
    token_key: String,
    found_in_header: bool,
}

impl OAuthParams {
    /// Locate the OAuth parameter set for a request.
    ///
    /// Candidate sources are tried in order: POST body, `Authorization`
    /// header, GET params. The first candidate the full OAuth schema
    /// validates against is selected, then filtered to schema fields only
    /// (dropping `realm` and any launch fields that ride along).
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::OAuthFieldsNotFound`] when no candidate holds a
    /// complete, valid OAuth parameter set.
    pub fn locate(
        headers: &HashMap<String, HeaderValue>,
        get_params: &HashMap<String, String>,
        post_params: &HashMap<String, String>,
    ) -> Result<Self, AuthError> {
        let schema = oauth_schema();
        let header_params = authorization_params(headers);

        let (validated, found_in_header) =
            if let Ok(record) = schema.validate(&string_record(post_params)) {
                debug!("OAuth fields located in POST body");
                (record, false)
            } else if let Some(record) = header_params
                .as_ref()
                .and_then(|candidate| schema.validate(candidate).ok())
            {
                debug!("OAuth fields located in Authorization header");
                (record, true)
            } else if let Ok(record) = schema.validate(&string_record(get_params)) {
                debug!("OAuth fields located in GET params");
                (record, false)
            } else {
                return Err(AuthError::OAuthFieldsNotFound);
            };

        let params: Record = validated
            .into_iter()
            .filter(|(name, _)| schema.has_field(name))
            .collect();

        let signature =
            field_string(&params, "oauth_signature").ok_or(AuthError::OAuthFieldsNotFound)?;
        let consumer_key =
            field_string(&params, "oauth_consumer_key").ok_or(AuthError::OAuthFieldsNotFound)?;
        let token_key = field_string(&params, "oauth_token").unwrap_or_default();

        Ok(Self {
            params,
            signature,
            consumer_key,
            token_key,
            found_in_header,
        })
    }

    /// All located OAuth parameters, `oauth_signature` included.
    #[must_use]
    pub fn params(&self) -> &Record {
        &self.params
    }

    /// The signature supplied by the caller, percent-decoded when it came
    /// from the `Authorization` header.
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The consumer key identifying the launching platform.
    #[must_use]
    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    /// The token key, or the empty string when the launch carries no token.
    #[must_use]
    pub fn token_key(&self) -> &str {
        &self.token_key
    }

    /// Whether the parameters came from the `Authorization` header.
    #[must_use]
    pub fn found_in_header(&self) -> bool {
        self.found_in_header
    }
}

/// Lift a string parameter map into a validation record.
fn string_record(params: &HashMap<String, String>) -> Record {
    params
        .iter()
        .map(|(name, value)| (name.clone(), Value::Str(value.clone())))
        .collect()
}

fn field_string(params: &Record, name: &str) -> Option<String> {
    params.get(name).map(ToString::to_string)
}

/// Extract the `Authorization` header's `key=value` pairs, if the header is
/// present and parsable.
///
/// Raw header lines carry literal percent-escapes per OAuth convention, so
/// both keys and values are decoded. Pre-split header values were already
/// decoded by the transport layer and are used as-is.
fn authorization_params(headers: &HashMap<String, HeaderValue>) -> Option<Record> {
    let value = headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("authorization"))
        .map(|(_, value)| value)?;

    let params = match value {
        HeaderValue::Split(elements) => elements
            .iter()
            .filter_map(|element| {
                let (name, value) = element.split_once('=')?;
                Some((name.trim().to_owned(), Value::Str(value.to_owned())))
            })
            .collect(),
        HeaderValue::Raw(line) => parse_oauth_header(line)?,
    };

    Some(params).filter(|p: &Record| !p.is_empty())
}

/// Parse a raw `Authorization: OAuth ...` header line into decoded pairs.
///
/// Elements are comma-separated with double-quoted values; an element
/// without `=` is skipped. Returns `None` when nothing parses, so a
/// malformed header falls through to the next candidate source instead of
/// failing the request outright.
fn parse_oauth_header(line: &str) -> Option<Record> {
    let line = line.trim();
    let line = line
        .strip_prefix("OAuth")
        .map_or(line, str::trim_start);

    let mut params = Record::new();
    for element in split_quoted_list(line) {
        let Some((name, value)) = element.split_once('=') else {
            continue;
        };
        let name = percent_decode(name.trim());
        let value = percent_decode(unquote(value.trim()));
        params.insert(name, Value::Str(value));
    }

    Some(params).filter(|p| !p.is_empty())
}

/// Split a comma-separated HTTP list, honoring double-quoted elements.
fn split_quoted_list(input: &str) -> Vec<String> {
    let mut elements = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in input.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            ',' if !in_quotes => {
                push_element(&mut elements, &current);
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    push_element(&mut elements, &current);

    elements
}

fn push_element(elements: &mut Vec<String>, raw: &str) {
    let element = raw.trim();
    if !element.is_empty() {
        elements.push(element.to_owned());
    }
}

/// Strip one layer of surrounding double quotes.
fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

fn percent_decode(input: &str) -> String {
    percent_decode_str(input).decode_utf8_lossy().into_owned()
}
