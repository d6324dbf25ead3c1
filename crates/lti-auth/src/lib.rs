//! OAuth 1.0a signature verification for LTI launch requests.
//!
//! This crate provides the verification side of LTI's OAuth 1.0a signing:
//! given an inbound launch request and a secret store, it checks that the
//! request was signed with the consumer's shared secret. It supports the
//! three parameter locations OAuth 1.0a allows (POST body, `Authorization`
//! header, query string) and the HMAC-SHA1 signature method LTI mandates.
//!
//! # Overview
//!
//! An LTI launch hands a user session from a learning platform to an
//! external tool. The tool authenticates the handoff by recomputing the
//! RFC 5849 signature base string from the request and comparing the
//! HMAC-SHA1 signature against the one the platform supplied. Verification
//! is a pure function of the request description and the stored secrets: a
//! mismatch is an ordinary `false` verdict, not an error.
//!
//! # Usage
//!
//! ```rust
//! use lti_auth::{MemorySecretStore, SecretStore};
//!
//! // Register the secret shared with the launching platform.
//! let mut store = MemorySecretStore::new();
//! store.set_secret("dpf43f3p2l4k3l03", "kd94hf93k423kf44");
//!
//! // For an inbound request, build a `LaunchRequest` from the decoded
//! // method, URL, headers, and parameter maps, then call
//! // `verify_signature` (or `verify_launch` to also check the LTI
//! // message fields) with the store.
//! assert!(store.has_key("dpf43f3p2l4k3l03"));
//! ```
//!
//! # Modules
//!
//! - [`canonical`] - Signature base string construction per RFC 5849
//! - [`error`] - Verification error types
//! - [`launch`] - Basic LTI launch message checking
//! - [`params`] - OAuth parameter location and filtering
//! - [`request`] - The decoded launch request description
//! - [`signature`] - HMAC-SHA1 signature computation and verification
//! - [`store`] - Secret store trait and in-memory implementation

pub mod canonical;
pub mod error;
pub mod launch;
pub mod params;
pub mod request;
pub mod signature;
pub mod store;

pub use error::AuthError;
pub use launch::{launch_schema, verify_launch};
pub use params::{OAuthParams, oauth_schema};
pub use request::{HeaderValue, LaunchRequest};
pub use signature::{compute_signature, verify_signature};
pub use store::{MemorySecretStore, SecretStore};
