//! Authorization Header Verification
//!
//! The scheme dispatcher and the Basic/Bearer verifiers. This is the core of
//! the library: it pulls `authorization` values out of request metadata,
//! routes the first recognizable value to the matching verifier and turns
//! the result into an [`AuthIdentity`] or a uniform failure.
//!
//! ## Design
//!
//! - **First match wins**: values are scanned in the order the transport
//!   delivered them; the first value that splits into `<scheme> <material>`
//!   with a supported scheme decides the outcome, success or failure
//! - **Lenient scan**: values with no whitespace separator, non-ASCII
//!   values and unknown schemes are skipped, which tolerates proxies that
//!   append their own Authorization-like lines
//! - **Uniform failures**: each scheme has exactly one failure message

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tonic::metadata::MetadataMap;
use tonic::Extensions;
use tracing::{debug, warn};

use crate::error::AuthError;
use crate::identity::AuthIdentity;

/// Metadata key carrying the credentials, lower-cased by the transport.
pub(crate) const AUTHORIZATION_HEADER: &str = "authorization";

/// Caller-supplied verification callback for the Basic scheme.
///
/// Invoked with the request extensions, the username and the password;
/// returns the resolved username on success, `None` on failure. The callback
/// may insert additional extension values; they reach the handler only when
/// verification succeeds. Credential comparison inside the callback must be
/// constant time (see the `subtle` crate) to avoid timing side channels.
pub type VerifyBasicFn = Arc<dyn Fn(&mut Extensions, &str, &str) -> Option<String> + Send + Sync>;

/// Caller-supplied verification callback for the Bearer scheme.
///
/// Invoked with the request extensions and the raw token (which may be
/// empty); returns the resolved username and the online classification on
/// success, `None` on failure. The same constant-time comparison contract
/// applies.
pub type VerifyBearerFn =
    Arc<dyn Fn(&mut Extensions, &str) -> Option<(String, bool)> + Send + Sync>;

/// Split a raw header value into scheme token and credential material.
///
/// Mirrors the `<scheme> <material>` wire format: the scheme is everything
/// before the first run of ASCII whitespace, the material is everything
/// after it. Returns `None` for values with no whitespace separator; the
/// scan skips those rather than failing.
fn split_scheme_line(line: &str) -> Option<(&str, &str)> {
    let (scheme, rest) = line.split_once(|c: char| c.is_ascii_whitespace())?;
    if scheme.is_empty() {
        return None;
    }

    Some((scheme, rest.trim_start_matches(|c: char| c.is_ascii_whitespace())))
}

/// Verify the `authorization` metadata of an inbound request.
///
/// Scans every header value in transport order and dispatches the first one
/// whose scheme token is `basic` or `bearer` (case-insensitive). On success
/// the returned [`AuthIdentity`] carries the resolved username and the
/// online flag; the caller is responsible for storing it in the request
/// extensions.
///
/// ## Errors
///
/// - [`AuthError::MissingCredentials`] when no value dispatches
/// - [`AuthError::InvalidBasicCredentials`] for any Basic failure
/// - [`AuthError::InvalidBearerCredentials`] for any Bearer failure
pub fn verify_authorization(
    metadata: &MetadataMap,
    extensions: &mut Extensions,
    verify_basic: &VerifyBasicFn,
    verify_bearer: &VerifyBearerFn,
) -> Result<AuthIdentity, AuthError> {
    for value in metadata.get_all(AUTHORIZATION_HEADER).iter() {
        let line = match value.to_str() {
            Ok(line) => line,
            Err(_) => continue,
        };

        let (scheme, material) = match split_scheme_line(line) {
            Some(parts) => parts,
            None => continue,
        };

        if scheme.eq_ignore_ascii_case("basic") {
            return verify_auth_basic(extensions, verify_basic, material);
        }

        if scheme.eq_ignore_ascii_case("bearer") {
            return verify_auth_bearer(extensions, verify_bearer, material);
        }
    }

    warn!("no authorization metadata matched a supported scheme");
    Err(AuthError::MissingCredentials)
}

/// Verify base64-encoded Basic credential material.
///
/// Decode failures, non-UTF-8 payloads, a missing colon separator and
/// callback rejection all collapse into the same generic error. Passwords
/// may contain colons; only the first one separates user from password.
fn verify_auth_basic(
    extensions: &mut Extensions,
    verify: &VerifyBasicFn,
    encoded: &str,
) -> Result<AuthIdentity, AuthError> {
    let decoded = STANDARD.decode(encoded).map_err(|err| {
        warn!(error = %err, "basic credential material is not valid base64");
        AuthError::InvalidBasicCredentials
    })?;

    let decoded = String::from_utf8(decoded).map_err(|_| {
        warn!("basic credential material is not valid utf-8");
        AuthError::InvalidBasicCredentials
    })?;

    let (user, pass) = decoded.split_once(':').ok_or_else(|| {
        warn!("basic credential material has no user:password separator");
        AuthError::InvalidBasicCredentials
    })?;

    match verify(extensions, user, pass) {
        Some(username) => {
            debug!(username = %username, "basic credentials verified");
            Ok(AuthIdentity::new(username, true))
        }
        None => {
            warn!("basic credentials rejected by verification callback");
            Err(AuthError::InvalidBasicCredentials)
        }
    }
}

/// Verify a raw Bearer token.
///
/// The token is handed to the callback untouched; the callback decides both
/// validity and the online classification.
fn verify_auth_bearer(
    extensions: &mut Extensions,
    verify: &VerifyBearerFn,
    token: &str,
) -> Result<AuthIdentity, AuthError> {
    match verify(extensions, token) {
        Some((username, online)) => {
            debug!(username = %username, online, "bearer token verified");
            Ok(AuthIdentity::new(username, online))
        }
        None => {
            warn!("bearer token rejected by verification callback");
            Err(AuthError::InvalidBearerCredentials)
        }
    }
}
