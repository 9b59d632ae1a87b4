//! Authentication error types

use thiserror::Error;
use tonic::Status;

use crate::security::SecurityLevel;

/// Errors produced while verifying or emitting authorization credentials.
///
/// Scheme verification failures deliberately collapse into one generic
/// message per scheme, so the error text cannot distinguish malformed
/// credential material from a wrong credential.
#[derive(Error, Debug)]
pub enum AuthError {
    /// No `authorization` value matched a supported scheme.
    #[error("authentication missing")]
    MissingCredentials,

    /// Basic credential material failed decoding, splitting or verification.
    #[error("authentication failed with Basic authorization scheme")]
    InvalidBasicCredentials,

    /// Bearer token rejected by the verification callback.
    #[error("authentication failed with Bearer authorization scheme")]
    InvalidBearerCredentials,

    /// Plaintext-equivalent credentials over a channel below the required
    /// security level.
    #[error("credentials require transport level security, channel provides {level}")]
    InsecureTransport {
        /// Security level the channel actually provides.
        level: SecurityLevel,
    },

    /// Credential material cannot be carried as an ASCII metadata value.
    #[error("credential material is not a valid authorization header value")]
    InvalidHeaderValue,
}

impl From<AuthError> for Status {
    fn from(err: AuthError) -> Self {
        Status::unauthenticated(err.to_string())
    }
}

pub type AuthResult<T> = Result<T, AuthError>;
