//! Transport Security Classification
//!
//! Classifies the confidentiality and integrity guarantees of the channel a
//! request travels on. Basic and Bearer credentials are plaintext equivalent,
//! so the emitters in this crate refuse to produce a header unless the
//! channel provides at least privacy and integrity.

use std::fmt;

use crate::error::AuthError;

/// Security guarantees of the underlying connection.
///
/// The ordering is meaningful: a channel level satisfies a requirement when
/// it compares greater than or equal to it. tonic does not expose connection
/// introspection to interceptors, so the integrating application declares
/// the level when it wires credentials to a channel (TLS channels provide
/// [`SecurityLevel::PrivacyAndIntegrity`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SecurityLevel {
    /// No confidentiality or integrity, e.g. a plaintext connection.
    NoSecurity,
    /// Message integrity without confidentiality.
    IntegrityOnly,
    /// Confidentiality and integrity, e.g. TLS.
    PrivacyAndIntegrity,
}

impl SecurityLevel {
    /// Check this channel level against a required level.
    ///
    /// ## Errors
    ///
    /// Returns [`AuthError::InsecureTransport`] carrying the channel level
    /// when the requirement is not met.
    pub fn check(self, required: SecurityLevel) -> Result<(), AuthError> {
        if self >= required {
            Ok(())
        } else {
            Err(AuthError::InsecureTransport { level: self })
        }
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NoSecurity => "no security",
            Self::IntegrityOnly => "integrity only",
            Self::PrivacyAndIntegrity => "privacy and integrity",
        };

        f.write_str(name)
    }
}
