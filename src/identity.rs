//! Authenticated Identity
//!
//! This module defines the typed result of a successful authorization check,
//! stored in request extensions for access by service handlers.

use serde::{Deserialize, Serialize};

/// Identity attached to a request after successful verification.
///
/// Stored in request extensions by the server interceptor. An `AuthIdentity`
/// is present if and only if a verification callback accepted the presented
/// credentials; `username` and `online` always travel together.
///
/// ## Design Notes
///
/// - Fields are public for direct access (no getter boilerplate)
/// - Cloneable so handlers can move it into their own state
/// - Basic credentials always produce an online identity; the online flag
///   only varies for Bearer tokens, where the verification callback decides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthIdentity {
    /// Username resolved by the verification callback.
    pub username: String,

    /// Whether the credential represents an interactive session (online) or
    /// a long-lived non-interactive grant (offline).
    pub online: bool,
}

impl AuthIdentity {
    /// Create an identity with an explicit online classification.
    pub fn new(username: impl Into<String>, online: bool) -> Self {
        Self {
            username: username.into(),
            online,
        }
    }

    /// Whether the credential behind this identity was interactive.
    pub fn is_online(&self) -> bool {
        self.online
    }

    /// Whether the credential behind this identity was a long-lived grant.
    pub fn is_offline(&self) -> bool {
        !self.online
    }
}
