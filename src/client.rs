//! Client-side Credential Emitters
//!
//! Produces `Authorization` metadata for outgoing gRPC requests. Basic and
//! Bearer credentials are plaintext equivalent, so every emitter is gated on
//! the channel providing at least privacy and integrity.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tonic::metadata::AsciiMetadataValue;
use tonic::service::Interceptor;
use tonic::{Request, Status};

use crate::error::AuthError;
use crate::security::SecurityLevel;
use crate::verify::AUTHORIZATION_HEADER;

/// Per-call credentials that can emit an `authorization` header value.
///
/// The seam between locally held credentials and the transport. Implementors
/// declare up front whether they require transport security, which lets the
/// wiring layer refuse an insecure channel before any request is attempted,
/// and check the channel level again on every emission.
pub trait CallCredentials {
    /// Produce the `authorization` metadata value for one request.
    ///
    /// ## Errors
    ///
    /// - [`AuthError::InsecureTransport`] when the channel level is below
    ///   [`SecurityLevel::PrivacyAndIntegrity`]
    /// - [`AuthError::InvalidHeaderValue`] when the credential material
    ///   cannot be carried as an ASCII metadata value
    fn request_metadata(
        &self,
        security_level: SecurityLevel,
    ) -> Result<AsciiMetadataValue, AuthError>;

    /// Whether these credentials must only travel over a secure channel.
    fn require_transport_security(&self) -> bool;

    /// Wrap the credentials in a client interceptor for the given channel.
    ///
    /// ## Errors
    ///
    /// Returns [`AuthError::InsecureTransport`] at construction time when
    /// the credentials require transport security and the channel does not
    /// provide it, so misconfiguration surfaces before the first call.
    fn into_interceptor(
        self,
        security_level: SecurityLevel,
    ) -> Result<CredentialsInterceptor<Self>, AuthError>
    where
        Self: Sized,
    {
        CredentialsInterceptor::new(self, security_level)
    }
}

/// Username/password credentials emitted as `Basic <base64(user:pass)>`.
#[derive(Clone)]
pub struct BasicCredentials {
    user: String,
    pass: String,
}

impl BasicCredentials {
    /// Create Basic credentials from a plaintext username and password.
    pub fn new(user: impl Into<String>, pass: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            pass: pass.into(),
        }
    }
}

impl CallCredentials for BasicCredentials {
    fn request_metadata(
        &self,
        security_level: SecurityLevel,
    ) -> Result<AsciiMetadataValue, AuthError> {
        security_level.check(SecurityLevel::PrivacyAndIntegrity)?;

        let encoded = STANDARD.encode(format!("{}:{}", self.user, self.pass));

        AsciiMetadataValue::try_from(format!("Basic {}", encoded))
            .map_err(|_| AuthError::InvalidHeaderValue)
    }

    fn require_transport_security(&self) -> bool {
        true
    }
}

/// Raw token credentials emitted as `Bearer <token>`.
#[derive(Clone)]
pub struct BearerCredentials {
    token: String,
}

impl BearerCredentials {
    /// Create Bearer credentials from a raw token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl CallCredentials for BearerCredentials {
    fn request_metadata(
        &self,
        security_level: SecurityLevel,
    ) -> Result<AsciiMetadataValue, AuthError> {
        security_level.check(SecurityLevel::PrivacyAndIntegrity)?;

        AsciiMetadataValue::try_from(format!("Bearer {}", self.token))
            .map_err(|_| AuthError::InvalidHeaderValue)
    }

    fn require_transport_security(&self) -> bool {
        true
    }
}

/// Client-side interceptor that attaches credentials to every request.
///
/// Checks the channel security level on every call and inserts exactly one
/// `authorization` metadata entry. Construction already refused an insecure
/// channel, so the per-request check only fires if the wiring layer lied
/// about the channel.
///
/// ## Usage
///
/// ```rust,no_run
/// use grpc_auth::{BearerCredentials, CallCredentials, SecurityLevel};
///
/// # fn example() -> Result<(), grpc_auth::AuthError> {
/// let interceptor = BearerCredentials::new("valid-online-token")
///     .into_interceptor(SecurityLevel::PrivacyAndIntegrity)?;
///
/// // let mut client = MyServiceClient::with_interceptor(channel, interceptor);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CredentialsInterceptor<C> {
    credentials: C,
    security_level: SecurityLevel,
}

impl<C: CallCredentials> CredentialsInterceptor<C> {
    /// Wrap credentials for a channel with the given security level.
    ///
    /// ## Errors
    ///
    /// Returns [`AuthError::InsecureTransport`] when the credentials require
    /// transport security and the channel level is below
    /// [`SecurityLevel::PrivacyAndIntegrity`].
    pub fn new(credentials: C, security_level: SecurityLevel) -> Result<Self, AuthError> {
        if credentials.require_transport_security() {
            security_level.check(SecurityLevel::PrivacyAndIntegrity)?;
        }

        Ok(Self {
            credentials,
            security_level,
        })
    }
}

impl<C: CallCredentials> Interceptor for CredentialsInterceptor<C> {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        let value = self.credentials.request_metadata(self.security_level)?;

        request.metadata_mut().insert(AUTHORIZATION_HEADER, value);

        Ok(request)
    }
}
