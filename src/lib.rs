//! Basic and Bearer Authentication for tonic Services
//!
//! This library verifies HTTP-style `Authorization` headers carried in gRPC
//! request metadata and generates those same headers on the client side,
//! plugging into tonic's interceptor mechanism on both ends.
//!
//! ## Core Components
//!
//! - **AuthInterceptor**: server interceptor that scans `authorization`
//!   metadata, dispatches to scheme verifiers and enriches the request
//! - **BasicCredentials / BearerCredentials**: client-side credential
//!   emitters, gated on transport security
//! - **AuthIdentity**: typed verification result stored in request extensions
//! - **AuthIdentityExt**: request extension trait for handler access
//!
//! ## Design Philosophy
//!
//! - **First match wins**: header values are scanned in transport order and
//!   the first structurally valid Basic/Bearer line decides the outcome
//! - **Uniform failures**: every verification failure for a scheme maps to
//!   one generic `Status::unauthenticated` message, so error text cannot be
//!   used to probe for valid usernames
//! - **No state**: verifiers are pure functions over the request; nothing is
//!   cached or shared between calls
//! - **Delegated policy**: credential checking itself belongs to the
//!   integrating service, supplied as plain callbacks
//!
//! ## Usage Example
//!
//! ### Server Side
//!
//! ```rust,no_run
//! use grpc_auth::{AuthInterceptor, AuthIdentityExt};
//! use tonic::{Request, Response, Status};
//!
//! // Wire the interceptor with the service's own verification callbacks.
//! let interceptor = AuthInterceptor::new(
//!     |_ext, user, pass| {
//!         // Look the pair up; comparisons must be constant time.
//!         (user == "valid-user" && pass == "valid-pass").then(|| user.to_string())
//!     },
//!     |_ext, token| match token {
//!         "valid-online-token" => Some(("online-user".to_string(), true)),
//!         "valid-offline-token" => Some(("offline-user".to_string(), false)),
//!         _ => None,
//!     },
//! );
//!
//! // Covers unary and streaming calls alike:
//! // let service = MyServiceServer::with_interceptor(MyService, interceptor);
//!
//! // In endpoint handlers the identity is one call away.
//! async fn whoami(request: Request<()>) -> Result<Response<String>, Status> {
//!     let identity = request.auth_identity()?;
//!     Ok(Response::new(identity.username.clone()))
//! }
//! ```
//!
//! ### Client Side
//!
//! ```rust,no_run
//! use grpc_auth::{BasicCredentials, CallCredentials, SecurityLevel};
//!
//! # fn example() -> Result<(), grpc_auth::AuthError> {
//! let creds = BasicCredentials::new("valid-user", "valid-pass");
//!
//! // Refused at construction time unless the channel is TLS protected.
//! let interceptor = creds.into_interceptor(SecurityLevel::PrivacyAndIntegrity)?;
//!
//! // let mut client = MyServiceClient::with_interceptor(channel, interceptor);
//! # Ok(())
//! # }
//! ```
//!
//! ## Security Guarantees
//!
//! - Basic and Bearer credentials are plaintext equivalent; emitters refuse
//!   any channel below `SecurityLevel::PrivacyAndIntegrity`
//! - Missing header, malformed header and rejected credentials all surface
//!   as `Status::unauthenticated`
//! - The enriched identity is present in request extensions if and only if
//!   verification succeeded; `username` and `online` always travel together
//! - Credential material never appears in log events

mod client;
mod error;
mod extensions;
mod identity;
mod security;
mod server;
mod verify;

pub use client::{BasicCredentials, BearerCredentials, CallCredentials, CredentialsInterceptor};
pub use error::{AuthError, AuthResult};
pub use extensions::AuthIdentityExt;
pub use identity::AuthIdentity;
pub use security::SecurityLevel;
pub use server::AuthInterceptor;
pub use verify::{verify_authorization, VerifyBasicFn, VerifyBearerFn};

// Re-export tonic Status for convenience
pub use tonic::Status;
