//! Request Extension Trait for Identity Access
//!
//! Ergonomic helpers for reading the authenticated identity from gRPC
//! request handlers.

use tonic::{Request, Status};

use crate::identity::AuthIdentity;

/// Extension trait for accessing the authenticated identity of a request.
///
/// Implemented for all `Request<T>` types. The identity is stored by
/// [`AuthInterceptor`](crate::AuthInterceptor); if the interceptor is not
/// attached or verification failed, every accessor returns
/// `Status::unauthenticated`.
///
/// ## Usage
///
/// ```rust,no_run
/// use grpc_auth::AuthIdentityExt;
/// use tonic::{Request, Response, Status};
///
/// async fn fetch_report(request: Request<()>) -> Result<Response<()>, Status> {
///     // Long-lived grants only; interactive sessions are turned away.
///     let identity = request.require_offline()?;
///     println!("report for {}", identity.username);
///     Ok(Response::new(()))
/// }
/// ```
pub trait AuthIdentityExt {
    /// The identity stored by the server interceptor.
    ///
    /// ## Errors
    ///
    /// Returns `Status::unauthenticated` when no identity is present.
    fn auth_identity(&self) -> Result<&AuthIdentity, Status>;

    /// The identity, required to be an online (interactive) credential.
    ///
    /// ## Errors
    ///
    /// - `Status::unauthenticated` when no identity is present
    /// - `Status::unauthenticated` with "request requires an online token"
    ///   for offline identities
    fn require_online(&self) -> Result<&AuthIdentity, Status>;

    /// The identity, required to be an offline (long-lived) credential.
    ///
    /// ## Errors
    ///
    /// - `Status::unauthenticated` when no identity is present
    /// - `Status::unauthenticated` with "request requires an offline token"
    ///   for online identities
    fn require_offline(&self) -> Result<&AuthIdentity, Status>;
}

impl<T> AuthIdentityExt for Request<T> {
    fn auth_identity(&self) -> Result<&AuthIdentity, Status> {
        self.extensions().get::<AuthIdentity>().ok_or_else(|| {
            Status::unauthenticated(
                "no authenticated identity found, ensure AuthInterceptor is attached",
            )
        })
    }

    fn require_online(&self) -> Result<&AuthIdentity, Status> {
        let identity = self.auth_identity()?;

        if !identity.is_online() {
            return Err(Status::unauthenticated("request requires an online token"));
        }

        Ok(identity)
    }

    fn require_offline(&self) -> Result<&AuthIdentity, Status> {
        let identity = self.auth_identity()?;

        if !identity.is_offline() {
            return Err(Status::unauthenticated("request requires an offline token"));
        }

        Ok(identity)
    }
}
