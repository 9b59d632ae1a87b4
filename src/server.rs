//! Server-side Authentication Interceptor
//!
//! Verifies `Authorization` metadata on incoming gRPC requests and stores
//! the resulting identity in request extensions.

use std::sync::Arc;

use tonic::service::Interceptor;
use tonic::{Extensions, Request, Status};

use crate::verify::{verify_authorization, VerifyBasicFn, VerifyBearerFn};

/// Server-side interceptor that authenticates every incoming request.
///
/// This interceptor:
/// 1. Extracts the `authorization` values from gRPC metadata
/// 2. Dispatches the first Basic/Bearer value to its verification callback
/// 3. Stores the resulting [`AuthIdentity`](crate::AuthIdentity) in request
///    extensions for handler access
///
/// ## Design
///
/// - **Fail-fast**: any verification failure rejects the request with
///   `Status::unauthenticated` before the handler runs
/// - **Uniform shape**: attaching via `with_interceptor` covers unary and
///   streaming calls alike; there is no per-shape code path
/// - **No timeout of its own**: callbacks may block on remote identity
///   checks; deadline and cancellation handling stays with the transport
/// - **Stateless**: cloning the interceptor shares the callbacks, nothing
///   else; concurrent requests never observe each other
///
/// ## Usage
///
/// ```rust,no_run
/// use grpc_auth::AuthInterceptor;
///
/// let interceptor = AuthInterceptor::new(
///     |_ext, user, pass| {
///         // Constant-time lookup owned by the integrating service.
///         (user == "valid-user" && pass == "valid-pass").then(|| user.to_string())
///     },
///     |_ext, token| match token {
///         "valid-online-token" => Some(("online-user".to_string(), true)),
///         "valid-offline-token" => Some(("offline-user".to_string(), false)),
///         _ => None,
///     },
/// );
///
/// // let service = MyServiceServer::with_interceptor(MyService, interceptor);
/// ```
#[derive(Clone)]
pub struct AuthInterceptor {
    verify_basic: VerifyBasicFn,
    verify_bearer: VerifyBearerFn,
}

impl AuthInterceptor {
    /// Create an interceptor from the two scheme verification callbacks.
    ///
    /// The Basic callback receives `(extensions, username, password)` and
    /// returns the resolved username on success. The Bearer callback
    /// receives `(extensions, token)` and returns the resolved username
    /// together with the online classification. Both may insert additional
    /// extension values for the handler.
    pub fn new<B, T>(verify_basic: B, verify_bearer: T) -> Self
    where
        B: Fn(&mut Extensions, &str, &str) -> Option<String> + Send + Sync + 'static,
        T: Fn(&mut Extensions, &str) -> Option<(String, bool)> + Send + Sync + 'static,
    {
        Self {
            verify_basic: Arc::new(verify_basic),
            verify_bearer: Arc::new(verify_bearer),
        }
    }

    /// Create an interceptor from already-shared callbacks.
    ///
    /// Useful when the same callbacks back several services.
    pub fn from_fns(verify_basic: VerifyBasicFn, verify_bearer: VerifyBearerFn) -> Self {
        Self {
            verify_basic,
            verify_bearer,
        }
    }
}

impl Interceptor for AuthInterceptor {
    fn call(&mut self, request: Request<()>) -> Result<Request<()>, Status> {
        let (metadata, mut extensions, message) = request.into_parts();

        let identity = verify_authorization(
            &metadata,
            &mut extensions,
            &self.verify_basic,
            &self.verify_bearer,
        )?;

        extensions.insert(identity);

        Ok(Request::from_parts(metadata, extensions, message))
    }
}
