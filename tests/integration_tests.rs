//! Integration Tests for Per-Request Authentication
//!
//! These tests verify the complete flow:
//! Client credentials -> header emission -> server verification -> handler access

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use grpc_auth::{
    AuthIdentity, AuthIdentityExt, AuthInterceptor, BasicCredentials, BearerCredentials,
    CallCredentials, SecurityLevel,
};
use subtle::ConstantTimeEq;
use tonic::service::Interceptor;
use tonic::{Request, Response, Status};

const VALID_USER: &[u8] = b"valid-user";
const VALID_PASS: &[u8] = b"valid-pass";
const VALID_ONLINE_TOKEN: &[u8] = b"valid-online-token";
const VALID_ONLINE_TOKEN_WITH_CUSTOM_TAG: &[u8] = b"valid-online-token-with-custom-tag";
const VALID_OFFLINE_TOKEN: &[u8] = b"valid-offline-token";

/// Extra context value attached by the bearer callback for one token.
#[derive(Debug, Clone, PartialEq)]
struct TestTag(&'static str);

fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

/// Verification callbacks matching the reference credential set, comparing
/// in constant time the way production callbacks are expected to.
fn test_interceptor() -> AuthInterceptor {
    AuthInterceptor::new(
        |_ext, user, pass| {
            let user_valid = ct_eq(user.as_bytes(), VALID_USER);
            let pass_valid = ct_eq(pass.as_bytes(), VALID_PASS);

            (user_valid && pass_valid).then(|| user.to_string())
        },
        |ext, token| {
            if ct_eq(token.as_bytes(), VALID_ONLINE_TOKEN) {
                return Some(("online-user".to_string(), true));
            }

            if ct_eq(token.as_bytes(), VALID_ONLINE_TOKEN_WITH_CUSTOM_TAG) {
                ext.insert(TestTag("test-tag-goes-here"));
                return Some(("online-user".to_string(), true));
            }

            if ct_eq(token.as_bytes(), VALID_OFFLINE_TOKEN) {
                return Some(("offline-user".to_string(), false));
            }

            None
        },
    )
}

/// Simulate a request flowing through a client credentials interceptor and
/// the server-side authentication interceptor.
fn simulate_grpc_flow<C: CallCredentials>(credentials: C) -> Result<Request<()>, Status> {
    // CLIENT SIDE: attach credentials over a TLS-grade channel
    let mut client_interceptor = credentials
        .into_interceptor(SecurityLevel::PrivacyAndIntegrity)
        .map_err(Status::from)?;
    let request = client_interceptor.call(Request::new(()))?;

    // SERVER SIDE: verify and enrich
    let mut server_interceptor = test_interceptor();
    server_interceptor.call(request)
}

/// Server-side only: run a raw header set through the auth interceptor.
fn verify_headers(values: &[&str]) -> Result<Request<()>, Status> {
    let mut request = Request::new(());
    for value in values {
        request
            .metadata_mut()
            .append("authorization", value.parse().unwrap());
    }

    test_interceptor().call(request)
}

#[test]
fn test_end_to_end_basic_flow() {
    let request = simulate_grpc_flow(BasicCredentials::new("valid-user", "valid-pass"))
        .expect("flow should succeed");

    let identity = request.auth_identity().expect("identity should be present");
    assert_eq!(identity, &AuthIdentity::new("valid-user", true));
}

#[test]
fn test_end_to_end_bearer_online_flow() {
    let request = simulate_grpc_flow(BearerCredentials::new("valid-online-token"))
        .expect("flow should succeed");

    let identity = request.auth_identity().expect("identity should be present");
    assert_eq!(identity, &AuthIdentity::new("online-user", true));
}

#[test]
fn test_end_to_end_bearer_offline_flow() {
    let request = simulate_grpc_flow(BearerCredentials::new("valid-offline-token"))
        .expect("flow should succeed");

    let identity = request.auth_identity().expect("identity should be present");
    assert_eq!(identity, &AuthIdentity::new("offline-user", false));
}

#[test]
fn test_basic_expected_failures() {
    let cases = [
        ("invalid-user", "invalid-pass"),
        ("invalid-user", "valid-pass"),
        ("valid-user", "invalid-pass"),
        ("", ""),
    ];

    for (user, pass) in cases {
        let status = simulate_grpc_flow(BasicCredentials::new(user, pass))
            .expect_err("invalid credentials should fail");

        assert_eq!(status.code(), tonic::Code::Unauthenticated);
        assert_eq!(
            status.message(),
            "authentication failed with Basic authorization scheme",
            "case ({:?}, {:?}) should use the generic message",
            user,
            pass,
        );
    }
}

#[test]
fn test_bearer_expected_failures() {
    let status = simulate_grpc_flow(BearerCredentials::new("invalid-token"))
        .expect_err("invalid token should fail");

    assert_eq!(status.code(), tonic::Code::Unauthenticated);
    assert_eq!(
        status.message(),
        "authentication failed with Bearer authorization scheme"
    );
}

#[test]
fn test_malformed_headers_reject_without_identity() {
    let cases = ["Basic ####", "Basic ==", "Basic aaaa", "Bearer ", "Bearer", ""];

    for header in cases {
        let status = verify_headers(&[header]).expect_err("malformed header should fail");
        assert_eq!(
            status.code(),
            tonic::Code::Unauthenticated,
            "header {:?} should be unauthenticated",
            header,
        );
    }
}

#[test]
fn test_missing_header_is_authentication_missing() {
    let status = verify_headers(&[]).expect_err("missing header should fail");

    assert_eq!(status.code(), tonic::Code::Unauthenticated);
    assert_eq!(status.message(), "authentication missing");
}

#[test]
fn test_header_scan_order_skips_unmatched_lines() {
    // The first value has no credential material and is skipped, the second
    // one verifies.
    let request = verify_headers(&["Bearer", "Bearer valid-online-token"])
        .expect("second header should verify");

    let identity = request.auth_identity().expect("identity should be present");
    assert_eq!(identity, &AuthIdentity::new("online-user", true));
}

#[test]
fn test_custom_tag_propagates_to_handler() {
    let request = simulate_grpc_flow(BearerCredentials::new("valid-online-token-with-custom-tag"))
        .expect("flow should succeed");

    let identity = request.auth_identity().expect("identity should be present");
    assert_eq!(identity, &AuthIdentity::new("online-user", true));

    let tag = request.extensions().get::<TestTag>();
    assert_eq!(tag, Some(&TestTag("test-tag-goes-here")));
}

#[test]
fn test_idempotent_verification() {
    let header = format!("Basic {}", STANDARD.encode("valid-user:valid-pass"));

    let first = verify_headers(&[&header]).expect("first pass should succeed");
    let second = verify_headers(&[&header]).expect("second pass should succeed");

    assert_eq!(
        first.auth_identity().unwrap(),
        second.auth_identity().unwrap()
    );
}

#[test]
fn test_emitters_fail_on_insecure_channel() {
    let basic = BasicCredentials::new("valid-user", "valid-pass")
        .into_interceptor(SecurityLevel::NoSecurity);
    let err = basic.err().expect("basic emission should be refused");
    assert!(err.to_string().contains("transport level security"));

    let bearer = BearerCredentials::new("valid-online-token")
        .into_interceptor(SecurityLevel::NoSecurity);
    let err = bearer.err().expect("bearer emission should be refused");
    assert!(err.to_string().contains("transport level security"));
}

/// Mock online-only endpoint, mirroring a service that refuses long-lived
/// grants for interactive operations.
async fn mock_online_handler(request: Request<()>) -> Result<Response<AuthIdentity>, Status> {
    let identity = request.require_online()?;
    Ok(Response::new(identity.clone()))
}

/// Mock offline-only endpoint, e.g. a batch export reserved for service
/// credentials.
async fn mock_offline_handler(request: Request<()>) -> Result<Response<AuthIdentity>, Status> {
    let identity = request.require_offline()?;
    Ok(Response::new(identity.clone()))
}

#[tokio::test]
async fn test_online_endpoint_accepts_basic_credentials() {
    let request = simulate_grpc_flow(BasicCredentials::new("valid-user", "valid-pass"))
        .expect("flow should succeed");

    let response = mock_online_handler(request).await.expect("online handler");
    assert_eq!(response.get_ref(), &AuthIdentity::new("valid-user", true));
}

#[tokio::test]
async fn test_offline_endpoint_rejects_basic_credentials() {
    // Basic credentials are always classified online, so an offline-only
    // endpoint must turn them away.
    let request = simulate_grpc_flow(BasicCredentials::new("valid-user", "valid-pass"))
        .expect("flow should succeed");

    let status = mock_offline_handler(request)
        .await
        .expect_err("online identity should be rejected");
    assert_eq!(status.code(), tonic::Code::Unauthenticated);
    assert_eq!(status.message(), "request requires an offline token");
}

#[tokio::test]
async fn test_offline_endpoint_accepts_offline_token() {
    let request = simulate_grpc_flow(BearerCredentials::new("valid-offline-token"))
        .expect("flow should succeed");

    let response = mock_offline_handler(request)
        .await
        .expect("offline handler");
    assert_eq!(response.get_ref(), &AuthIdentity::new("offline-user", false));
}

#[tokio::test]
async fn test_online_endpoint_rejects_offline_token() {
    let request = simulate_grpc_flow(BearerCredentials::new("valid-offline-token"))
        .expect("flow should succeed");

    let status = mock_online_handler(request)
        .await
        .expect_err("offline identity should be rejected");
    assert_eq!(status.code(), tonic::Code::Unauthenticated);
    assert_eq!(status.message(), "request requires an online token");
}
