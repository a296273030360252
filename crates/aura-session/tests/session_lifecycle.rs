//! End-to-end lifecycle of the auth session manager over a scripted
//! backend: bootstrap, login, logout, register, and the invariant that a
//! profile never exists without a token.

use std::sync::Arc;
use std::time::Duration;

use aura_protocol::{AccessToken, ApiClient, UserId};
use aura_session::{AuthSessionManager, Session, SessionConfig, SessionError};
use aura_transport::mock::ScriptedBackend;
use aura_transport::{Method, RetryPolicy, TransportError};

const USER: &str =
    r#"{"id":1,"email":"test@x.com","favorite_club":"Arsenal","banter_mode":false}"#;

fn manager_with(config: SessionConfig) -> AuthSessionManager<ScriptedBackend> {
    AuthSessionManager::new(Arc::new(ApiClient::new(ScriptedBackend::new())), config)
}

fn manager() -> AuthSessionManager<ScriptedBackend> {
    manager_with(SessionConfig::default())
}

fn backend(mgr: &AuthSessionManager<ScriptedBackend>) -> &ScriptedBackend {
    mgr.api().backend()
}

/// Token present whenever a profile is present.
fn assert_invariant(session: &Session) {
    if session.current_user().is_some() {
        assert!(session.access_token().is_some(), "profile without token: {session:?}");
    }
}

// =========================================================================
// bootstrap()
// =========================================================================

#[tokio::test]
async fn test_bootstrap_success_restores_session() {
    let mgr = manager();
    backend(&mgr).respond(Method::Post, "/api/auth/refresh", 200, r#"{"access":"tok1"}"#);
    backend(&mgr).respond(Method::Get, "/api/me", 200, USER);
    let reader = mgr.reader();

    let session = mgr.bootstrap().await;

    assert_eq!(session.access_token().map(AccessToken::as_str), Some("tok1"));
    assert_eq!(session.current_user().map(|u| u.id), Some(UserId(1)));
    assert_eq!(reader.revision(), 1, "exactly one terminal write");
    assert_eq!(backend(&mgr).requests()[1].bearer.as_deref(), Some("tok1"));
}

#[tokio::test]
async fn test_bootstrap_rejected_cookie_signs_out_without_retry() {
    let mgr = manager();
    backend(&mgr).respond(
        Method::Post,
        "/api/auth/refresh",
        401,
        r#"{"detail":"Missing refresh token."}"#,
    );

    let session = mgr.bootstrap().await;

    assert_eq!(session, Session::SignedOut);
    assert_eq!(mgr.reader().revision(), 1);
    assert_eq!(backend(&mgr).count(Method::Post, "/api/auth/refresh"), 1);
}

#[tokio::test]
async fn test_bootstrap_profile_failure_signs_out() {
    // Refresh works but /api/me does not: the half-restored token must
    // not leak into the store.
    let mgr = manager();
    backend(&mgr).respond(Method::Post, "/api/auth/refresh", 200, r#"{"access":"tok1"}"#);
    backend(&mgr).respond(Method::Get, "/api/me", 500, "{}");

    let session = mgr.bootstrap().await;

    assert_eq!(session, Session::SignedOut);
    assert_eq!(mgr.reader().revision(), 1);
}

#[tokio::test]
async fn test_bootstrap_malformed_body_signs_out() {
    let mgr = manager();
    backend(&mgr).respond(Method::Post, "/api/auth/refresh", 200, r#"{"token":"x"}"#);

    assert_eq!(mgr.bootstrap().await, Session::SignedOut);
}

#[tokio::test(start_paused = true)]
async fn test_bootstrap_retries_network_failure_then_succeeds() {
    let mgr = manager_with(SessionConfig {
        bootstrap_retry: RetryPolicy {
            max_attempts: 3,
            backoff: Duration::from_millis(250),
        },
    });
    backend(&mgr)
        .fail(
            Method::Post,
            "/api/auth/refresh",
            TransportError::ConnectionFailed("refused".into()),
        )
        .respond(Method::Post, "/api/auth/refresh", 200, r#"{"access":"tok1"}"#);
    backend(&mgr).respond(Method::Get, "/api/me", 200, USER);

    let session = mgr.bootstrap().await;

    assert!(session.is_signed_in());
    assert_eq!(backend(&mgr).count(Method::Post, "/api/auth/refresh"), 2);
    assert_eq!(mgr.reader().revision(), 1, "retries must not write");
}

#[tokio::test(start_paused = true)]
async fn test_bootstrap_network_down_terminates_signed_out() {
    let mgr = manager();
    backend(&mgr).fail(Method::Post, "/api/auth/refresh", TransportError::Timeout);

    let session = mgr.bootstrap().await;

    assert_eq!(session, Session::SignedOut);
    assert!(!mgr.session().is_loading());
    assert_eq!(mgr.reader().revision(), 1);
}

#[tokio::test]
async fn test_bootstrap_releases_waiting_readers() {
    let mgr = manager();
    let mut reader = mgr.reader();
    let waiter = tokio::spawn(async move { reader.settled().await });

    mgr.bootstrap().await;

    assert_eq!(waiter.await.unwrap(), Session::SignedOut);
}

// =========================================================================
// login() / logout()
// =========================================================================

#[tokio::test]
async fn test_login_then_logout_round_trip() {
    let mgr = manager();
    backend(&mgr).respond(
        Method::Post,
        "/api/auth/login",
        200,
        &format!(r#"{{"access":"tok1","user":{USER}}}"#),
    );

    mgr.login("test@x.com", "secret").await.unwrap();
    let session = mgr.session();
    assert_eq!(session.access_token().map(AccessToken::as_str), Some("tok1"));
    assert_eq!(session.current_user().map(|u| u.id), Some(UserId(1)));

    mgr.logout();
    assert_eq!(mgr.session(), Session::SignedOut);
}

#[tokio::test]
async fn test_logout_from_any_state_yields_signed_out() {
    let loading = manager();
    loading.logout();
    assert_eq!(loading.session(), Session::SignedOut);

    let signed_out = manager();
    signed_out.logout();
    signed_out.logout();
    assert_eq!(signed_out.session(), Session::SignedOut);
}

#[tokio::test]
async fn test_readers_observe_invariant_through_every_operation() {
    let mgr = manager();
    let mut reader = mgr.reader();
    backend(&mgr).respond(Method::Post, "/api/auth/refresh", 200, r#"{"access":"tok1"}"#);
    backend(&mgr).respond(Method::Get, "/api/me", 200, USER);
    backend(&mgr).respond(Method::Patch, "/api/me", 200, USER);
    backend(&mgr).respond(
        Method::Post,
        "/api/auth/login",
        200,
        &format!(r#"{{"access":"tok3","user":{USER}}}"#),
    );

    mgr.bootstrap().await;
    assert_invariant(&reader.changed().await.unwrap());
    mgr.update_favorite_club("Arsenal").await.unwrap();
    assert_invariant(&reader.changed().await.unwrap());
    mgr.logout();
    assert_invariant(&reader.changed().await.unwrap());
    mgr.login("test@x.com", "secret").await.unwrap();
    assert_invariant(&reader.changed().await.unwrap());
}

// =========================================================================
// register()
// =========================================================================

#[tokio::test]
async fn test_register_does_not_sign_in() {
    let mgr = manager();
    mgr.logout();
    backend(&mgr).respond(
        Method::Post,
        "/api/auth/register",
        201,
        &format!(r#"{{"access":"tok1","user":{USER}}}"#),
    );

    let user = mgr.register("test@x.com", "secret", "Arsenal").await.unwrap();

    assert_eq!(user.email, "test@x.com");
    assert_eq!(mgr.session(), Session::SignedOut);
}

#[tokio::test]
async fn test_register_duplicate_email_is_distinguished() {
    let mgr = manager();
    mgr.logout();
    let revision = mgr.reader().revision();
    backend(&mgr).respond(
        Method::Post,
        "/api/auth/register",
        400,
        r#"{"email":["Email already registered."]}"#,
    );

    let err = mgr
        .register("test@x.com", "secret", "Arsenal")
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::Validation(_)));
    assert!(err.is_duplicate_email());
    assert_eq!(mgr.session(), Session::SignedOut);
    assert_eq!(mgr.reader().revision(), revision);
}
