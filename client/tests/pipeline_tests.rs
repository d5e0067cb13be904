mod support;

use std::sync::Arc;

use client::session::{MemorySessionStorage, PersistedSession, SessionStorage};
use client::{ApiClient, ClientConfig, ClientError, PendingRequest, SessionStore};
use protocol::{ListQuery, Role, UserProfile};
use reqwest::StatusCode;
use support::{MockBackend, RecordingNavigator, SUPER_ADMIN_TOKEN};

struct Harness {
    backend: MockBackend,
    storage: Arc<MemorySessionStorage>,
    session: SessionStore,
    navigator: Arc<RecordingNavigator>,
    api: ApiClient,
}

async fn harness(signed_in: bool) -> Harness {
    let backend = MockBackend::start().await;
    let storage = Arc::new(if signed_in {
        MemorySessionStorage::with_session(PersistedSession::new(
            SUPER_ADMIN_TOKEN.to_string(),
            UserProfile::new("u-1", "superadmin", Role::SuperAdmin),
        ))
    } else {
        MemorySessionStorage::new()
    });
    let session = SessionStore::load(storage.clone());
    let navigator = RecordingNavigator::new(session.clone());
    let api = ApiClient::new(&backend.config(), session.clone(), navigator.clone()).unwrap();

    Harness {
        backend,
        storage,
        session,
        navigator,
        api,
    }
}

#[actix_web::test]
async fn test_bearer_attached_when_signed_in() {
    let h = harness(true).await;

    let envelope = h.api.students().list(&ListQuery::default()).await.unwrap();

    assert!(envelope.success);
    assert_eq!(envelope.count, Some(1));
    let seen = h.backend.last();
    assert_eq!(seen.path, "/api/students");
    assert_eq!(seen.authorization.as_deref(), Some("Bearer token-super"));
}

#[actix_web::test]
async fn test_no_authorization_header_when_anonymous() {
    let h = harness(false).await;

    h.api.students().list(&ListQuery::default()).await.unwrap();

    assert_eq!(h.backend.last().authorization, None);
    assert!(h.navigator.redirects().is_empty());
}

#[actix_web::test]
async fn test_query_parameters_forwarded() {
    let h = harness(true).await;

    let query = ListQuery::new().page(2).limit(25).search("ada");
    h.api.students().list(&query).await.unwrap();

    let seen = h.backend.last();
    assert!(seen.query.contains("page=2"));
    assert!(seen.query.contains("limit=25"));
    assert!(seen.query.contains("search=ada"));
}

#[actix_web::test]
async fn test_unauthorized_clears_session_before_redirect() {
    let h = harness(true).await;

    let err = h.api.send(PendingRequest::get("/expired")).await.unwrap_err();

    assert!(matches!(err, ClientError::Unauthorized(ref msg) if msg == "Token expired"));
    assert!(!h.session.is_authenticated());
    assert_eq!(h.session.token(), None);
    assert_eq!(h.storage.load().unwrap(), None);
    assert_eq!(h.navigator.redirects(), vec![false]);
}

#[actix_web::test]
async fn test_unauthorized_while_anonymous_still_redirects() {
    let h = harness(false).await;

    let err = h.api.auth().me().await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(h.backend.last().authorization, None);
    assert_eq!(h.navigator.redirects(), vec![false]);
}

#[actix_web::test]
async fn test_api_error_passes_through_without_signing_out() {
    let h = harness(true).await;

    let err = h.api.students().get("missing").await.unwrap_err();

    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(message, "Student not found");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
    assert!(h.session.is_authenticated());
    assert!(h.navigator.redirects().is_empty());
}

#[actix_web::test]
async fn test_server_error_without_body_uses_status_reason() {
    let h = harness(true).await;

    let err = h.api.send(PendingRequest::get("/crash")).await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert!(matches!(err, ClientError::Api { ref message, .. } if message == "Internal Server Error"));
    assert!(h.session.is_authenticated());
}

#[actix_web::test]
async fn test_non_json_success_is_decode_error() {
    let h = harness(true).await;

    let err = h.api.send(PendingRequest::get("/broken")).await.unwrap_err();

    assert!(matches!(err, ClientError::Decode(_)));
    assert!(h.session.is_authenticated());
}

#[actix_web::test]
async fn test_invalid_path_never_reaches_backend() {
    let h = harness(true).await;

    let err = h.api.send(PendingRequest::get("students")).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));

    let err = h.api.students().get("").await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));

    assert!(h.backend.seen().is_empty());
}

#[actix_web::test]
async fn test_connection_refused_is_network_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = ClientConfig {
        api_url: format!("http://127.0.0.1:{}/api", port),
        timeout_ms: 2_000,
        ..ClientConfig::default()
    };
    let session = SessionStore::load(Arc::new(MemorySessionStorage::new()));
    let navigator = RecordingNavigator::new(session.clone());
    let api = ApiClient::new(&config, session, navigator.clone()).unwrap();

    let err = api.dashboard().stats().await.unwrap_err();

    assert!(matches!(err, ClientError::Network(_)));
    assert!(navigator.redirects().is_empty());
}
