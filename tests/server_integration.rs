//! Router-level tests: pages, fragments and the chat flow.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{Json, Router, http::StatusCode, routing::get};
use axum_test::TestServer;
use portfolio_site::AppState;
use portfolio_site::backend::ChatBackend;
use portfolio_site::config::AppConfig;
use portfolio_site::error::{BackendError, BackendResult};
use portfolio_site::server::router;
use portfolio_site::session::{SESSION_COOKIE, SessionContext};
use serde_json::json;
use tokio::sync::Notify;

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}")
}

fn fake_cms() -> Router {
    Router::new()
        .route(
            "/api/homepage",
            get(|| async {
                Json(json!({"data": {
                    "headerTitle": "Jane Doe",
                    "chatSectionTitle": "Ask me",
                    "chatSectionDefaultAIMessage": "Bonjour ! Posez-moi une question.",
                    "portfolioSectionTitle": "Work"
                }}))
            }),
        )
        .route(
            "/api/projects",
            get(|| async {
                Json(json!({"data": [
                    {"title": "Inline", "markdown": "# Inline details"},
                    {"title": "Remote"}
                ]}))
            }),
        )
        .route("/api/skill-categories", get(|| async { Json(json!({"data": []})) }))
        .route("/api/experiences", get(|| async { Json(json!({"data": []})) }))
        .route("/api/contact-links", get(|| async { Json(json!({"data": []})) }))
}

/// Answers once released, so tests can observe the pending state.
#[derive(Default)]
struct GatedBackend {
    release: Notify,
    fail: bool,
}

#[async_trait]
impl ChatBackend for GatedBackend {
    async fn ask(&self, _session: &SessionContext, question: &str) -> BackendResult<String> {
        self.release.notified().await;
        if self.fail {
            Err(BackendError::Timeout)
        } else {
            Ok(format!("You asked: {question}"))
        }
    }
}

fn test_config(cms_url: &str, extra: &[&str]) -> AppConfig {
    let mut args = vec![
        "portfolio-site",
        "--cms-url",
        cms_url,
        "--backend-url",
        "http://127.0.0.1:9",
        "--rate-limit-enabled",
        "false",
    ];
    args.extend_from_slice(extra);
    AppConfig::load_from_args(args).expect("config")
}

async fn test_server(backend: Arc<GatedBackend>, extra: &[&str]) -> TestServer {
    let cms = spawn(fake_cms()).await;
    let mut state = AppState::from_config(Arc::new(test_config(&cms, extra))).expect("state");
    state.chat_backend = backend as Arc<dyn ChatBackend>;
    TestServer::builder()
        .save_cookies()
        .build(router(state))
        .expect("test server")
}

async fn wait_for(server: &TestServer, needle: &str) -> String {
    for _ in 0..50 {
        let html = server.get("/chat/messages").await.text();
        if html.contains(needle) {
            return html;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("chat log never contained {needle:?}");
}

#[tokio::test]
async fn test_homepage_renders_and_sets_session_cookie() {
    let server = test_server(Arc::default(), &[]).await;

    let response = server.get("/").await;
    response.assert_status_ok();

    let cookie = response.cookie(SESSION_COOKIE);
    assert!(SessionContext::from_id(cookie.value()).is_some());

    let html = response.text();
    assert!(html.contains("<title>Jane Doe</title>"));
    assert!(html.contains("Ask me"));
    assert!(html.contains("Bonjour ! Posez-moi une question."));
    assert!(html.contains(r#"hx-get="/projects/1/details""#));
}

#[tokio::test]
async fn test_homepage_cms_down_is_bad_gateway() {
    let cms = spawn(Router::new()).await;
    let state = AppState::from_config(Arc::new(test_config(&cms, &[]))).expect("state");
    let server = TestServer::new(router(state)).expect("test server");

    let response = server.get("/").await;
    response.assert_status(StatusCode::BAD_GATEWAY);
    assert!(response.text().contains("could not be loaded"));
}

#[tokio::test]
async fn test_chat_flow_pending_then_answered() {
    let backend = Arc::new(GatedBackend::default());
    let server = test_server(Arc::clone(&backend), &[]).await;

    let response = server
        .post("/chat")
        .form(&json!({"message": "What do you build?"}))
        .await;
    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("What do you build?"));
    assert!(html.contains("typing-dots"));
    assert!(html.contains(r#"hx-trigger="every 1s""#));

    // A second question is ignored while the first is outstanding
    let busy = server.post("/chat").form(&json!({"message": "Hello?"})).await.text();
    assert!(!busy.contains("Hello?"));

    backend.release.notify_one();
    let html = wait_for(&server, "You asked: What do you build?").await;
    assert!(!html.contains("typing-dots"));
    assert!(!html.contains("hx-trigger"));
}

#[tokio::test]
async fn test_chat_timeout_shows_error_bubble() {
    let backend = Arc::new(GatedBackend {
        fail: true,
        ..Default::default()
    });
    let server = test_server(Arc::clone(&backend), &[]).await;

    server.post("/chat").form(&json!({"message": "hi"})).await;
    backend.release.notify_one();

    let html = wait_for(&server, "chat-bubble-error").await;
    assert!(html.contains("The server took too long to respond."));
}

#[tokio::test]
async fn test_empty_chat_message_is_ignored() {
    let server = test_server(Arc::default(), &[]).await;

    let html = server.post("/chat").form(&json!({"message": "   "})).await.text();
    assert!(!html.contains("typing-dots"));
    assert_eq!(html.matches("data-message-id").count(), 1);
}

#[tokio::test]
async fn test_reads_never_create_sessions() {
    let cms = spawn(fake_cms()).await;
    let mut state = AppState::from_config(Arc::new(test_config(&cms, &[]))).expect("state");
    let backend = Arc::new(GatedBackend::default());
    state.chat_backend = Arc::clone(&backend) as Arc<dyn ChatBackend>;
    let sessions = state.sessions.clone();
    // No cookie jar: every request looks like a new visitor
    let server = TestServer::new(router(state)).expect("test server");

    for _ in 0..50 {
        server.get("/chat/messages").await.assert_status_ok();
    }
    for _ in 0..5 {
        server.get("/").await.assert_status_ok();
    }
    server
        .post("/chat")
        .form(&json!({"message": "  "}))
        .await
        .assert_status_ok();
    assert_eq!(sessions.len(), 0);

    let html = server
        .post("/chat")
        .form(&json!({"message": "Hello"}))
        .await
        .text();
    assert_eq!(sessions.len(), 1);
    // A new conversation opens with the CMS greeting
    assert!(html.contains("Bonjour ! Posez-moi une question."));
    assert!(html.contains("Hello"));
    backend.release.notify_one();
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let backend = Arc::new(GatedBackend::default());
    let server = test_server(Arc::clone(&backend), &[]).await;
    server.post("/chat").form(&json!({"message": "mine"})).await;

    let other = server
        .get("/chat/messages")
        .clear_cookies()
        .await
        .text();
    assert!(!other.contains("mine"));
}

#[tokio::test]
async fn test_project_details() {
    let server = test_server(Arc::default(), &[]).await;

    let inline = server.get("/projects/0/details").await;
    inline.assert_status_ok();
    assert!(inline.text().contains("<h1>Inline details</h1>"));

    server
        .get("/projects/7/details")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_contact_validation_fragment() {
    let server = test_server(Arc::default(), &[]).await;

    let response = server
        .post("/contact")
        .form(&json!({"firstName": "Ada", "lastName": "", "email": "", "message": "Hi"}))
        .await;
    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("text-error"));
    assert!(html.contains("Please fill in"));
}

#[tokio::test]
async fn test_form_endpoints_are_rate_limited() {
    let cms = spawn(fake_cms()).await;
    let mut config = test_config(&cms, &[]);
    config.resilience.rate_limit_enabled = true;
    config.resilience.requests_per_second = 0.001;
    config.resilience.burst_size = 2.0;
    let state = AppState::from_config(Arc::new(config)).expect("state");
    let server = TestServer::new(router(state)).expect("test server");

    for _ in 0..2 {
        server
            .post("/chat")
            .form(&json!({"message": ""}))
            .await
            .assert_status_ok();
    }
    server
        .post("/chat")
        .form(&json!({"message": ""}))
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);

    // Pages are not limited
    server.get("/health").await.assert_status_ok();
}

#[tokio::test]
async fn test_health() {
    let server = test_server(Arc::default(), &[]).await;
    let body: serde_json::Value = server.get("/health").await.json();
    assert_eq!(body["status"], "ok");
}
