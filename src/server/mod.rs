//! HTTP surface of the site.

mod rate_limit;
mod routes;

pub use rate_limit::{SimpleRateLimiter, rate_limit_middleware};

use axum::{
    Router,
    extract::{DefaultBodyLimit, Request},
    http::StatusCode,
    middleware::Next,
    response::IntoResponse,
    routing::{get, post},
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::AppState;
use crate::backend::{BackendClient, ChatBackend};
use crate::cms::CmsClient;
use crate::config::AppConfig;
use crate::markdown::MarkdownLoader;
use crate::session::SessionStore;

/// How often idle chat sessions are swept.
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

impl AppState {
    /// Build clients and stores from configuration.
    pub fn from_config(config: Arc<AppConfig>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let cms = CmsClient::with_client(
            &config.cms.base_url,
            config.cms.api_key.clone(),
            http.clone(),
        )?;
        let backend = BackendClient::with_client(&config.backend.base_url, http.clone())?
            .with_chat_timeout(Duration::from_secs(config.backend.chat_timeout_secs));
        let backend = Arc::new(backend);
        let chat_backend: Arc<dyn ChatBackend> = backend.clone();

        Ok(Self {
            cms: Arc::new(cms),
            backend,
            chat_backend,
            sessions: SessionStore::new(config.chat.greeting.clone()),
            markdown: Arc::new(MarkdownLoader::with_client(
                http,
                config.site.markdown_fallback.clone(),
            )),
            rate_limiter: Arc::new(SimpleRateLimiter::new(
                config.resilience.requests_per_second,
                config.resilience.burst_size,
            )),
            config,
        })
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    // We use a large timeout if disabled instead of conditional layering to keep types consistent
    let timeout_duration = if state.config.resilience.timeout_disabled {
        Duration::from_secs(365 * 24 * 60 * 60) // 1 year
    } else {
        Duration::from_secs(30)
    };

    let actions = Router::new()
        .route("/chat", post(routes::chat_send))
        .route("/contact", post(routes::contact))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health))
        .route("/chat/messages", get(routes::chat_messages))
        .route("/projects/{index}/details", get(routes::project_details))
        .merge(actions)
        .nest_service("/static", ServeDir::new(&state.config.site.static_dir))
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(axum::middleware::from_fn(
            move |req: Request, next: Next| async move {
                match tokio::time::timeout(timeout_duration, next.run(req)).await {
                    Ok(res) => res,
                    Err(_) => (StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response(),
                }
            },
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    info!(
        name: "config.loaded",
        cms = %config.cms.base_url,
        backend = %config.backend.base_url,
        cms_auth = config.cms.api_key.is_some(),
        "Configuration loaded"
    );

    let state = AppState::from_config(Arc::clone(&config))?;

    let sessions = state.sessions.clone();
    let ttl = Duration::from_secs(config.chat.session_ttl_secs);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let removed = sessions.cleanup_expired_with_timeout(ttl);
            if removed > 0 {
                info!(name: "session.sweep", removed, remaining = sessions.len(), "Expired chat sessions removed");
            }
        }
    });

    let app = router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
