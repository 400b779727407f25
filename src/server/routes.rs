use std::sync::Arc;

use axum::{
    Form, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::AppState;
use crate::backend::ContactForm;
use crate::chat::{ChatError, ChatLog, ChatMessage, answer_turn};
use crate::cms::HomepageData;
use crate::error::ServerError;
use crate::markdown::MarkdownSource;
use crate::session::{SESSION_COOKIE, SessionContext};
use crate::ui;

/// Identify the visitor from the cookie, issuing a cookie if needed.
///
/// Only the id is resolved here; chat state is stored once the visitor
/// actually sends a message.
fn visitor(jar: CookieJar) -> (CookieJar, SessionContext) {
    let existing = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());
    let (context, created) = SessionContext::resume_or_generate(existing.as_deref());

    let jar = if created {
        let cookie = Cookie::build((SESSION_COOKIE, context.id().to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax);
        jar.add(cookie)
    } else {
        jar
    };

    (jar, context)
}

/// Messages of an existing conversation, marking the visitor active.
fn stored_messages(state: &AppState, context: &SessionContext) -> Option<Vec<ChatMessage>> {
    state.sessions.get(context.id()).map(|session| {
        session.touch();
        session.messages()
    })
}

/// Log shown before the visitor has said anything.
fn greeting_only(greeting: &str) -> Vec<ChatMessage> {
    ChatLog::with_greeting(greeting).messages().to_vec()
}

/// Greeting for a new conversation: the CMS copy, else the configured one.
async fn cms_greeting(state: &AppState) -> String {
    match state.cms.homepage_sections().await {
        Ok(sections) => sections
            .chat_greeting()
            .unwrap_or(state.sessions.greeting())
            .to_string(),
        Err(err) => {
            warn!(name: "chat.greeting.fallback", error = %err, "Using configured chat greeting");
            state.sessions.greeting().to_string()
        }
    }
}

/// GET / - Render the homepage from CMS content.
pub async fn index(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (jar, context) = visitor(jar);

    match HomepageData::load(&state.cms).await {
        Ok(data) => {
            let messages = stored_messages(&state, &context).unwrap_or_else(|| {
                greeting_only(
                    data.sections
                        .chat_greeting()
                        .unwrap_or(state.sessions.greeting()),
                )
            });
            let page = ui::homepage(
                &data,
                &messages,
                &state.config.carousel,
                &state.config.site.title,
            );
            (jar, Html(page)).into_response()
        }
        Err(err) => {
            error!(name: "page.homepage.failed", error = %err, status = ?err.status(), "Homepage content unavailable");
            let page = ui::error_page(
                &state.config.site.title,
                "The content of this page could not be loaded. Please try again later.",
            );
            (StatusCode::BAD_GATEWAY, jar, Html(page)).into_response()
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    sessions: usize,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        sessions: state.sessions.len(),
    })
}

/// Chat form body.
#[derive(Debug, Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    message: String,
}

/// POST /chat - Queue a question and return the updated log.
///
/// The backend round-trip runs in the background; the returned log polls
/// until the placeholder is replaced. A conversation is stored only once a
/// non-empty message is accepted.
pub async fn chat_send(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<ChatForm>,
) -> impl IntoResponse {
    let (jar, context) = visitor(jar);

    let session = match state.sessions.get(context.id()) {
        Some(session) => session,
        None if form.message.trim().is_empty() => {
            let greeting = cms_greeting(&state).await;
            return (jar, Html(ui::chat::chat_log(&greeting_only(&greeting))));
        }
        None => {
            let greeting = cms_greeting(&state).await;
            state.sessions.get_or_create_with_greeting(&context, &greeting)
        }
    };

    match session.submit(&form.message) {
        Ok(turn) => {
            info!(
                name: "chat.submitted",
                session_id = %session.context(),
                pending_id = %turn.pending_id,
                "Chat message queued"
            );
            let backend = Arc::clone(&state.chat_backend);
            let session = session.clone();
            tokio::spawn(async move {
                let outcome = answer_turn(backend.as_ref(), session.context(), &turn).await;
                session.resolve(turn.pending_id, outcome);
            });
        }
        Err(ChatError::Busy) => {
            warn!(name: "chat.busy", session_id = %session.context(), "Message ignored while waiting");
        }
        Err(ChatError::EmptyMessage) => {}
    }

    (jar, Html(ui::chat::chat_log(&session.messages())))
}

/// GET /chat/messages - Current chat log fragment.
///
/// Visitors without a conversation get the configured greeting; nothing is
/// stored for them.
pub async fn chat_messages(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let (jar, context) = visitor(jar);
    let messages = stored_messages(&state, &context)
        .unwrap_or_else(|| greeting_only(state.sessions.greeting()));
    (jar, Html(ui::chat::chat_log(&messages)))
}

/// POST /contact - Relay the contact form to the backend.
///
/// Always answers 200 with a status fragment so HTMX swaps it in.
pub async fn contact(State(state): State<AppState>, Form(form): Form<ContactForm>) -> Html<String> {
    let missing = form.missing_fields();
    if !missing.is_empty() {
        return Html(ui::sections::contact_status(
            false,
            &format!("Please fill in: {}.", missing.join(", ")),
        ));
    }

    match state.backend.send_contact(&form).await {
        Ok(receipt) => {
            info!(name: "contact.sent", "Contact form relayed");
            Html(ui::sections::contact_status(true, &receipt.message))
        }
        Err(err) => {
            warn!(name: "contact.failed", timeout = err.is_timeout(), error = %err, "Contact form relay failed");
            Html(ui::sections::contact_status(false, &err.to_string()))
        }
    }
}

/// GET /projects/{index}/details - Project modal with its markdown.
pub async fn project_details(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Html<String>, ServerError> {
    let projects = state.cms.projects().await?;
    let project = projects
        .get(index)
        .ok_or(ServerError::ProjectNotFound(index))?;

    let details = state
        .markdown
        .load(&MarkdownSource {
            inline: project.markdown.clone(),
            url: project.markdown_url.clone(),
        })
        .await;

    Ok(Html(ui::sections::project_modal(project, &details)))
}
