//! # Chat API Handlers
//!
//! File: cli/src/commands/serve/handlers.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The HTTP surface of the chat host. Each session is an entry in the
//! `SessionRegistry`; every handler receives the session id explicitly in
//! the path.
//!
//! | Method | Path                              | Result                                  |
//! |--------|-----------------------------------|-----------------------------------------|
//! | POST   | `/api/sessions`                   | 201 `{session_id, greeting}`            |
//! | POST   | `/api/sessions/{id}/messages`     | 200 `{reply, career}`                   |
//! | GET    | `/api/sessions/{id}/history`      | 200 `{session_id, started_at, last_active, turns}` |
//! | DELETE | `/api/sessions/{id}`              | 204                                     |
//! | GET    | `/api/roadmaps`                   | 200 `[{career, title, roadmap}]`        |
//! | GET    | `/health`                         | 200 `ok`                                |
//!
//! Every error is a JSON `{"error": "..."}` body: 400 for a malformed or
//! incomplete request body, 404 for an unknown or expired session, 500 otherwise.
//!
use crate::core::error::MentorError;
use crate::mentor::dispatcher::Dispatcher;
use crate::mentor::session::{SessionHandle, SessionId, SessionRegistry, Turn};
use crate::mentor::transport::BufferedResponder;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Shared state handed to every handler.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub dispatcher: Dispatcher,
    pub sessions: SessionRegistry,
}

#[derive(Debug, Serialize)]
struct StartSessionResponse {
    session_id: String,
    greeting: String,
}

#[derive(Debug, Deserialize)]
struct MessageRequest {
    content: String,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    reply: String,
    career: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct HistoryResponse {
    session_id: String,
    started_at: DateTime<Utc>,
    last_active: DateTime<Utc>,
    turns: Vec<Turn>,
}

#[derive(Debug, Serialize)]
struct RoadmapView {
    career: &'static str,
    title: String,
    roadmap: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Builds the chat API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/roadmaps", get(list_roadmaps))
        .route("/api/sessions", post(start_session))
        .route("/api/sessions/{id}", delete(end_session))
        .route("/api/sessions/{id}/messages", post(send_message))
        .route("/api/sessions/{id}/history", get(get_history))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn list_roadmaps(State(state): State<AppState>) -> Json<Vec<RoadmapView>> {
    let views = state
        .dispatcher
        .entries()
        .iter()
        .map(|entry| RoadmapView {
            career: entry.career_key,
            title: entry.title(),
            roadmap: entry.roadmap_text,
        })
        .collect();
    Json(views)
}

async fn start_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<StartSessionResponse>), ApiError> {
    let (id, handle) = state.sessions.start().await;
    let mut session = handle.lock().await;
    let mut responder = BufferedResponder::new();
    state
        .dispatcher
        .on_chat_start(&mut session.store, &mut responder)
        .await?;
    info!("Session {} started ({} active)", id, state.sessions.len().await);

    Ok((
        StatusCode::CREATED,
        Json(StartSessionResponse {
            session_id: id.to_string(),
            greeting: responder.into_last().unwrap_or_default(),
        }),
    ))
}

async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<MessageRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = payload?;
    let handle = lookup(&state, id).await?;
    let mut session = handle.lock().await;
    session.touch();
    let mut responder = BufferedResponder::new();
    let reply = state
        .dispatcher
        .on_message(&mut session.store, &request.content, &mut responder)
        .await?;

    Ok(Json(MessageResponse {
        reply: reply.text,
        career: reply.career,
    }))
}

async fn get_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let handle = lookup(&state, id).await?;
    let mut session = handle.lock().await;
    session.touch();
    let turns = session
        .store
        .history()
        .map_err(anyhow::Error::from)?
        .to_vec();

    Ok(Json(HistoryResponse {
        session_id: session.id.to_string(),
        started_at: session.started_at,
        last_active: session.last_active,
        turns,
    }))
}

async fn end_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = SessionId::from(id);
    if state.sessions.end(&id).await {
        info!("Session {} ended", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(
            MentorError::SessionNotFound { id: id.to_string() }.to_string(),
        ))
    }
}

async fn lookup(state: &AppState, id: String) -> Result<SessionHandle, ApiError> {
    let id = SessionId::from(id);
    state.sessions.get(&id).await.ok_or_else(|| {
        ApiError::NotFound(MentorError::SessionNotFound { id: id.to_string() }.to_string())
    })
}

// --- Error Handling ---

#[derive(Debug)]
enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<MentorError>() {
            Some(MentorError::SessionNotFound { .. }) => ApiError::NotFound(err.to_string()),
            _ => {
                error!("Request failed: {:?}", err);
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
