//! Relay API server for the AI GROW widget.
//!
//! Carries both wire contracts: `/api/ask-ai` (resolver + completion
//! fallback) and `/api/ask` (static table only), plus the history and
//! preference endpoints backing the widget's persistence.

use crate::agent::{GrowAgent, Reply, Source, PROMPT_REQUIRED_REPLY};
use crate::config::Config;
use crate::services::storage::{SqliteStorage, StoredMessage};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};

/// Shared application state. The agent is stateless; the history store is
/// the only thing behind a lock.
pub struct AppState {
    pub agent: GrowAgent,
    pub storage: Option<Mutex<SqliteStorage>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let storage = if config.history_enabled {
            match SqliteStorage::new(config.db_path.clone()) {
                Ok(s) => Some(Mutex::new(s)),
                Err(e) => {
                    log::warn!("⚠️ History store unavailable: {}", e);
                    None
                }
            }
        } else {
            log::info!("📴 History persistence disabled");
            None
        };

        Self {
            agent: GrowAgent::new(config),
            storage,
        }
    }
}

type SharedState = Arc<AppState>;

#[derive(Debug, Deserialize)]
pub struct AskAiRequest {
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskAiResponse {
    pub reply: String,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub completion_backend: bool,
    pub messages: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClearHistoryResponse {
    pub cleared: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PreferenceRequest {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PreferenceResponse {
    pub key: String,
    pub value: Option<String>,
}

pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/api/ask-ai", post(ask_ai))
        .route("/api/ask", post(ask))
        .route("/api/health", get(health))
        .route("/api/history", get(history).delete(clear_history))
        .route("/api/preferences", post(set_preference))
        .route("/api/preferences/:key", get(get_preference))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// Binds and serves until the process is stopped.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState::new(config));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("✅ Backend running at http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

/// POST /api/ask-ai — resolver first, completion fallback second.
async fn ask_ai(
    State(state): State<SharedState>,
    Json(req): Json<AskAiRequest>,
) -> (StatusCode, Json<AskAiResponse>) {
    if req.prompt.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(AskAiResponse {
                reply: PROMPT_REQUIRED_REPLY.to_string(),
            }),
        );
    }

    let reply = state.agent.answer(&req.prompt).await;
    persist_exchange(&state, &req.prompt, &reply).await;

    let status = if reply.source == Source::Error {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };

    (status, Json(AskAiResponse { reply: reply.text }))
}

/// POST /api/ask — static answer table only, no live-model fallback.
async fn ask(
    State(state): State<SharedState>,
    Json(req): Json<AskRequest>,
) -> Json<AskResponse> {
    let reply = state.agent.answer_canned(&req.question);
    Json(AskResponse { answer: reply.text })
}

async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let messages = match &state.storage {
        Some(storage) => storage.lock().await.message_count().ok(),
        None => None,
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        completion_backend: state.agent.has_completion_backend(),
        messages,
    })
}

async fn history(
    State(state): State<SharedState>,
) -> Result<Json<Vec<StoredMessage>>, (StatusCode, String)> {
    let Some(storage) = &state.storage else {
        return Err(no_store());
    };

    let storage = storage.lock().await;
    storage.load_session_history().map(Json).map_err(|e| {
        log::error!("Failed to load history: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })
}

async fn clear_history(
    State(state): State<SharedState>,
) -> Result<Json<ClearHistoryResponse>, (StatusCode, String)> {
    let Some(storage) = &state.storage else {
        return Err(no_store());
    };

    let storage = storage.lock().await;
    storage
        .clear_session_history()
        .map(|cleared| Json(ClearHistoryResponse { cleared }))
        .map_err(|e| {
            log::error!("Failed to clear history: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })
}

async fn set_preference(
    State(state): State<SharedState>,
    Json(req): Json<PreferenceRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    let Some(storage) = &state.storage else {
        return Err(no_store());
    };

    let storage = storage.lock().await;
    storage.set_preference(&req.key, &req.value).map_err(|e| {
        log::error!("Failed to store preference {}: {}", req.key, e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    Ok(StatusCode::NO_CONTENT)
}

async fn get_preference(
    State(state): State<SharedState>,
    Path(key): Path<String>,
) -> Result<Json<PreferenceResponse>, (StatusCode, String)> {
    let Some(storage) = &state.storage else {
        return Err(no_store());
    };

    let storage = storage.lock().await;
    let value = storage.get_preference(&key).map_err(|e| {
        log::error!("Failed to read preference {}: {}", key, e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    Ok(Json(PreferenceResponse { key, value }))
}

fn no_store() -> (StatusCode, String) {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        "History store is disabled".to_string(),
    )
}

/// Mirrors what the widget displayed, error bubbles included.
async fn persist_exchange(state: &AppState, question: &str, reply: &Reply) {
    let Some(storage) = &state.storage else {
        return;
    };

    let storage = storage.lock().await;
    let source = reply.source.as_str();

    if let Err(e) = storage.save_message("user", question, source) {
        log::error!("Failed to persist user message: {}", e);
    }
    if let Err(e) = storage.save_message("ai", &reply.text, source) {
        log::error!("Failed to persist ai message: {}", e);
    }
}
