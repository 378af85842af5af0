//! Request handlers

use crate::api::error::ApiError;
use crate::api::models::{
    ChatRequest, ChatResponse, ConversationListResponse, ConversationSummary,
    HealthCheckResponse, TaskListResponse,
};
use crate::api::AppState;
use crate::core::error::TodoError;
use crate::core::types::ConversationId;
use crate::session::Conversation;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;

/// Longest message prefix written to the request log
const LOG_PREVIEW_CHARS: usize = 100;

/// `POST /api/v1/chat`
///
/// Malformed bodies are rejected before the session is touched.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) =
        payload.map_err(|rejection| TodoError::InvalidRequest(rejection.body_text()))?;

    let message = request.message.trim();
    if message.is_empty() {
        return Err(TodoError::InvalidRequest("message must not be empty".into()).into());
    }

    let conversation_id = request
        .conversation_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(ConversationId::from)
        .unwrap_or_default();

    tracing::info!(
        conversation = %conversation_id,
        message = %preview(message),
        "processing chat request"
    );

    let result = {
        let mut session = state.session.lock().await;
        state.executor.execute(&mut session, message, &conversation_id)
    };

    Ok(Json(ChatResponse::new(
        result,
        request.message.clone(),
        conversation_id,
    )))
}

/// `GET /api/v1/tasks`
pub async fn list_tasks(State(state): State<AppState>) -> Json<TaskListResponse> {
    let names = state.session.lock().await.tasks.names();
    Json(TaskListResponse::new(names))
}

/// `GET /api/v1/conversations`, oldest first
pub async fn list_conversations(State(state): State<AppState>) -> Json<ConversationListResponse> {
    let mut conversations: Vec<ConversationSummary> = state
        .session
        .lock()
        .await
        .history
        .conversations()
        .map(ConversationSummary::from)
        .collect();
    conversations.sort_by_key(|c| c.created_at);

    Json(ConversationListResponse {
        success: true,
        total_count: conversations.len(),
        conversations,
    })
}

/// `GET /api/v1/conversations/:conversation_id`
pub async fn get_conversation(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
) -> Result<Json<Conversation>, ApiError> {
    let id = ConversationId(conversation_id);
    let conversation = state.session.lock().await.history.conversation(&id).cloned();
    match conversation {
        Some(conversation) => Ok(Json(conversation)),
        None => Err(TodoError::NotFound(format!("conversation '{}'", id)).into()),
    }
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".into(),
        service_name: state.settings.service_name.clone(),
        version: state.settings.version.clone(),
        environment: state.settings.environment.clone(),
        timestamp: Utc::now(),
    })
}

fn preview(message: &str) -> String {
    if message.chars().count() <= LOG_PREVIEW_CHARS {
        message.to_string()
    } else {
        let head: String = message.chars().take(LOG_PREVIEW_CHARS).collect();
        format!("{}...", head)
    }
}
