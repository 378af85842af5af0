//! Request and response bodies for the HTTP API

use crate::command::executor::ExecutionResult;
use crate::command::resolver::ResolutionMode;
use crate::core::types::{ConversationId, TaskId, Topic};
use crate::session::Conversation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Free-text message; must not be blank
    pub message: String,
    /// Conversation to append to; generated when absent
    #[serde(default)]
    pub conversation_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The resolved task ("buy eggs")
    pub task: String,
    /// Echo of the message as received
    pub message: String,
    /// Assistant reply text
    pub response: String,
    pub topic: Option<Topic>,
    pub resolution: ResolutionMode,
    pub task_id: Option<TaskId>,
    pub created: bool,
    pub duplicate: bool,
    pub task_count: usize,
    pub conversation_id: ConversationId,
    pub success: bool,
}

impl ChatResponse {
    pub fn new(result: ExecutionResult, message: String, conversation_id: ConversationId) -> Self {
        Self {
            task: result.task,
            message,
            response: result.reply,
            topic: result.topic,
            resolution: result.mode,
            task_id: result.task_id,
            created: result.created,
            duplicate: result.duplicate,
            task_count: result.task_count,
            conversation_id,
            success: true,
        }
    }
}

/// Body of `GET /api/v1/tasks`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskListResponse {
    pub success: bool,
    pub tasks: Vec<String>,
    pub total_count: usize,
    pub message: String,
}

impl TaskListResponse {
    pub fn new(tasks: Vec<String>) -> Self {
        let message = if tasks.is_empty() {
            "No tasks found"
        } else {
            "Tasks retrieved successfully"
        };
        Self {
            success: true,
            total_count: tasks.len(),
            tasks,
            message: message.into(),
        }
    }
}

/// One row of `GET /api/v1/conversations`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub conversation_id: ConversationId,
    pub message_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Conversation> for ConversationSummary {
    fn from(conversation: &Conversation) -> Self {
        Self {
            conversation_id: conversation.conversation_id.clone(),
            message_count: conversation.messages.len(),
            created_at: conversation.created_at,
            updated_at: conversation.updated_at,
        }
    }
}

/// Body of `GET /api/v1/conversations`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationListResponse {
    pub success: bool,
    pub conversations: Vec<ConversationSummary>,
    pub total_count: usize,
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub service_name: String,
    pub version: String,
    pub environment: String,
    pub timestamp: DateTime<Utc>,
}

/// JSON body for every error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}
