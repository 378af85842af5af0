//! HTTP surface
//!
//! Routes:
//! - `POST /api/v1/chat` - resolve a message into a task
//! - `GET /api/v1/tasks` - list tasks in creation order
//! - `GET /api/v1/conversations` - every conversation with its message count
//! - `GET /api/v1/conversations/:conversation_id` - chat log for one conversation
//! - `GET /health` - liveness, never touches the session

pub mod error;
pub mod models;
pub mod routes;

use crate::command::executor::CommandExecutor;
use crate::core::config::AppSettings;
use crate::core::error::Result;
use crate::session::Session;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared handler state
///
/// The whole session sits behind one lock: a chat turn reads the rolling
/// context and appends to the task list, and both must move together.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<Session>>,
    pub executor: Arc<CommandExecutor>,
    pub settings: Arc<AppSettings>,
}

impl AppState {
    pub fn new(settings: AppSettings) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::new(settings.context.max_topics))),
            executor: Arc::new(CommandExecutor::new(&settings.vocabulary)),
            settings: Arc::new(settings),
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let api_v1 = Router::new()
        .route("/chat", post(routes::chat))
        .route("/tasks", get(routes::list_tasks))
        .route("/conversations", get(routes::list_conversations))
        .route(
            "/conversations/:conversation_id",
            get(routes::get_conversation),
        );

    Router::new()
        .route("/health", get(routes::health))
        .nest("/api/v1", api_v1)
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl-C
pub async fn serve(settings: AppSettings) -> Result<()> {
    let address = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;

    tracing::info!(
        service = %settings.service_name,
        version = %settings.version,
        environment = %settings.environment,
        %address,
        "listening"
    );

    let app = router(AppState::new(settings));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
