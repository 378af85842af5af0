pub mod config;
pub mod error;
pub mod types;

pub use config::{AppSettings, ContextConfig};
pub use error::{Result, TodoError};
pub use types::{ConversationId, MessageId, TaskId, Topic};
