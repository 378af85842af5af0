//! Process-wide session state
//!
//! Holds everything a chat turn mutates: the task list, the rolling
//! topic context and the chat log. The HTTP layer keeps one `Session`
//! behind a single lock so a turn is applied atomically.

pub mod history;
pub mod tasks;

pub use history::{ChatHistory, ChatMessage, Conversation, Role};
pub use tasks::{Task, TaskList};

use crate::command::context::RollingContext;

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub tasks: TaskList,
    pub context: RollingContext,
    pub history: ChatHistory,
}

impl Session {
    /// Empty session remembering at most `max_topics` topics
    pub fn new(max_topics: usize) -> Self {
        Self {
            tasks: TaskList::new(),
            context: RollingContext::new(max_topics),
            history: ChatHistory::new(),
        }
    }
}
