//! Append-only task list

use crate::command::resolver::ResolutionMode;
use crate::core::types::{TaskId, Topic};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A resolved to-do item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub topic: Option<Topic>,
    /// The chat message the task was resolved from
    pub utterance: String,
    pub mode: ResolutionMode,
    pub created_at: DateTime<Utc>,
}

/// Tasks in creation order
///
/// Tasks are never reordered or removed. Lookups by name ignore case.
#[derive(Debug, Clone, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn push(
        &mut self,
        text: impl Into<String>,
        topic: Option<Topic>,
        utterance: impl Into<String>,
        mode: ResolutionMode,
    ) -> &Task {
        let id = self.tasks.len() as TaskId + 1;
        self.tasks.push(Task {
            id,
            text: text.into(),
            topic,
            utterance: utterance.into(),
            mode,
            created_at: Utc::now(),
        });
        &self.tasks[self.tasks.len() - 1]
    }

    /// First task whose text matches `name`, ignoring case
    pub fn get(&self, name: &str) -> Option<&Task> {
        let name = name.to_lowercase();
        self.tasks.iter().find(|t| t.text.to_lowercase() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn by_id(&self, id: TaskId) -> Option<&Task> {
        id.checked_sub(1).and_then(|idx| self.tasks.get(idx as usize))
    }

    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    /// Task texts in creation order
    pub fn names(&self) -> Vec<String> {
        self.tasks.iter().map(|t| t.text.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
