//! Command execution - applies one chat message to a session

use crate::command::extractor::{TopicExtractor, Vocabulary};
use crate::command::resolver::{ContextResolver, ResolutionMode};
use crate::core::types::{ConversationId, TaskId, Topic};
use crate::session::{Role, Session};

/// Runs extract -> resolve -> record for each message
pub struct CommandExecutor {
    extractor: TopicExtractor,
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new(&Vocabulary::default())
    }
}

impl CommandExecutor {
    pub fn new(vocabulary: &Vocabulary) -> Self {
        Self {
            extractor: TopicExtractor::new(vocabulary),
        }
    }

    /// Execute a chat message against the session
    ///
    /// The task list, rolling context and chat log are all updated before
    /// this returns, so callers holding the session lock see a consistent
    /// state.
    pub fn execute(
        &self,
        session: &mut Session,
        message: &str,
        conversation_id: &ConversationId,
    ) -> ExecutionResult {
        let extraction = self.extractor.extract(message);
        tracing::debug!(?extraction, "extracted message");

        let resolution = ContextResolver::resolve(&extraction, &session.context);

        let created = !resolution.task.is_empty();
        let duplicate = created && session.tasks.contains(&resolution.task);
        let task_id = if created {
            let task = session.tasks.push(
                resolution.task.clone(),
                resolution.topic.clone(),
                message,
                resolution.mode,
            );
            Some(task.id)
        } else {
            None
        };

        session.context = resolution.history;

        let reply = reply_text(&resolution.task, created, duplicate);
        session.history.add_message(conversation_id, message, Role::User);
        session
            .history
            .add_message(conversation_id, reply.clone(), Role::Assistant);

        tracing::info!(
            task = %resolution.task,
            mode = ?resolution.mode,
            topic = ?resolution.topic,
            created,
            duplicate,
            context = %session.context.summary(),
            "resolved chat message"
        );

        ExecutionResult {
            task: resolution.task,
            topic: resolution.topic,
            mode: resolution.mode,
            task_id,
            created,
            duplicate,
            task_count: session.tasks.len(),
            reply,
        }
    }
}

/// Result of executing a chat message
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub task: String,
    pub topic: Option<Topic>,
    pub mode: ResolutionMode,
    /// Id of the appended task; `None` when nothing was added
    pub task_id: Option<TaskId>,
    pub created: bool,
    /// An equal task (ignoring case) was already on the list
    pub duplicate: bool,
    pub task_count: usize,
    /// Assistant reply recorded in the chat log
    pub reply: String,
}

fn reply_text(task: &str, created: bool, duplicate: bool) -> String {
    match (created, duplicate) {
        (false, _) => "Nothing to add - tell me what the task is".to_string(),
        (true, false) => format!("Task '{}' added", task),
        (true, true) => format!("Task '{}' added (it was already on your list)", task),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conv() -> ConversationId {
        ConversationId::from("test")
    }

    #[test]
    fn test_execute_appends_and_updates_context() {
        let executor = CommandExecutor::default();
        let mut session = Session::default();

        let result = executor.execute(&mut session, "buy biscuit", &conv());

        assert_eq!(result.task, "buy biscuit");
        assert!(result.created);
        assert_eq!(result.task_id, Some(1));
        assert_eq!(result.task_count, 1);
        assert_eq!(result.reply, "Task 'buy biscuit' added");
        assert_eq!(session.context.most_recent().unwrap().verb, "buy");
    }

    #[test]
    fn test_execute_records_both_turns() {
        let executor = CommandExecutor::default();
        let mut session = Session::default();

        executor.execute(&mut session, "clean kitchen", &conv());

        let messages = session.history.messages(&conv());
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "clean kitchen");
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[1].role, Role::Assistant);
    }

    #[test]
    fn test_empty_task_is_not_appended() {
        let executor = CommandExecutor::default();
        let mut session = Session::default();
        executor.execute(&mut session, "buy biscuit", &conv());

        let result = executor.execute(&mut session, "also", &conv());

        assert_eq!(result.task, "");
        assert!(!result.created);
        assert_eq!(result.task_id, None);
        assert_eq!(session.tasks.len(), 1);
    }

    #[test]
    fn test_duplicate_is_flagged() {
        let executor = CommandExecutor::default();
        let mut session = Session::default();
        executor.execute(&mut session, "buy eggs", &conv());

        let result = executor.execute(&mut session, "Buy Eggs", &conv());

        assert!(result.created);
        assert!(result.duplicate);
        assert_eq!(session.tasks.len(), 2);
    }

    #[test]
    fn test_custom_vocabulary() {
        let vocabulary = Vocabulary {
            verbs: vec![crate::command::extractor::VerbRule::new("cook", "kitchen")],
            continuation_markers: vec!["also".into()],
        };
        let executor = CommandExecutor::new(&vocabulary);
        let mut session = Session::default();

        executor.execute(&mut session, "cook pasta", &conv());
        let result = executor.execute(&mut session, "also soup", &conv());
        assert_eq!(result.task, "cook soup");

        let result = executor.execute(&mut session, "buy milk", &conv());
        assert_eq!(result.mode, ResolutionMode::Verbatim);
    }
}
