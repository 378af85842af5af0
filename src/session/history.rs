//! Per-conversation chat log

use crate::core::types::{ConversationId, MessageId};
use ahash::AHashMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who sent a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub content: String,
    pub role: Role,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub conversation_id: ConversationId,
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    fn new(conversation_id: ConversationId) -> Self {
        let now = Utc::now();
        Self {
            conversation_id,
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// All conversations seen by this process
#[derive(Debug, Clone, Default)]
pub struct ChatHistory {
    conversations: AHashMap<ConversationId, Conversation>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message, creating the conversation on first use
    pub fn add_message(
        &mut self,
        conversation_id: &ConversationId,
        content: impl Into<String>,
        role: Role,
    ) -> MessageId {
        let message = ChatMessage {
            id: MessageId::new(),
            content: content.into(),
            role,
            timestamp: Utc::now(),
        };
        let id = message.id;

        let conversation = self
            .conversations
            .entry(conversation_id.clone())
            .or_insert_with(|| Conversation::new(conversation_id.clone()));
        conversation.updated_at = message.timestamp;
        conversation.messages.push(message);

        tracing::debug!(conversation = %conversation_id, ?role, "recorded chat message");
        id
    }

    pub fn conversation(&self, conversation_id: &ConversationId) -> Option<&Conversation> {
        self.conversations.get(conversation_id)
    }

    /// Messages in a conversation; empty if it does not exist
    pub fn messages(&self, conversation_id: &ConversationId) -> &[ChatMessage] {
        self.conversations
            .get(conversation_id)
            .map(|c| c.messages.as_slice())
            .unwrap_or(&[])
    }

    pub fn conversations(&self) -> impl Iterator<Item = &Conversation> {
        self.conversations.values()
    }

    pub fn contains(&self, conversation_id: &ConversationId) -> bool {
        self.conversations.contains_key(conversation_id)
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_message_creates_conversation() {
        let mut history = ChatHistory::new();
        let id = ConversationId::from("conv-1");

        history.add_message(&id, "buy milk", Role::User);
        history.add_message(&id, "Task 'buy milk' added", Role::Assistant);

        assert!(history.contains(&id));
        assert_eq!(history.len(), 1);
        let messages = history.messages(&id);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[1].content, "Task 'buy milk' added");
    }

    #[test]
    fn test_updated_at_tracks_last_message() {
        let mut history = ChatHistory::new();
        let id = ConversationId::from("conv-2");
        history.add_message(&id, "first", Role::User);
        history.add_message(&id, "second", Role::User);

        let conversation = history.conversation(&id).unwrap();
        assert!(conversation.updated_at >= conversation.created_at);
        assert_eq!(conversation.updated_at, conversation.messages[1].timestamp);
    }

    #[test]
    fn test_unknown_conversation_is_empty() {
        let history = ChatHistory::new();
        let id = ConversationId::from("missing");
        assert!(history.messages(&id).is_empty());
        assert!(history.conversation(&id).is_none());
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
    }
}
