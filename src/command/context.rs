//! Rolling topic context
//!
//! Remembers which verb was last used for each topic, ordered by
//! recency. Continuation messages ("also eggs") borrow the verb of the
//! most recently touched topic.

use crate::core::types::Topic;
use serde::Serialize;

/// Default number of topics remembered
pub const DEFAULT_MAX_TOPICS: usize = 8;

/// Verb last used with a topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextEntry {
    pub topic: Topic,
    pub verb: String,
}

/// Recency-ordered set of context entries, at most one per topic
///
/// Entries are stored oldest first; the last entry is the most recently
/// touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollingContext {
    entries: Vec<ContextEntry>,
    #[serde(skip)]
    max_topics: usize,
}

impl Default for RollingContext {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TOPICS)
    }
}

impl RollingContext {
    pub fn new(max_topics: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_topics: max_topics.max(1),
        }
    }

    /// Record `verb` for `topic` and make it the most recent entry
    ///
    /// Replaces any existing entry for the topic. Evicts the least
    /// recently touched entry when full; `AppSettings::validate` sizes the
    /// context to hold every vocabulary topic, so a configured service
    /// never reaches that branch.
    pub fn upsert(&mut self, topic: Topic, verb: impl Into<String>) {
        self.entries.retain(|e| e.topic != topic);
        if self.entries.len() >= self.max_topics {
            self.entries.remove(0);
        }
        self.entries.push(ContextEntry {
            topic,
            verb: verb.into(),
        });
    }

    /// Move the entry for `topic` to the most recent position
    ///
    /// Returns false if the topic is not remembered.
    pub fn refresh(&mut self, topic: &Topic) -> bool {
        match self.entries.iter().position(|e| &e.topic == topic) {
            Some(idx) => {
                let entry = self.entries.remove(idx);
                self.entries.push(entry);
                true
            }
            None => false,
        }
    }

    /// The most recently touched entry across all topics
    pub fn most_recent(&self) -> Option<&ContextEntry> {
        self.entries.last()
    }

    pub fn get(&self, topic: &Topic) -> Option<&ContextEntry> {
        self.entries.iter().find(|e| &e.topic == topic)
    }

    /// Entries from most to least recently touched
    pub fn iter_recent(&self) -> impl Iterator<Item = &ContextEntry> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One-line summary for log output
    pub fn summary(&self) -> String {
        if self.entries.is_empty() {
            return "(empty)".into();
        }
        self.iter_recent()
            .map(|e| format!("{}: {}", e.topic, e.verb))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
