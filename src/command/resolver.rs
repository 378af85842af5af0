//! Context resolution - turns an extraction into a concrete task string
//!
//! Resolution is a pure function of the extraction and the rolling
//! context: the caller receives the updated context and decides whether
//! to keep it.

use crate::command::context::RollingContext;
use crate::command::extractor::Extraction;
use crate::core::types::Topic;
use serde::{Deserialize, Serialize};

/// How a task string was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMode {
    /// The message named its own verb
    Direct,
    /// A continuation completed with the most recent topic's verb
    Context,
    /// Recorded as written: no known verb, or a continuation with no
    /// context to draw on
    Verbatim,
}

/// Outcome of resolving one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The resolved task; empty for a bare continuation marker
    pub task: String,
    /// Topic the task belongs to, if any
    pub topic: Option<Topic>,
    pub mode: ResolutionMode,
    /// Context after this message
    pub history: RollingContext,
}

/// Resolves extractions against a rolling context
pub struct ContextResolver;

impl ContextResolver {
    /// Resolve an extraction to a task and the next context state
    pub fn resolve(extraction: &Extraction, history: &RollingContext) -> Resolution {
        let object = extraction.object.as_deref().unwrap_or("");

        if let Some(verb) = &extraction.verb {
            let mut history = history.clone();
            if let Some(topic) = &extraction.topic {
                history.upsert(topic.clone(), verb.clone());
            }
            return Resolution {
                task: join_task(verb, object),
                topic: extraction.topic.clone(),
                mode: ResolutionMode::Direct,
                history,
            };
        }

        if extraction.continuation {
            if let Some(entry) = history.most_recent() {
                let topic = entry.topic.clone();
                let task = if object.is_empty() {
                    String::new()
                } else {
                    join_task(&entry.verb, object)
                };
                let mut history = history.clone();
                history.refresh(&topic);
                return Resolution {
                    task,
                    topic: Some(topic),
                    mode: ResolutionMode::Context,
                    history,
                };
            }
        }

        Resolution {
            task: object.to_string(),
            topic: None,
            mode: ResolutionMode::Verbatim,
            history: history.clone(),
        }
    }
}

fn join_task(verb: &str, object: &str) -> String {
    if object.is_empty() {
        verb.to_string()
    } else {
        format!("{} {}", verb, object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::extractor::{TopicExtractor, Vocabulary};
    use proptest::prelude::*;

    fn run(extractor: &TopicExtractor, history: &RollingContext, text: &str) -> Resolution {
        ContextResolver::resolve(&extractor.extract(text), history)
    }

    #[test]
    fn test_shopping_then_cleaning_conversation() {
        let extractor = TopicExtractor::default();
        let history = RollingContext::default();

        let first = run(&extractor, &history, "buy biscuit");
        assert_eq!(first.task, "buy biscuit");
        assert_eq!(first.mode, ResolutionMode::Direct);
        assert_eq!(first.history.get(&Topic::new("shopping")).unwrap().verb, "buy");

        let second = run(&extractor, &first.history, "also eggs");
        assert_eq!(second.task, "buy eggs");
        assert_eq!(second.mode, ResolutionMode::Context);
        assert_eq!(second.topic, Some(Topic::new("shopping")));
        assert_eq!(second.history, first.history);

        let third = run(&extractor, &second.history, "clean kitchen");
        assert_eq!(third.task, "clean kitchen");
        assert_eq!(third.history.len(), 2);

        let fourth = run(&extractor, &third.history, "also bathroom");
        assert_eq!(fourth.task, "clean bathroom");
        assert_eq!(fourth.topic, Some(Topic::new("cleaning")));
    }

    #[test]
    fn test_continuation_without_context_is_verbatim() {
        let extractor = TopicExtractor::default();
        let resolution = run(&extractor, &RollingContext::default(), "also eggs");
        assert_eq!(resolution.task, "eggs");
        assert_eq!(resolution.mode, ResolutionMode::Verbatim);
        assert!(resolution.history.is_empty());
    }

    #[test]
    fn test_bare_marker_yields_empty_task() {
        let extractor = TopicExtractor::default();
        let mut history = RollingContext::default();
        history.upsert(Topic::new("shopping"), "buy");
        history.upsert(Topic::new("cleaning"), "clean");

        let resolution = run(&extractor, &history, "also");
        assert_eq!(resolution.task, "");
        assert_eq!(resolution.mode, ResolutionMode::Context);
        assert_eq!(resolution.history, history);
    }

    #[test]
    fn test_verb_without_object() {
        let extractor = TopicExtractor::default();
        let resolution = run(&extractor, &RollingContext::default(), "vacuum");
        assert_eq!(resolution.task, "vacuum");
        assert_eq!(resolution.mode, ResolutionMode::Direct);
        assert!(resolution.history.get(&Topic::new("cleaning")).is_some());
    }

    #[test]
    fn test_unknown_verb_leaves_history_alone() {
        let extractor = TopicExtractor::default();
        let mut history = RollingContext::default();
        history.upsert(Topic::new("shopping"), "buy");

        let resolution = run(&extractor, &history, "water the plants");
        assert_eq!(resolution.task, "water the plants");
        assert_eq!(resolution.mode, ResolutionMode::Verbatim);
        assert_eq!(resolution.history, history);
    }

    #[test]
    fn test_recency_not_insertion_order() {
        let extractor = TopicExtractor::default();
        let mut history = RollingContext::default();
        for text in ["buy milk", "clean sink", "pay rent", "also water bill"] {
            history = run(&extractor, &history, text).history;
        }
        let resolution = run(&extractor, &history, "buy bread");
        let resolution = run(&extractor, &resolution.history, "and butter");
        assert_eq!(resolution.task, "buy butter");
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let extractor = TopicExtractor::default();
        let mut history = RollingContext::default();
        history.upsert(Topic::new("shopping"), "buy");
        let extraction = extractor.extract("also jam");

        let a = ContextResolver::resolve(&extraction, &history);
        let b = ContextResolver::resolve(&extraction, &history);
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_continuation_uses_most_recent_verb(
            others in prop::collection::vec(0usize..12, 0..5),
            idx in 0usize..12,
            object in "[a-z]{1,8}( [a-z]{1,8}){0,2}",
        ) {
            let vocabulary = Vocabulary::default();
            let extractor = TopicExtractor::new(&vocabulary);
            let leading = extractor.extract(&object);
            prop_assume!(leading.verb.is_none() && !leading.continuation);

            let mut history = RollingContext::default();
            for i in others {
                let rule = &vocabulary.verbs[i];
                history.upsert(rule.topic.clone(), rule.verb.clone());
            }
            let rule = &vocabulary.verbs[idx];
            history.upsert(rule.topic.clone(), rule.verb.clone());

            let resolution = run(&extractor, &history, &format!("also {}", object));

            prop_assert_eq!(resolution.task, format!("{} {}", rule.verb, object));
            prop_assert_eq!(resolution.topic.as_ref(), Some(&rule.topic));
            for entry in history.iter_recent() {
                prop_assert_eq!(resolution.history.get(&entry.topic), Some(entry));
            }
        }
    }
}
