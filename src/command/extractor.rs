//! Topic extraction from free-text chat messages
//!
//! An utterance is split into words and matched against an ordered
//! verb table. A leading continuation marker ("also eggs") produces an
//! extraction with no verb, which the resolver completes from context.

use crate::core::types::Topic;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Punctuation ignored at the end of a word when matching vocabulary
const TRAILING_PUNCTUATION: &[char] = &[',', '.', ';', ':', '!', '?'];

/// One row of the verb table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbRule {
    /// Verb as written in tasks; may span several words ("pick up")
    pub verb: String,
    /// Topic the verb establishes
    pub topic: Topic,
}

impl VerbRule {
    pub fn new(verb: &str, topic: &str) -> Self {
        Self {
            verb: verb.to_string(),
            topic: Topic::new(topic),
        }
    }
}

/// Verb table and continuation vocabulary
///
/// The verb table is checked in order and the first matching row wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    pub verbs: Vec<VerbRule>,
    pub continuation_markers: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            verbs: vec![
                VerbRule::new("buy", "shopping"),
                VerbRule::new("get", "shopping"),
                VerbRule::new("pick up", "shopping"),
                VerbRule::new("order", "shopping"),
                VerbRule::new("clean", "cleaning"),
                VerbRule::new("wash", "cleaning"),
                VerbRule::new("tidy", "cleaning"),
                VerbRule::new("vacuum", "cleaning"),
                VerbRule::new("call", "calls"),
                VerbRule::new("email", "correspondence"),
                VerbRule::new("pay", "bills"),
                VerbRule::new("fix", "repairs"),
            ],
            continuation_markers: vec!["also".into(), "and".into(), "plus".into()],
        }
    }
}

impl Vocabulary {
    /// Number of distinct topics the verb table can establish
    pub fn topic_count(&self) -> usize {
        self.verbs
            .iter()
            .map(|rule| &rule.topic)
            .collect::<BTreeSet<_>>()
            .len()
    }

    pub fn validate(&self) -> Result<(), String> {
        for rule in &self.verbs {
            if rule.verb.trim().is_empty() {
                return Err("vocabulary verbs must not be empty".into());
            }
            if rule.topic.as_str().trim().is_empty() {
                return Err(format!("verb '{}' has an empty topic", rule.verb));
            }
        }

        for marker in &self.continuation_markers {
            if marker.trim().is_empty() || marker.split_whitespace().count() != 1 {
                return Err(format!(
                    "continuation marker '{}' must be a single word",
                    marker
                ));
            }
            let collides = self.verbs.iter().any(|rule| {
                rule.verb
                    .split_whitespace()
                    .next()
                    .is_some_and(|first| first.eq_ignore_ascii_case(marker))
            });
            if collides {
                return Err(format!(
                    "continuation marker '{}' is also the start of a verb",
                    marker
                ));
            }
        }

        Ok(())
    }
}

/// Result of extracting a topic from one utterance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Topic established by the verb, if any
    pub topic: Option<Topic>,
    /// Verb in its table form
    pub verb: Option<String>,
    /// Remainder of the utterance after the verb or marker
    pub object: Option<String>,
    /// Set when the utterance opened with a continuation marker and
    /// named no verb of its own
    pub continuation: bool,
}

/// Matches utterances against a vocabulary
///
/// Verb words are lowercased once at construction.
#[derive(Debug, Clone)]
pub struct TopicExtractor {
    rules: Vec<(Vec<String>, VerbRule)>,
    markers: Vec<String>,
}

impl Default for TopicExtractor {
    fn default() -> Self {
        Self::new(&Vocabulary::default())
    }
}

impl TopicExtractor {
    pub fn new(vocabulary: &Vocabulary) -> Self {
        let rules = vocabulary
            .verbs
            .iter()
            .map(|rule| {
                let words = rule.verb.split_whitespace().map(normalize_word).collect();
                (words, rule.clone())
            })
            .collect();
        let markers = vocabulary
            .continuation_markers
            .iter()
            .map(|m| normalize_word(m))
            .collect();

        Self { rules, markers }
    }

    /// Extract topic, verb and object from an utterance
    ///
    /// Never fails: text with no known verb comes back as a bare object.
    pub fn extract(&self, utterance: &str) -> Extraction {
        let words: Vec<&str> = utterance.split_whitespace().collect();

        let start = words
            .iter()
            .take_while(|word| self.is_marker(word))
            .count();
        let rest = &words[start..];

        if let Some((len, rule)) = self.match_verb(rest) {
            return Extraction {
                topic: Some(rule.topic.clone()),
                verb: Some(rule.verb.clone()),
                object: join_words(&rest[len..]),
                continuation: false,
            };
        }

        if start > 0 {
            return Extraction {
                topic: None,
                verb: None,
                object: join_words(rest),
                continuation: true,
            };
        }

        Extraction {
            object: join_words(&words),
            ..Default::default()
        }
    }

    fn is_marker(&self, word: &str) -> bool {
        let word = normalize_word(word);
        self.markers.iter().any(|m| *m == word)
    }

    /// First table row whose words prefix `words`, with its word count
    fn match_verb(&self, words: &[&str]) -> Option<(usize, &VerbRule)> {
        self.rules.iter().find_map(|(verb_words, rule)| {
            let matches = !verb_words.is_empty()
                && verb_words.len() <= words.len()
                && verb_words
                    .iter()
                    .zip(words)
                    .all(|(expected, word)| *expected == normalize_word(word));
            matches.then_some((verb_words.len(), rule))
        })
    }
}

fn normalize_word(word: &str) -> String {
    word.trim_end_matches(TRAILING_PUNCTUATION).to_lowercase()
}

fn join_words(words: &[&str]) -> Option<String> {
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}
