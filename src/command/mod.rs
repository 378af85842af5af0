//! Chat command pipeline
//!
//! Converts a free-text message into a task:
//! message -> TopicExtractor -> Extraction -> ContextResolver -> Resolution -> TaskList

pub mod context;
pub mod executor;
pub mod extractor;
pub mod resolver;

pub use context::{ContextEntry, RollingContext};
pub use executor::{CommandExecutor, ExecutionResult};
pub use extractor::{Extraction, TopicExtractor, VerbRule, Vocabulary};
pub use resolver::{ContextResolver, Resolution, ResolutionMode};
