//! Todo Agent - chat-style to-do service with context-aware task resolution

pub mod api;
pub mod command;
pub mod core;
pub mod session;
