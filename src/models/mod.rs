//! Data models for the Mimir chat client.
//!
//! This module defines the data structures shared by the store, the search palette
//! and the sidebar/calendar grouping:
//!
//! - [`Chat`] - A conversation with aggregate counters (messages, tokens, cost)
//! - [`Message`] - One turn in a chat, authored by the user or a model
//! - [`Attachment`] - An image or PDF attached to a message
//! - [`ModelInfo`] - An entry of the model catalog
//! - [`Prompt`] - A saved prompt template
//!
//! Field names follow the persisted store format (snake_case JSON).

pub mod catalog;
pub mod chat;

pub use catalog::{ModelInfo, Prompt, default_model_catalog, default_prompts};
pub use chat::{
    Attachment, AttachmentKind, Chat, MAX_ATTACHMENT_BYTES, Message, Role, validate_attachment,
};
