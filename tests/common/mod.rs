//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use mimir_core::models::{Chat, Message, Role};
use mimir_core::store::{AppState, save_state};
use tempfile::TempDir;

/// Builder for chats with sensible defaults
pub struct ChatBuilder {
    chat: Chat,
}

impl ChatBuilder {
    /// Create a chat with the given id, updated at `Utc::now()`
    pub fn new(id: &str) -> Self {
        let mut chat = Chat::new(format!("Chat {}", id), Utc::now());
        chat.id = id.to_string();
        Self { chat }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.chat.title = title.to_string();
        self
    }

    pub fn updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.chat.updated_at = updated_at;
        self
    }

    /// Set `updated_at` relative to now
    pub fn updated_ago(self, ago: Duration) -> Self {
        self.updated_at(Utc::now() - ago)
    }

    pub fn models(mut self, models: &[&str]) -> Self {
        self.chat.models = models.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn cost(mut self, cost: f64) -> Self {
        self.chat.total_cost = cost;
        self
    }

    pub fn message_count(mut self, count: u64) -> Self {
        self.chat.message_count = count;
        self
    }

    pub fn bookmarked(mut self) -> Self {
        self.chat.is_bookmarked = true;
        self
    }

    pub fn build(self) -> Chat {
        self.chat
    }
}

/// Builder for messages
pub struct MessageBuilder {
    message: Message,
}

impl MessageBuilder {
    /// Create a user message in the given chat
    pub fn user(id: &str, chat_id: &str, content: &str) -> Self {
        Self {
            message: Message {
                id: id.to_string(),
                chat_id: chat_id.to_string(),
                role: Role::User,
                content: content.to_string(),
                model: None,
                tokens: None,
                cost: None,
                created_at: Utc::now(),
                attachments: Vec::new(),
            },
        }
    }

    /// Create an assistant message from `model`
    pub fn assistant(id: &str, chat_id: &str, model: &str, content: &str) -> Self {
        let mut builder = Self::user(id, chat_id, content);
        builder.message.role = Role::Assistant;
        builder.message.model = Some(model.to_string());
        builder
    }

    pub fn cost(mut self, cost: f64) -> Self {
        self.message.cost = Some(cost);
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.message.created_at = created_at;
        self
    }

    pub fn build(self) -> Message {
        self.message
    }
}

/// Temporary data directory with an optional pre-written store file
pub struct StoreDirBuilder {
    temp_dir: TempDir,
    state: AppState,
}

impl StoreDirBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir, state: AppState::default() }
    }

    /// Add chats in the given order (first chat is shown first)
    pub fn with_chats(mut self, chats: Vec<Chat>) -> Self {
        self.state.chats.extend(chats);
        self
    }

    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.state.messages.extend(messages);
        self
    }

    /// Write the store file and return the temp dir (keep it alive) and the file path
    pub fn build(self) -> (TempDir, PathBuf) {
        let path = store_path(self.temp_dir.path());
        save_state(&path, &self.state).expect("Failed to write store");
        (self.temp_dir, path)
    }
}

impl Default for StoreDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn store_path(dir: &Path) -> PathBuf {
    dir.join("store.json")
}
