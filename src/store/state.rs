//! Application state and the actions that mutate it.
//!
//! [`AppState`] is passed explicitly to whatever needs it; the search and
//! grouping modules only borrow its collections. Persisting the state is the
//! job of [`crate::store::persistence::Store`].

use std::collections::HashMap;

use anyhow::{Result, bail};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{
    Chat, Message, ModelInfo, Prompt, Role, default_model_catalog, default_prompts,
};

/// The comparison view shows at most this many models side by side
pub const MAX_SELECTED_MODELS: usize = 3;
/// Daily spending limit of a fresh install, in USD
pub const DEFAULT_BUDGET_24H: f64 = 10.0;
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// User settings edited on the settings page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub open_router_key: String,
    #[serde(default = "default_budget")]
    pub budget_24h: f64,
    #[serde(default)]
    pub transcription_enabled: bool,
}

fn default_budget() -> f64 {
    DEFAULT_BUDGET_24H
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            open_router_key: String::new(),
            budget_24h: DEFAULT_BUDGET_24H,
            transcription_enabled: false,
        }
    }
}

/// Partial update for a chat; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct ChatUpdate {
    pub title: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
    pub message_count: Option<u64>,
    pub models: Option<Vec<String>>,
    pub total_tokens: Option<u64>,
    pub total_cost: Option<f64>,
    pub is_bookmarked: Option<bool>,
    pub is_shared: Option<bool>,
    pub share_url: Option<Option<String>>,
}

/// Partial update for a message; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct MessageUpdate {
    pub content: Option<String>,
    pub model: Option<Option<String>>,
    pub tokens: Option<Option<u64>>,
    pub cost: Option<Option<f64>>,
}

/// Spending against the 24-hour budget
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetStatus {
    pub limit: f64,
    pub used: f64,
    pub remaining: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    // Session-only UI state
    #[serde(skip)]
    pub current_chat_id: Option<String>,
    #[serde(skip)]
    pub is_recording: bool,
    #[serde(skip)]
    pub recording_time: u64,
    /// Catalog is built in, never persisted
    #[serde(skip, default = "default_model_catalog")]
    pub models: Vec<ModelInfo>,

    #[serde(default = "default_selected_models")]
    pub selected_models: Vec<String>,
    #[serde(default)]
    pub sidebar_collapsed: bool,
    #[serde(default)]
    pub chats: Vec<Chat>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default = "fresh_prompts")]
    pub prompts: Vec<Prompt>,
    #[serde(default)]
    pub settings: Settings,
}

fn default_selected_models() -> Vec<String> {
    vec![DEFAULT_MODEL.to_string()]
}

fn fresh_prompts() -> Vec<Prompt> {
    default_prompts(Utc::now())
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            current_chat_id: None,
            is_recording: false,
            recording_time: 0,
            models: default_model_catalog(),
            selected_models: default_selected_models(),
            sidebar_collapsed: false,
            chats: Vec::new(),
            messages: Vec::new(),
            prompts: fresh_prompts(),
            settings: Settings::default(),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_current_chat_id(&mut self, id: Option<String>) {
        self.current_chat_id = id;
    }

    pub fn set_selected_models(&mut self, models: Vec<String>) {
        self.selected_models = models;
    }

    /// Add a model to the comparison; ignored when already selected or when the view is full
    pub fn add_model(&mut self, model: &str) {
        if self.selected_models.len() >= MAX_SELECTED_MODELS
            || self.selected_models.iter().any(|m| m == model)
        {
            debug!(model, selected = self.selected_models.len(), "model not added");
            return;
        }
        self.selected_models.push(model.to_string());
    }

    pub fn remove_model(&mut self, model: &str) {
        self.selected_models.retain(|m| m != model);
    }

    pub fn set_recording(&mut self, recording: bool) {
        self.is_recording = recording;
    }

    pub fn set_recording_time(&mut self, seconds: u64) {
        self.recording_time = seconds;
    }

    pub fn set_sidebar_collapsed(&mut self, collapsed: bool) {
        self.sidebar_collapsed = collapsed;
    }

    /// New chats go to the front so the collection stays newest-first
    pub fn add_chat(&mut self, chat: Chat) {
        self.chats.insert(0, chat);
    }

    /// Apply a partial update; returns false when no chat has that id
    pub fn update_chat(&mut self, id: &str, update: ChatUpdate) -> bool {
        let Some(chat) = self.chats.iter_mut().find(|c| c.id == id) else {
            return false;
        };

        if let Some(title) = update.title {
            chat.title = title;
        }
        if let Some(updated_at) = update.updated_at {
            chat.updated_at = updated_at;
        }
        if let Some(count) = update.message_count {
            chat.message_count = count;
        }
        if let Some(models) = update.models {
            chat.models = models;
        }
        if let Some(tokens) = update.total_tokens {
            chat.total_tokens = tokens;
        }
        if let Some(cost) = update.total_cost {
            chat.total_cost = cost;
        }
        if let Some(bookmarked) = update.is_bookmarked {
            chat.is_bookmarked = bookmarked;
        }
        if let Some(shared) = update.is_shared {
            chat.is_shared = shared;
        }
        if let Some(url) = update.share_url {
            chat.share_url = url;
        }
        true
    }

    /// Remove a chat together with its messages
    pub fn delete_chat(&mut self, id: &str) {
        self.chats.retain(|c| c.id != id);
        self.messages.retain(|m| m.chat_id != id);
        if self.current_chat_id.as_deref() == Some(id) {
            self.current_chat_id = None;
        }
    }

    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Apply a partial update; returns false when no message has that id
    pub fn update_message(&mut self, id: &str, update: MessageUpdate) -> bool {
        let Some(message) = self.messages.iter_mut().find(|m| m.id == id) else {
            return false;
        };

        if let Some(content) = update.content {
            message.content = content;
        }
        if let Some(model) = update.model {
            message.model = model;
        }
        if let Some(tokens) = update.tokens {
            message.tokens = tokens;
        }
        if let Some(cost) = update.cost {
            message.cost = cost;
        }
        true
    }

    pub fn set_open_router_key(&mut self, key: impl Into<String>) {
        self.settings.open_router_key = key.into();
    }

    /// Set the 24-hour budget; negative or non-finite amounts are rejected
    pub fn set_budget_24h(&mut self, budget: f64) -> Result<()> {
        if !budget.is_finite() || budget < 0.0 {
            bail!("Invalid budget amount: {} (must be a non-negative number)", budget);
        }
        self.settings.budget_24h = budget;
        Ok(())
    }

    pub fn set_transcription_enabled(&mut self, enabled: bool) {
        self.settings.transcription_enabled = enabled;
    }

    pub fn chat(&self, id: &str) -> Option<&Chat> {
        self.chats.iter().find(|c| c.id == id)
    }

    pub fn model(&self, id: &str) -> Option<&ModelInfo> {
        self.models.iter().find(|m| m.id == id)
    }

    /// Messages of one chat in collection order
    pub fn messages_for(&self, chat_id: &str) -> Vec<&Message> {
        self.messages.iter().filter(|m| m.chat_id == chat_id).collect()
    }

    /// Columns of the comparison view
    ///
    /// For each selected model: that model's messages plus user messages
    /// without a model, in collection order.
    pub fn messages_by_model<'a>(
        &'a self,
        chat_id: &str,
        selected: &[String],
    ) -> HashMap<String, Vec<&'a Message>> {
        let chat_messages = self.messages_for(chat_id);
        selected
            .iter()
            .map(|model| {
                let column = chat_messages
                    .iter()
                    .copied()
                    .filter(|m| {
                        m.model.as_deref() == Some(model.as_str())
                            || (m.role == Role::User && m.model.is_none())
                    })
                    .collect();
                (model.clone(), column)
            })
            .collect()
    }

    /// Sum of message costs created within `window` before `now`
    pub fn spent_in_window(&self, now: DateTime<Utc>, window: Duration) -> f64 {
        let since = now - window;
        self.messages
            .iter()
            .filter(|m| m.created_at > since && m.created_at <= now)
            .filter_map(|m| m.cost)
            .sum()
    }

    pub fn budget_status(&self, now: DateTime<Utc>) -> BudgetStatus {
        let limit = self.settings.budget_24h;
        let used = self.spent_in_window(now, Duration::hours(24));
        BudgetStatus { limit, used, remaining: (limit - used).max(0.0) }
    }
}
