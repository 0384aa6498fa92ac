//! Mimir core - the non-visual logic of a multi-model AI chat client
//!
//! This library holds everything the chat client does besides drawing it:
//!
//! - Data model for chats, messages, attachments, models and prompts
//! - Explicit application state with a JSON persistence boundary
//! - Search palette: query parsing, fuzzy matching and chat filtering
//! - Sidebar grouping (Today / Yesterday / Last 7 days / months)
//! - Calendar aggregation (per-day counts and activity tiers)
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use mimir_core::{AppState, Chat, search_chats};
//!
//! let mut state = AppState::default();
//! state.add_chat(Chat::new("Rust lifetimes", Utc::now()));
//! state.add_chat(Chat::new("Weekend plans", Utc::now()));
//!
//! let results = search_chats(&state.chats, &state.messages, "title_has:rust");
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].title, "Rust lifetimes");
//! ```

pub mod cli;
pub mod config;
pub mod grouping;
pub mod models;
pub mod search;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use grouping::{count_chats_on_day, group_chats_by_time};
pub use models::{Chat, Message};
pub use search::{fuzzy_match, parse_query, search_chats};
pub use store::{AppState, Store};
