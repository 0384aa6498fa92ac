//! Application state and its persistence boundary
//!
//! State lives in a single JSON file, `store.json`, inside the data directory
//! (see [`crate::config`]). The file wraps the state in a versioned envelope:
//!
//! ```text
//! { "version": 1, "state": { "chats": [...], "messages": [...], ... } }
//! ```
//!
//! Session-only fields (current chat, recording state) and the built-in model
//! catalog are not written.

pub mod export;
pub mod persistence;
pub mod state;

pub use export::{ExportFormat, export_data, export_filename};
pub use persistence::{STORE_VERSION, Store, load_state, save_state};
pub use state::{AppState, BudgetStatus, ChatUpdate, MessageUpdate, Settings};
