//! Data export for the settings page.
//!
//! Exports chats, messages, prompts and settings. The OpenRouter API key is
//! never written to an export.

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::state::AppState;
use crate::models::{Chat, Message, Prompt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            _ => Err(anyhow!("Unsupported export format: '{}' (supported: json)", s)),
        }
    }
}

#[derive(Serialize)]
struct ExportedSettings {
    budget_24h: f64,
    transcription_enabled: bool,
    selected_models: Vec<String>,
    sidebar_collapsed: bool,
}

#[derive(Serialize)]
struct Export<'a> {
    exported_at: DateTime<Utc>,
    chats: &'a [Chat],
    messages: &'a [Message],
    prompts: &'a [Prompt],
    settings: ExportedSettings,
}

/// Render an export document
pub fn export_data(state: &AppState, format: ExportFormat, now: DateTime<Utc>) -> Result<String> {
    let export = Export {
        exported_at: now,
        chats: &state.chats,
        messages: &state.messages,
        prompts: &state.prompts,
        settings: ExportedSettings {
            budget_24h: state.settings.budget_24h,
            transcription_enabled: state.settings.transcription_enabled,
            selected_models: state.selected_models.clone(),
            sidebar_collapsed: state.sidebar_collapsed,
        },
    };

    match format {
        ExportFormat::Json => {
            serde_json::to_string_pretty(&export).context("Failed to serialize export")
        }
    }
}

/// Default file name: `mimir-export-YYYY-MM-DD.json`
pub fn export_filename(now: DateTime<Utc>, format: ExportFormat) -> String {
    format!("mimir-export-{}.{}", now.format("%Y-%m-%d"), format.extension())
}
