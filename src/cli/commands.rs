use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use chrono::{Datelike, Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::Config;
use crate::grouping::{
    ActivityTier, CalendarStats, count_chats_on_day, filter_by_day, group_chats_by_time,
    month_days,
};
use crate::models::Chat;
use crate::search::display::{format_cost, model_badges};
use crate::search::search_chats;
use crate::store::{ExportFormat, Store, export_data, export_filename};
use crate::utils::timestamps::format_relative;

#[derive(Parser)]
#[command(name = "mimir")]
#[command(version = "0.1.0")]
#[command(about = "Browse and search multi-model chat history", long_about = None)]
pub struct Cli {
    /// Store file to use instead of the data directory default
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search chats (supports before:DD-MM-YYYY, after:DD-MM-YYYY, title_has:word)
    Search {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        query: Vec<String>,
    },
    /// List chats grouped by time, as in the sidebar
    Sidebar {
        /// Only chats updated on this day (YYYY-MM-DD)
        #[arg(long)]
        day: Option<NaiveDate>,
    },
    /// Show per-day chat counts for a month (YYYY-MM, default: current month)
    Calendar {
        #[arg(long)]
        month: Option<String>,
    },
    /// Show statistics about the history
    Stats,
    /// Show spending against the 24-hour budget
    Budget,
    /// List the model catalog
    Models,
    /// Start a new empty chat
    New { title: String },
    /// Delete a chat and its messages
    Delete { id: String },
    /// Set the 24-hour budget in USD
    SetBudget {
        #[arg(allow_negative_numbers = true)]
        amount: f64,
    },
    /// Set the OpenRouter API key
    SetKey { key: String },
    /// Export chats, messages, prompts and settings
    Export {
        #[arg(long, default_value = "json")]
        format: ExportFormat,
        /// Output file (default: mimir-export-YYYY-MM-DD.json in the current directory)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    let store_path = match cli.store {
        Some(path) => path,
        None => Config::from_env()?.store_file,
    };
    let mut store = Store::open(store_path)?;

    match command {
        Commands::Search { query } => show_search(&store, &query.join(" ")),
        Commands::Sidebar { day } => show_sidebar(&store, day),
        Commands::Calendar { month } => show_calendar(&store, month.as_deref()),
        Commands::Stats => show_stats(&store),
        Commands::Budget => show_budget(&store),
        Commands::Models => show_models(&store),
        Commands::New { title } => {
            let chat = Chat::new(title, Utc::now());
            let id = chat.id.clone();
            store.update(|state| {
                state.add_chat(chat);
                Ok(())
            })?;
            println!("Created chat {}", id);
            Ok(())
        }
        Commands::Delete { id } => {
            if store.state().chat(&id).is_none() {
                return Err(anyhow!("No chat with id '{}'", id));
            }
            store.update(|state| {
                state.delete_chat(&id);
                Ok(())
            })?;
            println!("Deleted chat {}", id);
            Ok(())
        }
        Commands::SetBudget { amount } => {
            store.update(|state| state.set_budget_24h(amount))?;
            println!("Budget limit saved: ${:.2}", amount);
            Ok(())
        }
        Commands::SetKey { key } => {
            store.update(|state| {
                state.set_open_router_key(key);
                Ok(())
            })?;
            println!("OpenRouter API key saved");
            Ok(())
        }
        Commands::Export { format, output } => run_export(&store, format, output),
    }
}

fn chat_line(chat: &Chat) -> String {
    let now = Utc::now();
    let (badges, hidden) = model_badges(chat);
    let mut line = format!(
        "{}  [{}]  {}  {} msgs  {}",
        chat.title,
        chat.id,
        format_relative(&chat.updated_at, &now),
        chat.message_count,
        format_cost(chat.total_cost)
    );
    if !badges.is_empty() {
        line.push_str("  ");
        line.push_str(&badges.join(" "));
        if hidden > 0 {
            line.push_str(&format!(" +{}", hidden));
        }
    }
    line
}

fn show_search(store: &Store, query: &str) -> Result<()> {
    let state = store.state();
    let results = search_chats(&state.chats, &state.messages, query);

    if results.is_empty() {
        println!("No chats found.");
        return Ok(());
    }
    for chat in results {
        println!("{}", chat_line(chat));
    }
    Ok(())
}

fn show_sidebar(store: &Store, day: Option<NaiveDate>) -> Result<()> {
    let state = store.state();
    let chats: Vec<&Chat> = match day {
        Some(day) => {
            println!("Showing chats from {}", day.format("%b %-d, %Y"));
            filter_by_day(&state.chats, day, &Local)
        }
        None => state.chats.iter().collect(),
    };

    let groups = group_chats_by_time(chats, &Local::now());
    for group in groups.non_empty() {
        println!("{}", group.label);
        for chat in &group.chats {
            println!("  {}", chat_line(chat));
        }
    }
    Ok(())
}

fn parse_month(value: &str) -> Result<(i32, u32)> {
    let date = NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d")
        .with_context(|| format!("Invalid month: '{}' (expected YYYY-MM)", value))?;
    Ok((date.year(), date.month()))
}

fn show_calendar(store: &Store, month: Option<&str>) -> Result<()> {
    let (year, month) = match month {
        Some(value) => parse_month(value)?,
        None => {
            let today = Local::now().date_naive();
            (today.year(), today.month())
        }
    };

    let state = store.state();
    let days = month_days(year, month);
    if let Some(first) = days.first() {
        println!("{}", first.format("%B %Y"));
    }
    for day in days {
        let count = count_chats_on_day(&state.chats, day, &Local);
        if count > 0 {
            let tier = ActivityTier::from_count(count);
            println!("  {}  {:>3} chats  {}", day.format("%a %d"), count, tier.as_str());
        }
    }

    let stats = CalendarStats::compute(&state.chats);
    println!();
    println!("Total chats: {}", stats.total_chats);
    println!("Total messages: {}", stats.total_messages);
    println!("Models used: {}", stats.models_used);
    println!("Total spent: ${:.2}", stats.total_spent);
    Ok(())
}

fn show_stats(store: &Store) -> Result<()> {
    let state = store.state();
    let stats = CalendarStats::compute(&state.chats);
    let bookmarked = state.chats.iter().filter(|c| c.is_bookmarked).count();
    let shared = state.chats.iter().filter(|c| c.is_shared).count();

    println!("Mimir Chat Statistics");
    println!("=====================");
    println!("Total chats: {}", stats.total_chats);
    println!("  Bookmarked: {}", bookmarked);
    println!("  Shared: {}", shared);
    println!("Total messages: {}", state.messages.len());
    println!("Models used: {}", stats.models_used);
    println!("Total spent: ${:.2}", stats.total_spent);
    println!();
    println!("Store file: {}", store.path().display());

    if let Some(newest) = state.chats.iter().map(|c| c.updated_at).max() {
        println!("Last activity: {}", newest.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S"));
    }
    Ok(())
}

fn show_budget(store: &Store) -> Result<()> {
    let status = store.state().budget_status(Utc::now());
    println!("Daily Limit: ${:.2}", status.limit);
    println!("Used Today: ${:.2}", status.used);
    println!("Remaining: ${:.2}", status.remaining);
    Ok(())
}

fn show_models(store: &Store) -> Result<()> {
    let state = store.state();
    for model in &state.models {
        let selected = if state.selected_models.contains(&model.id) { "*" } else { " " };
        println!(
            "{} {:<16} {:<16} ${:.4} / ${:.4}  {}K context{}",
            selected,
            model.id,
            model.name,
            model.input_cost,
            model.output_cost,
            model.context_length / 1000,
            if model.is_expensive { "  (expensive)" } else { "" }
        );
    }
    Ok(())
}

fn run_export(store: &Store, format: ExportFormat, output: Option<PathBuf>) -> Result<()> {
    let now = Utc::now();
    let document = export_data(store.state(), format, now)?;
    let output = output.unwrap_or_else(|| PathBuf::from(export_filename(now, format)));

    fs::write(&output, document)
        .with_context(|| format!("Failed to write export to {}", output.display()))?;
    info!(path = %output.display(), "export written");
    println!("Data exported to {}", output.display());
    Ok(())
}
