use std::collections::HashMap;

use chrono::{DateTime, Local, TimeZone, Utc};

use super::ast::SearchFilters;
use super::fuzzy::fuzzy_match;
use super::parser::parse_query_in;
use crate::models::{Chat, Message};
use crate::utils::timestamps::format_distance;

/// Chats shown when the palette is opened without a query
pub const RECENT_LIMIT: usize = 10;
/// Maximum number of chats returned for a query
pub const RESULT_LIMIT: usize = 20;

/// Run a search palette query against the current time and local time zone
pub fn search_chats<'a>(chats: &'a [Chat], messages: &[Message], query: &str) -> Vec<&'a Chat> {
    search_chats_at(chats, messages, query, Utc::now(), &Local)
}

/// Run a search palette query
///
/// - Blank query: the first [`RECENT_LIMIT`] chats, in collection order
/// - Otherwise: chats passing every filter, in collection order, capped at [`RESULT_LIMIT`]
///
/// `now` feeds the relative-time words of the free-text haystack and `tz`
/// resolves `before:`/`after:` dates. No ranking is applied; callers decide
/// the collection order.
pub fn search_chats_at<'a, Tz: TimeZone>(
    chats: &'a [Chat],
    messages: &[Message],
    query: &str,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Vec<&'a Chat> {
    if query.trim().is_empty() {
        return chats.iter().take(RECENT_LIMIT).collect();
    }

    let filters = parse_query_in(query, tz);
    let mut results = apply_filters(chats, messages, &filters, now);
    results.truncate(RESULT_LIMIT);
    results
}

/// Apply parsed filters to chats, preserving order (no cap)
pub fn apply_filters<'a>(
    chats: &'a [Chat],
    messages: &[Message],
    filters: &SearchFilters,
    now: DateTime<Utc>,
) -> Vec<&'a Chat> {
    if filters.is_empty() {
        return chats.iter().collect();
    }

    // Haystacks are only needed for free text; group messages once instead of per chat
    let by_chat = match filters.free_text.as_deref() {
        Some(text) if !text.is_empty() => group_messages(messages),
        _ => HashMap::new(),
    };

    chats
        .iter()
        .filter(|chat| {
            let chat_messages = by_chat.get(chat.id.as_str()).map(Vec::as_slice).unwrap_or(&[]);
            evaluate_filters(chat, chat_messages, filters, now)
        })
        .collect()
}

/// Check one chat against every active filter
///
/// `chat_messages` must hold the chat's messages in collection order.
fn evaluate_filters(
    chat: &Chat,
    chat_messages: &[&Message],
    filters: &SearchFilters,
    now: DateTime<Utc>,
) -> bool {
    if filters.before.is_some_and(|before| chat.updated_at > before) {
        return false;
    }

    if filters.after.is_some_and(|after| chat.updated_at < after) {
        return false;
    }

    if let Some(title) = filters.title_has.as_deref() {
        if !fuzzy_match(&chat.title, title) {
            return false;
        }
    }

    match filters.free_text.as_deref() {
        Some(text) if !text.is_empty() => {
            let haystack = haystack_from(chat, chat_messages.iter().copied(), now);
            fuzzy_match(&haystack, text)
        }
        _ => true,
    }
}

/// Text searched by free-text queries, for one chat
///
/// Space-joined: title, contents of the chat's messages, model ids, total cost
/// and how long ago the chat was updated ("3 days").
pub fn build_haystack(chat: &Chat, messages: &[Message], now: DateTime<Utc>) -> String {
    haystack_from(chat, messages.iter().filter(|m| m.chat_id == chat.id), now)
}

fn haystack_from<'m>(
    chat: &Chat,
    chat_messages: impl Iterator<Item = &'m Message>,
    now: DateTime<Utc>,
) -> String {
    let cost = js_number_string(chat.total_cost);
    let age = format_distance(&chat.updated_at, &now);

    let mut parts: Vec<&str> = vec![chat.title.as_str()];
    parts.extend(chat_messages.map(|m| m.content.as_str()));
    parts.extend(chat.models.iter().map(String::as_str));
    parts.push(&cost);
    parts.push(&age);

    parts.join(" ")
}

/// Render a number the way JavaScript's `Number#toString` does
///
/// Magnitudes below 1e-6 or from 1e21 up use exponent form (`5e-7`, `1e+21`).
fn js_number_string(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude < 1e-6 || magnitude >= 1e21 {
        let formatted = format!("{:e}", value);
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        };
    }
    value.to_string()
}

fn group_messages(messages: &[Message]) -> HashMap<&str, Vec<&Message>> {
    let mut by_chat: HashMap<&str, Vec<&Message>> = HashMap::new();
    for message in messages {
        by_chat.entry(message.chat_id.as_str()).or_default().push(message);
    }
    by_chat
}
