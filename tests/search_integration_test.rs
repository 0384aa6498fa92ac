//! Integration tests for the search palette

mod common;

use chrono::{Duration, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use common::{ChatBuilder, MessageBuilder};
use mimir_core::models::Chat;
use mimir_core::search::{
    RECENT_LIMIT, SearchFilters, fuzzy_match, parse_query, search_chats, search_chats_at,
};

fn local_midnight_utc(year: i32, month: u32, day: u32) -> chrono::DateTime<Utc> {
    let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
    Local.from_local_datetime(&date.and_time(NaiveTime::MIN)).earliest().unwrap().with_timezone(&Utc)
}

#[test]
fn test_substring_always_matches() {
    let titles = ["Rust Ownership", "Weekly planning", "Q3 budget review", "ünïcode title"];
    for title in titles {
        let lower = title.to_lowercase();
        let chars: Vec<char> = lower.chars().collect();
        for start in 0..chars.len() {
            for end in start + 1..=chars.len() {
                let query: String = chars[start..end].iter().collect();
                assert!(fuzzy_match(title, &query), "{title:?} should match {query:?}");
                assert!(fuzzy_match(title, &query.to_uppercase()), "{title:?} upper {query:?}");
            }
        }
    }
}

#[test]
fn test_empty_query_matches_everything() {
    for text in ["", "a", "anything at all"] {
        assert!(fuzzy_match(text, ""));
    }
}

#[test]
fn test_parse_after_local_midnight() {
    let filters = parse_query("after:01-01-2024");
    assert_eq!(
        filters,
        SearchFilters { after: Some(local_midnight_utc(2024, 1, 1)), ..SearchFilters::default() }
    );
}

#[test]
fn test_parse_title_last_wins() {
    let filters = parse_query("title_has:foo title_has:bar");
    assert_eq!(filters.title_has.as_deref(), Some("bar"));
    assert!(filters.free_text.is_none());
    assert!(filters.before.is_none());
    assert!(filters.after.is_none());
}

#[test]
fn test_empty_query_returns_first_ten_in_order() {
    let chats: Vec<Chat> = (0..15)
        .map(|i| ChatBuilder::new(&format!("c{i}")).updated_ago(Duration::days(i)).build())
        .collect();

    let results = search_chats(&chats, &[], "");
    assert_eq!(results.len(), RECENT_LIMIT);
    for (i, chat) in results.iter().enumerate() {
        assert_eq!(chat.id, format!("c{i}"));
    }
}

#[test]
fn test_before_excludes_later_chats() {
    let boundary = local_midnight_utc(2024, 6, 1);
    let chats = vec![
        ChatBuilder::new("late").title("Rust").updated_at(boundary + Duration::minutes(1)).build(),
        ChatBuilder::new("edge").title("Rust").updated_at(boundary).build(),
        ChatBuilder::new("early").title("Go").updated_at(boundary - Duration::days(30)).build(),
        ChatBuilder::new("much-later").updated_at(boundary + Duration::days(90)).build(),
    ];

    let results = search_chats(&chats, &[], "before:01-06-2024");
    let ids: Vec<&str> = results.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["edge", "early"]);

    // Other filters never bring a later chat back
    let results = search_chats(&chats, &[], "before:01-06-2024 title_has:rust");
    assert!(results.iter().all(|c| c.updated_at <= boundary));
    let ids: Vec<&str> = results.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["edge"]);
}

#[test]
fn test_date_range() {
    let chats = vec![
        ChatBuilder::new("jan").updated_at(local_midnight_utc(2024, 1, 15)).build(),
        ChatBuilder::new("mar").updated_at(local_midnight_utc(2024, 3, 15)).build(),
        ChatBuilder::new("may").updated_at(local_midnight_utc(2024, 5, 15)).build(),
    ];

    let results = search_chats(&chats, &[], "after:01-02-2024 before:01-05-2024");
    let ids: Vec<&str> = results.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["mar"]);
}

#[test]
fn test_free_text_over_messages_and_models() {
    let chats = vec![
        ChatBuilder::new("a").title("Untitled").models(&["gpt-4"]).build(),
        ChatBuilder::new("b").title("Untitled").models(&["claude-3-sonnet"]).build(),
        ChatBuilder::new("c").title("Untitled").models(&["gpt-3.5-turbo"]).build(),
    ];
    let messages = vec![
        MessageBuilder::user("m1", "a", "Explain tokio runtimes").build(),
        MessageBuilder::assistant("m2", "b", "claude-3-sonnet", "Sourdough starter tips").build(),
    ];

    let by_message: Vec<&str> =
        search_chats(&chats, &messages, "tokio").iter().map(|c| c.id.as_str()).collect();
    assert_eq!(by_message, vec!["a"]);

    let by_model: Vec<&str> =
        search_chats(&chats, &messages, "sonnet").iter().map(|c| c.id.as_str()).collect();
    assert_eq!(by_model, vec!["b"]);
}

#[test]
fn test_results_keep_collection_order_and_cap() {
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
    let chats: Vec<Chat> = (0..25)
        .map(|i| {
            let title = if i % 2 == 0 { "Rust notes" } else { "Cooking" };
            ChatBuilder::new(&format!("c{i}")).title(title).updated_at(now).build()
        })
        .collect();

    let results = search_chats_at(&chats, &[], "title_has:rust", now, &Utc);
    let ids: Vec<String> = results.iter().map(|c| c.id.clone()).collect();
    let expected: Vec<String> = (0..25).step_by(2).map(|i| format!("c{i}")).collect();
    assert_eq!(ids, expected);

    let results = search_chats_at(&chats, &[], "notes cooking", now, &Utc);
    assert!(results.len() <= 20);
}

#[test]
fn test_search_is_deterministic() {
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
    let chats = vec![
        ChatBuilder::new("a").title("Alpha").updated_at(now - Duration::days(2)).build(),
        ChatBuilder::new("b").title("Beta").updated_at(now - Duration::days(40)).build(),
    ];

    let first = search_chats_at(&chats, &[], "alpha 2 days", now, &Utc);
    let second = search_chats_at(&chats, &[], "alpha 2 days", now, &Utc);
    assert_eq!(first, second);
}

#[test]
fn test_non_numeric_date_lifts_earlier_bound() {
    let now = Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap();
    let chats = vec![
        ChatBuilder::new("june").updated_at(Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap()).build(),
    ];

    let bounded = search_chats_at(&chats, &[], "before:01-01-2024", now, &Utc);
    assert!(bounded.is_empty());

    let lifted = search_chats_at(&chats, &[], "before:01-01-2024 before:xx-01-2024", now, &Utc);
    let ids: Vec<&str> = lifted.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["june"]);
}
