use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

use crate::models::Chat;

/// Intensity marker for a calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ActivityTier {
    None,
    /// 1-2 chats
    Low,
    /// 3-5 chats
    Medium,
    /// 6 or more chats
    High,
}

impl ActivityTier {
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => Self::None,
            1..=2 => Self::Low,
            3..=5 => Self::Medium,
            _ => Self::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Calendar day of `timestamp` in `tz`
pub fn local_date<Tz: TimeZone>(timestamp: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    timestamp.with_timezone(tz).date_naive()
}

/// Number of chats last updated on `day` (same year, month and day in `tz`)
pub fn count_chats_on_day<Tz: TimeZone>(chats: &[Chat], day: NaiveDate, tz: &Tz) -> usize {
    chats.iter().filter(|chat| local_date(&chat.updated_at, tz) == day).count()
}

/// Chats keyed by the calendar day of their last update, each list in input order
pub fn chats_by_date<'a, Tz: TimeZone>(
    chats: &'a [Chat],
    tz: &Tz,
) -> BTreeMap<NaiveDate, Vec<&'a Chat>> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&'a Chat>> = BTreeMap::new();
    for chat in chats {
        by_date.entry(local_date(&chat.updated_at, tz)).or_default().push(chat);
    }
    by_date
}

/// Every day of a month, in order (empty for an invalid year/month)
pub fn month_days(year: i32, month: u32) -> Vec<NaiveDate> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    first.iter_days().take_while(|day| day.month() == month).collect()
}

/// Totals shown under the calendar
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarStats {
    pub total_chats: usize,
    pub total_messages: u64,
    pub models_used: usize,
    pub total_spent: f64,
}

impl CalendarStats {
    pub fn compute(chats: &[Chat]) -> Self {
        let models: HashSet<&str> =
            chats.iter().flat_map(|chat| chat.models.iter().map(String::as_str)).collect();

        Self {
            total_chats: chats.len(),
            total_messages: chats.iter().map(|chat| chat.message_count).sum(),
            models_used: models.len(),
            total_spent: chats.iter().map(|chat| chat.total_cost).sum(),
        }
    }
}
