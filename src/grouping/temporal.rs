use std::fmt;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use super::calendar::local_date;
use crate::models::Chat;

pub const TODAY: &str = "Today";
pub const YESTERDAY: &str = "Yesterday";
pub const LAST_7_DAYS: &str = "Last 7 days";

const HOURS_IN_DAY: f64 = 24.0;
const HOURS_IN_TWO_DAYS: f64 = 48.0;
const HOURS_IN_WEEK: f64 = 168.0;
const MILLIS_IN_HOUR: f64 = 3_600_000.0;

/// A labelled run of chats in the sidebar
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGroup<'a> {
    pub label: String,
    pub chats: Vec<&'a Chat>,
}

/// Chats bucketed by age, in display order
///
/// The three fixed buckets always come first (possibly empty), followed by
/// month buckets in the order their first chat was seen.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGroups<'a> {
    groups: Vec<TimeGroup<'a>>,
}

impl<'a> TimeGroups<'a> {
    fn with_fixed_buckets() -> Self {
        let groups = [TODAY, YESTERDAY, LAST_7_DAYS]
            .into_iter()
            .map(|label| TimeGroup { label: label.to_string(), chats: Vec::new() })
            .collect();
        Self { groups }
    }

    fn push(&mut self, label: &str, chat: &'a Chat) {
        match self.groups.iter_mut().find(|g| g.label == label) {
            Some(group) => group.chats.push(chat),
            None => self.groups.push(TimeGroup { label: label.to_string(), chats: vec![chat] }),
        }
    }

    /// Chats of one bucket, if the bucket exists
    pub fn get(&self, label: &str) -> Option<&[&'a Chat]> {
        self.groups.iter().find(|g| g.label == label).map(|g| g.chats.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimeGroup<'a>> {
        self.groups.iter()
    }

    /// Buckets with at least one chat (what the sidebar renders)
    pub fn non_empty(&self) -> impl Iterator<Item = &TimeGroup<'a>> {
        self.groups.iter().filter(|g| !g.chats.is_empty())
    }

    pub fn labels(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.label.as_str()).collect()
    }

    /// Number of buckets, including empty fixed ones
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Bucket chats by how long ago they were updated
///
/// Elapsed time is measured in fractional hours from `updated_at` to `now`:
/// under 24 → Today, under 48 → Yesterday, under 168 → Last 7 days, otherwise
/// a bucket named after the month of the update ("March 2024") in `now`'s
/// time zone. Chats updated in the future count as Today. Order within a
/// bucket follows the input order.
pub fn group_chats_by_time<'a, Tz>(
    chats: impl IntoIterator<Item = &'a Chat>,
    now: &DateTime<Tz>,
) -> TimeGroups<'a>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let tz = now.timezone();
    let now_utc = now.with_timezone(&Utc);
    let mut groups = TimeGroups::with_fixed_buckets();

    for chat in chats {
        let elapsed_hours =
            (now_utc - chat.updated_at).num_milliseconds() as f64 / MILLIS_IN_HOUR;

        if elapsed_hours < HOURS_IN_DAY {
            groups.push(TODAY, chat);
        } else if elapsed_hours < HOURS_IN_TWO_DAYS {
            groups.push(YESTERDAY, chat);
        } else if elapsed_hours < HOURS_IN_WEEK {
            groups.push(LAST_7_DAYS, chat);
        } else {
            let label = chat.updated_at.with_timezone(&tz).format("%B %Y").to_string();
            groups.push(&label, chat);
        }
    }

    groups
}

/// Keep chats updated on `day` (calendar day in `tz`), preserving order
pub fn filter_by_day<'a, Tz: TimeZone>(chats: &'a [Chat], day: NaiveDate, tz: &Tz) -> Vec<&'a Chat> {
    chats.iter().filter(|chat| local_date(&chat.updated_at, tz) == day).collect()
}
