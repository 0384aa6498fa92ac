//! Sidebar and calendar grouping of chats by time.
//!
//! - [`temporal`] - Today / Yesterday / Last 7 days / month buckets for the sidebar
//! - [`calendar`] - per-day counts, activity tiers and totals for the calendar view
//!
//! Both read the chat collection without mutating it. Calendar days are
//! resolved in a caller-supplied time zone (the local zone in the binary).

pub mod calendar;
pub mod temporal;

pub use calendar::{
    ActivityTier, CalendarStats, chats_by_date, count_chats_on_day, local_date, month_days,
};
pub use temporal::{
    LAST_7_DAYS, TODAY, TimeGroup, TimeGroups, YESTERDAY, filter_by_day, group_chats_by_time,
};
