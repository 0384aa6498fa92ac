//! Search palette query parser.
//!
//! Turns the raw text typed into the search palette into [`SearchFilters`].
//! Parsing never fails: tokens that cannot be understood degrade to "no such
//! filter" so a half-typed query keeps showing results.
//!
//! # Syntax
//!
//! ```text
//! query := token (' ' token)*
//! token := "before:" D-M-Y | "after:" D-M-Y | "title_has:" text | text
//! ```
//!
//! - `before:DD-MM-YYYY` - chats last updated on or before local midnight of that day
//! - `after:DD-MM-YYYY` - chats last updated on or after local midnight of that day
//! - `title_has:word` - title must fuzzy-match `word` (last occurrence wins)
//! - anything else is free text, including unknown `prefix:value` tokens
//!
//! Tokens are split on single spaces; there is no quoting, so a `title_has:`
//! value cannot contain a space.
//!
//! A date token with a missing component (`before:01-2024`) is ignored. One
//! with all three components where any is non-numeric (`before:xx-01-2024`)
//! clears that bound, even if an earlier token had set it.
//!
//! # Examples
//!
//! ```rust
//! # use mimir_core::search::parser::parse_query_in;
//! use chrono::Utc;
//!
//! let filters = parse_query_in("title_has:rust after:01-01-2024 borrow checker", &Utc);
//! assert_eq!(filters.title_has.as_deref(), Some("rust"));
//! assert_eq!(filters.free_text.as_deref(), Some("borrow checker"));
//! assert!(filters.after.is_some());
//! ```

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use tracing::debug;

use super::ast::SearchFilters;

const BEFORE_PREFIX: &str = "before:";
const AFTER_PREFIX: &str = "after:";
const TITLE_PREFIX: &str = "title_has:";

/// Parse a query using the local time zone for date tokens
pub fn parse_query(input: &str) -> SearchFilters {
    parse_query_in(input, &Local)
}

/// Parse a query, resolving `before:`/`after:` dates to midnight in `tz`
pub fn parse_query_in<Tz: TimeZone>(input: &str, tz: &Tz) -> SearchFilters {
    let mut filters = SearchFilters::new();
    if input.is_empty() {
        return filters;
    }

    let mut free_parts: Vec<&str> = Vec::new();

    for part in input.split(' ') {
        if let Some(date_str) = part.strip_prefix(BEFORE_PREFIX) {
            match split_dmy(date_str) {
                Some(dmy) => filters.before = resolve_dmy(dmy, tz),
                None => debug!(token = part, "ignoring incomplete before: date"),
            }
        } else if let Some(date_str) = part.strip_prefix(AFTER_PREFIX) {
            match split_dmy(date_str) {
                Some(dmy) => filters.after = resolve_dmy(dmy, tz),
                None => debug!(token = part, "ignoring incomplete after: date"),
            }
        } else if let Some(title) = part.strip_prefix(TITLE_PREFIX) {
            filters.title_has = Some(title.to_string());
        } else {
            free_parts.push(part);
        }
    }

    if !free_parts.is_empty() {
        filters.free_text = Some(free_parts.join(" "));
    }

    filters
}

/// Split `D-M-Y` into its three components
///
/// Components beyond the third are ignored. A missing or empty component
/// yields `None` and the token is dropped.
fn split_dmy(value: &str) -> Option<(&str, &str, &str)> {
    let mut components = value.split('-');
    let day = components.next().filter(|s| !s.is_empty())?;
    let month = components.next().filter(|s| !s.is_empty())?;
    let year = components.next().filter(|s| !s.is_empty())?;
    Some((day, month, year))
}

/// Resolve day, month and year to local midnight, returned as UTC
///
/// A non-numeric or unrepresentable date yields `None`, which clears any
/// bound set by an earlier token.
fn resolve_dmy<Tz: TimeZone>(
    (day, month, year): (&str, &str, &str),
    tz: &Tz,
) -> Option<DateTime<Utc>> {
    let date = calendar_date(leading_int(day)?, leading_int(month)?, leading_int(year)?)?;
    local_midnight(date, tz)
}

/// Read the integer prefix of a string: optional whitespace, optional sign, digits
///
/// `"07"` → 7, `"12th"` → 12, `"x1"` → None.
fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Build a calendar date from day, 1-based month and year, rolling over out-of-range values
///
/// Day 32 of January is February 1st, month 13 is January of the next year and
/// day 0 is the last day of the previous month. Years 0-99 mean 1900-1999.
fn calendar_date(day: i64, month: i64, year: i64) -> Option<NaiveDate> {
    let year = if (0..=99).contains(&year) { year + 1900 } else { year };
    let month_index = month - 1;
    let year = year.checked_add(month_index.div_euclid(12))?;
    let month = u32::try_from(month_index.rem_euclid(12) + 1).ok()?;

    let first_of_month = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, 1)?;
    first_of_month.checked_add_signed(Duration::try_days(day.checked_sub(1)?)?)
}

fn local_midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<DateTime<Utc>> {
    let midnight = date.and_time(NaiveTime::MIN);
    // Midnight can fall in a DST gap; the first valid instant after it is one hour later
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(midnight + Duration::hours(1))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
}
