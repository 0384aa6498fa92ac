use chrono::{DateTime, Datelike, Timelike, Utc};

const MINUTES_IN_DAY: i64 = 1_440;
const MINUTES_IN_ALMOST_TWO_DAYS: i64 = 2_520;
const MINUTES_IN_MONTH: i64 = 43_200;
const MINUTES_IN_TWO_MONTHS: i64 = 86_400;

/// Human distance between two instants, without suffix
///
/// Tiers:
/// - under 1 minute: "less than a minute", then "1 minute", "5 minutes"
/// - under 1 day: "about 1 hour", "about 3 hours"
/// - under 30 days: "1 day", "3 days"
/// - under 1 year: "about 1 month", "about 2 months", "5 months"
/// - beyond: "about 1 year", "over 1 year", "almost 2 years"
///
/// The order of the arguments does not matter.
pub fn format_distance(a: &DateTime<Utc>, b: &DateTime<Utc>) -> String {
    let (earlier, later) = if a <= b { (a, b) } else { (b, a) };
    let seconds = later.signed_duration_since(*earlier).num_seconds();
    let minutes = round_div(seconds, 60);

    if minutes < 2 {
        if minutes == 0 { "less than a minute".to_string() } else { "1 minute".to_string() }
    } else if minutes < 45 {
        format!("{} minutes", minutes)
    } else if minutes < 90 {
        "about 1 hour".to_string()
    } else if minutes < MINUTES_IN_DAY {
        format!("about {} hours", round_div(minutes, 60))
    } else if minutes < MINUTES_IN_ALMOST_TWO_DAYS {
        "1 day".to_string()
    } else if minutes < MINUTES_IN_MONTH {
        format!("{} days", round_div(minutes, MINUTES_IN_DAY))
    } else if minutes < MINUTES_IN_TWO_MONTHS {
        format!("about {}", plural(round_div(minutes, MINUTES_IN_MONTH), "month"))
    } else {
        let months = months_between(earlier, later);
        if months < 12 {
            plural(round_div(minutes, MINUTES_IN_MONTH), "month")
        } else {
            let years = months / 12;
            match months % 12 {
                0..=2 => format!("about {}", plural(years, "year")),
                3..=8 => format!("over {}", plural(years, "year")),
                _ => format!("almost {}", plural(years + 1, "year")),
            }
        }
    }
}

/// Distance from `timestamp` to now, without suffix ("3 days")
pub fn format_distance_to_now(timestamp: &DateTime<Utc>) -> String {
    format_distance(timestamp, &Utc::now())
}

/// Distance with direction: "3 days ago" or "in 2 hours"
pub fn format_relative(timestamp: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let distance = format_distance(timestamp, now);
    if timestamp <= now { format!("{} ago", distance) } else { format!("in {}", distance) }
}

/// Integer division rounding half up (inputs are non-negative)
fn round_div(value: i64, divisor: i64) -> i64 {
    (value + divisor / 2).div_euclid(divisor)
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 { format!("1 {}", unit) } else { format!("{} {}s", count, unit) }
}

/// Whole calendar months from `earlier` to `later`
fn months_between(earlier: &DateTime<Utc>, later: &DateTime<Utc>) -> i64 {
    let mut months = i64::from(later.year() - earlier.year()) * 12
        + i64::from(later.month()) - i64::from(earlier.month());

    let later_offset = (later.day(), later.num_seconds_from_midnight());
    let earlier_offset = (earlier.day(), earlier.num_seconds_from_midnight());
    if months > 0 && later_offset < earlier_offset {
        months -= 1;
    }
    months
}
