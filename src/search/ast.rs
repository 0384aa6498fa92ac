use chrono::{DateTime, Utc};

/// Filters extracted from one search palette query
///
/// Built fresh for every query string. A field left as `None` means the
/// corresponding check is skipped, so an empty filter set accepts every chat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    /// `before:D-M-Y` - reject chats updated after this instant
    pub before: Option<DateTime<Utc>>,
    /// `after:D-M-Y` - reject chats updated before this instant
    pub after: Option<DateTime<Utc>>,
    /// `title_has:X` - title must fuzzy-match `X`
    pub title_has: Option<String>,
    /// Every other token, rejoined with single spaces
    pub free_text: Option<String>,
}

impl SearchFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.before.is_none()
            && self.after.is_none()
            && self.title_has.is_none()
            && self.free_text.is_none()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_filters_empty() {
        let filters = SearchFilters::new();
        assert!(filters.is_empty());
    }

    #[test]
    fn test_filters_not_empty() {
        let filters =
            SearchFilters { title_has: Some("rust".to_string()), ..SearchFilters::default() };
        assert!(!filters.is_empty());

        let filters = SearchFilters {
            after: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            ..SearchFilters::default()
        };
        assert!(!filters.is_empty());
    }
}
