//! Typo-tolerant text matching for the search palette.
//!
//! A query matches when it is a case-insensitive substring of the text, or
//! when a single greedy left-to-right scan finds at least 80% of the query's
//! characters in order. The scan never skips a query character: one that does
//! not occur in the rest of the text stalls the scan, so a typo early in the
//! query rejects it even when every later character would line up. The
//! behavior is kept as-is so results stay identical to earlier releases.

/// Fraction of query characters the greedy scan must find
pub const FUZZY_THRESHOLD: f64 = 0.8;

/// Return true when `text` matches `query` (empty query always matches)
pub fn fuzzy_match(text: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let text_lower = text.to_lowercase();
    let query_lower = query.to_lowercase();

    if text_lower.contains(&query_lower) {
        return true;
    }

    let query_chars: Vec<char> = query_lower.chars().collect();
    let matches = greedy_match_count(&text_lower, &query_chars);

    matches as f64 / query_chars.len() as f64 >= FUZZY_THRESHOLD
}

/// Count query characters consumed by one forward pass over `text`
fn greedy_match_count(text: &str, query: &[char]) -> usize {
    let mut query_index = 0;

    for ch in text.chars() {
        if query_index >= query.len() {
            break;
        }
        if ch == query[query_index] {
            query_index += 1;
        }
    }

    query_index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_matches() {
        assert!(fuzzy_match("anything", ""));
        assert!(fuzzy_match("", ""));
    }

    #[test]
    fn test_substring_case_insensitive() {
        assert!(fuzzy_match("Rust Ownership Notes", "ownership"));
        assert!(fuzzy_match("rust ownership notes", "OWNER"));
        assert!(fuzzy_match("Project Plan", "Project Plan"));
    }

    #[test]
    fn test_no_match_on_empty_text() {
        assert!(!fuzzy_match("", "a"));
    }

    #[test]
    fn test_typo_within_threshold() {
        // 'projct' is a subsequence of 'project'
        assert!(fuzzy_match("project", "projct"));
        // trailing typo: 10 of 11 characters found
        assert!(fuzzy_match("typescript", "typescriptz"));
    }

    #[test]
    fn test_below_threshold() {
        // Only 'a' of "abc" found after the greedy scan: 1/3
        assert!(!fuzzy_match("a", "abc"));
        assert!(!fuzzy_match("database", "xyz"));
    }

    #[test]
    fn test_exact_threshold_boundary() {
        // 4 of 5 = 0.8 passes
        assert!(fuzzy_match("abcd", "abcdz"));
        // 3 of 4 = 0.75 fails
        assert!(!fuzzy_match("abc", "abcz"));
    }

    #[test]
    fn test_greedy_scan_does_not_backtrack() {
        // An unmatched query character stalls the scan: 'z' never appears so 0/5
        assert!(!fuzzy_match("hello", "zello"));
        // Same for a typo in the middle: "typexcript" stops at 'x', 4/10
        assert!(!fuzzy_match("typescript", "typexcript"));
        // 'b' is consumed at index 1 and no 'a' follows: 1/3
        assert!(!fuzzy_match("ab", "bab"));
    }

    #[test]
    fn test_greedy_match_count() {
        let query: Vec<char> = "projct".chars().collect();
        assert_eq!(greedy_match_count("project", &query), 6);
        let query: Vec<char> = "zello".chars().collect();
        assert_eq!(greedy_match_count("hello", &query), 0);
    }

    #[test]
    fn test_unicode_lowercase() {
        assert!(fuzzy_match("ÜBER Notes", "über"));
    }
}
