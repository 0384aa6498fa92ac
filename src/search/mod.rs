//! Search palette: query parsing, fuzzy matching and chat filtering.
//!
//! Every search is a linear scan over the in-memory collections. There is no
//! index; the collection sizes of a single user's history keep a scan cheap.

pub mod apply;
pub mod ast;
pub mod display;
pub mod fuzzy;
pub mod parser;

pub use apply::{RECENT_LIMIT, RESULT_LIMIT, apply_filters, build_haystack, search_chats, search_chats_at};
pub use ast::SearchFilters;
pub use fuzzy::{FUZZY_THRESHOLD, fuzzy_match};
pub use parser::{parse_query, parse_query_in};
