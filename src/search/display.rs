use crate::models::Chat;

/// Number of model badges shown per search result
pub const MAX_BADGES: usize = 3;

/// Short badge for a model id: the part before the first `-`, uppercased
///
/// `gpt-4` → `GPT`, `claude-3-haiku` → `CLAUDE`.
pub fn model_badge(model_id: &str) -> String {
    model_id.split('-').next().unwrap_or(model_id).to_uppercase()
}

/// Badges for the first [`MAX_BADGES`] models and the count of models left out
pub fn model_badges(chat: &Chat) -> (Vec<String>, usize) {
    let badges = chat.models.iter().take(MAX_BADGES).map(|m| model_badge(m)).collect();
    (badges, chat.models.len().saturating_sub(MAX_BADGES))
}

/// Cost as shown next to a result: `$0.0123`
pub fn format_cost(cost: f64) -> String {
    format!("${:.4}", cost)
}
