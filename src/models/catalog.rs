use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A model the user can select for a conversation (costs are USD per 1K tokens)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub input_cost: f64,
    pub output_cost: f64,
    pub context_length: u64,
    pub is_expensive: bool,
    pub is_reasoning: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub is_favorite: bool,
    pub usage_count: u64,
    pub created_at: DateTime<Utc>,
}

fn model(
    id: &str,
    name: &str,
    description: &str,
    input_cost: f64,
    output_cost: f64,
    context_length: u64,
    is_expensive: bool,
) -> ModelInfo {
    ModelInfo {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        input_cost,
        output_cost,
        context_length,
        is_expensive,
        is_reasoning: false,
    }
}

/// Built-in model catalog
pub fn default_model_catalog() -> Vec<ModelInfo> {
    vec![
        model(
            "gpt-3.5-turbo",
            "GPT-3.5 Turbo",
            "Fast and efficient for most tasks",
            0.0005,
            0.0015,
            16_385,
            false,
        ),
        model("gpt-4", "GPT-4", "Most capable model for complex reasoning", 0.03, 0.06, 8_192, true),
        model(
            "claude-3-haiku",
            "Claude 3 Haiku",
            "Fast and affordable for simple tasks",
            0.00025,
            0.00125,
            200_000,
            false,
        ),
        model(
            "claude-3-sonnet",
            "Claude 3 Sonnet",
            "Balanced performance and cost",
            0.003,
            0.015,
            200_000,
            false,
        ),
    ]
}

/// Starter prompt library seeded into a fresh store
pub fn default_prompts(now: DateTime<Utc>) -> Vec<Prompt> {
    let prompt = |id: &str, title: &str, content: &str, category: &str, fav: bool, uses: u64| {
        Prompt {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            category: category.to_string(),
            is_favorite: fav,
            usage_count: uses,
            created_at: now,
        }
    };

    vec![
        prompt(
            "1",
            "Code Review",
            "Please review this code and provide suggestions for improvement:",
            "Development",
            true,
            12,
        ),
        prompt(
            "2",
            "Explain Concept",
            "Explain the following concept in simple terms:",
            "Education",
            false,
            8,
        ),
        prompt(
            "3",
            "Writing Assistant",
            "Help me improve this text for clarity and style:",
            "Writing",
            true,
            15,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_contents() {
        let catalog = default_model_catalog();
        let ids: Vec<&str> = catalog.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["gpt-3.5-turbo", "gpt-4", "claude-3-haiku", "claude-3-sonnet"]);

        let expensive: Vec<&str> =
            catalog.iter().filter(|m| m.is_expensive).map(|m| m.id.as_str()).collect();
        assert_eq!(expensive, vec!["gpt-4"]);
    }

    #[test]
    fn test_default_prompts() {
        let prompts = default_prompts(Utc::now());
        assert_eq!(prompts.len(), 3);
        assert_eq!(prompts.iter().filter(|p| p.is_favorite).count(), 2);
    }
}
