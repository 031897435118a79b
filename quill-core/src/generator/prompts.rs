//! Prompt template for the article generator
//!
//! The template uses `{{VARIABLE}}` placeholders that are rendered with a
//! [`PromptContext`].

use std::collections::HashMap;

use super::ArticleBrief;

const ARTICLE_PROMPT: &str = include_str!("prompts/article.md");

/// Context for rendering a prompt template
#[derive(Debug, Clone, Default)]
pub struct PromptContext {
    /// Variable substitutions
    variables: HashMap<String, String>,
}

impl PromptContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// Set a variable value (builder pattern)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Context for an article brief
    pub fn for_brief(brief: &ArticleBrief) -> Self {
        let tags = if brief.tags.is_empty() {
            "a JSON list of 3 to 6 short lowercase tags".to_string()
        } else {
            // serde_json never fails on a list of strings
            serde_json::to_string(&brief.tags).unwrap_or_default()
        };

        Self::new()
            .with("TOPIC", brief.topic.trim())
            .with("CATEGORY", brief.category.as_str())
            .with("TAGS", tags)
    }
}

/// Render the article prompt for a brief
pub fn render(brief: &ArticleBrief) -> String {
    render_template(ARTICLE_PROMPT, &PromptContext::for_brief(brief))
}

/// Render a template string with variable substitution
fn render_template(template: &str, context: &PromptContext) -> String {
    let mut result = template.to_string();

    for (key, value) in &context.variables {
        let placeholder = format!("{{{{{}}}}}", key);
        result = result.replace(&placeholder, value);
    }

    // Replace any remaining {{UPPERCASE_NAME}} with "(not specified)"
    loop {
        let start = result.find("{{");
        let end = result.find("}}");

        match (start, end) {
            (Some(s), Some(e)) if s < e => {
                let inside = &result[s + 2..e];
                if inside.chars().all(|c| c.is_ascii_uppercase() || c == '_') {
                    let placeholder = result[s..e + 2].to_string();
                    result = result.replacen(&placeholder, "(not specified)", 1);
                } else {
                    break;
                }
            }
            _ => break,
        }
    }

    result
}
