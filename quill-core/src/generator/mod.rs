//! Article generation by an external writer
//!
//! The generator turns a short brief (a topic plus optional category, tags
//! and cover image) into a full [`ArticlePayload`]. Output is not trusted:
//! callers still run it through [`ArticlePayload::validate`].

mod command;
mod prompts;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{ArticlePayload, Category, Result};

pub use command::CommandGenerator;
pub use prompts::{render, PromptContext};

/// What to write about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleBrief {
    pub topic: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
}

impl ArticleBrief {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            category: Category::default(),
            tags: Vec::new(),
            cover_image: None,
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_cover_image(mut self, cover_image: impl Into<String>) -> Self {
        self.cover_image = Some(cover_image.into());
        self
    }

    /// Overlay the brief's fixed choices onto a generated payload
    ///
    /// The category always comes from the brief; tags and cover image only
    /// when the brief supplies them.
    pub fn apply_to(&self, payload: &mut ArticlePayload) {
        payload.category = self.category.to_string();

        if !self.tags.is_empty() {
            payload.tags = self.tags.clone();
        }

        if let Some(ref cover) = self.cover_image {
            if !cover.trim().is_empty() {
                payload.cover_image = Some(cover.clone());
            }
        }
    }
}

/// Trait for article writers
#[async_trait]
pub trait ArticleGenerator: Send + Sync {
    /// Get the name of this generator
    fn name(&self) -> &'static str;

    /// Write an article for the brief
    async fn generate(&self, brief: &ArticleBrief) -> Result<ArticlePayload>;
}
