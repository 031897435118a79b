//! Article model for the blog creation endpoint
//!
//! An article is written once per supported language (English, Italian and
//! Spanish) and carries a category from a fixed list plus a set of tags.
//! Content is Markdown and may embed chart shortcodes such as
//! `[chart:line labels="A,B" datasets='[...]' /]`; these are opaque here and
//! only interpreted by the site's renderer.

mod sample;
mod validate;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub use validate::{ExcerptWarning, ValidatedArticle, ValidationError, EXCERPT_RANGE};

/// Blog category accepted by the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    #[default]
    #[serde(rename = "Investing")]
    Investing,
    #[serde(rename = "Saving & Emergency Fund")]
    SavingEmergencyFund,
    #[serde(rename = "Budgeting & Spending")]
    BudgetingSpending,
    #[serde(rename = "Debt & Loans")]
    DebtLoans,
    #[serde(rename = "Income & Earning More")]
    IncomeEarningMore,
    #[serde(rename = "Money Mindset")]
    MoneyMindset,
}

impl Category {
    /// Get all categories in the order the site lists them
    pub fn all() -> &'static [Category] {
        &[
            Category::Investing,
            Category::SavingEmergencyFund,
            Category::BudgetingSpending,
            Category::DebtLoans,
            Category::IncomeEarningMore,
            Category::MoneyMindset,
        ]
    }

    /// The exact string the site expects on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Investing => "Investing",
            Category::SavingEmergencyFund => "Saving & Emergency Fund",
            Category::BudgetingSpending => "Budgeting & Spending",
            Category::DebtLoans => "Debt & Loans",
            Category::IncomeEarningMore => "Income & Earning More",
            Category::MoneyMindset => "Money Mindset",
        }
    }

    /// All wire names, for error messages
    pub fn names() -> Vec<&'static str> {
        Self::all().iter().map(Category::as_str).collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    /// Matching is exact: the site compares category strings verbatim
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidCategory {
                received: s.to_string(),
                allowed: Self::names(),
            })
    }
}

/// Payload for `POST /api/blog/create`
///
/// Every field defaults to empty when deserializing so that an incomplete
/// file still loads and the validator can report everything that is missing
/// in one go.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticlePayload {
    pub title_en: String,
    pub title_it: String,
    pub title_es: String,
    pub excerpt_en: String,
    pub excerpt_it: String,
    pub excerpt_es: String,
    pub content_en: String,
    pub content_it: String,
    pub content_es: String,
    /// One of [`Category::names`]
    pub category: String,
    pub tags: Vec<String>,
    /// Optional cover image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

impl ArticlePayload {
    /// Load a payload from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        serde_json::from_str(&contents).map_err(|e| {
            Error::Config(format!("Failed to parse article {}: {}", path.display(), e))
        })
    }

    /// The nine per-language text fields, in wire order
    pub(crate) fn text_fields(&self) -> [(&'static str, &String); 9] {
        [
            ("title_en", &self.title_en),
            ("title_it", &self.title_it),
            ("title_es", &self.title_es),
            ("excerpt_en", &self.excerpt_en),
            ("excerpt_it", &self.excerpt_it),
            ("excerpt_es", &self.excerpt_es),
            ("content_en", &self.content_en),
            ("content_it", &self.content_it),
            ("content_es", &self.content_es),
        ]
    }

    fn text_fields_mut(&mut self) -> [&mut String; 10] {
        [
            &mut self.title_en,
            &mut self.title_it,
            &mut self.title_es,
            &mut self.excerpt_en,
            &mut self.excerpt_it,
            &mut self.excerpt_es,
            &mut self.content_en,
            &mut self.content_it,
            &mut self.content_es,
            &mut self.category,
        ]
    }

    /// Trim stray whitespace from every field and tag
    ///
    /// Tags that are blank after trimming are dropped, and a blank cover
    /// image becomes `None`.
    pub fn normalize(&mut self) {
        for field in self.text_fields_mut() {
            let trimmed = field.trim();
            if trimmed.len() != field.len() {
                *field = trimmed.to_string();
            }
        }

        self.tags = self
            .tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        self.cover_image = self
            .cover_image
            .take()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
    }
}
