//! Client-side validation of article payloads
//!
//! Every path that produces an article (a file written by hand, the built-in
//! sample, or the external generator) goes through [`ArticlePayload::validate`]
//! before anything is sent. The site validates again on its side; this gate
//! only saves a round trip.

use std::fmt;
use std::ops::RangeInclusive;

use serde::Serialize;
use thiserror::Error;

use super::{ArticlePayload, Category};

/// Recommended excerpt length in characters
pub const EXCERPT_RANGE: RangeInclusive<usize> = 120..=160;

/// Reasons a payload is rejected before submission
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Category is not one of the site's categories
    #[error("Invalid category '{received}'. Must be one of: {}", allowed.join(", "))]
    InvalidCategory {
        received: String,
        allowed: Vec<&'static str>,
    },

    /// One or more required fields are blank
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// No tags left after trimming
    #[error("tags must be a non-empty list of strings")]
    EmptyTags,
}

/// Excerpt length outside [`EXCERPT_RANGE`]
///
/// Advisory only: the site accepts any non-empty excerpt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcerptWarning {
    pub field: &'static str,
    pub chars: usize,
}

impl fmt::Display for ExcerptWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is {} characters (recommended {}-{})",
            self.field,
            self.chars,
            EXCERPT_RANGE.start(),
            EXCERPT_RANGE.end()
        )
    }
}

/// A payload that passed [`ArticlePayload::validate`]
///
/// Only the validator constructs this, so holding one proves the checks ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidatedArticle(ArticlePayload);

impl ValidatedArticle {
    /// The normalized payload
    pub fn payload(&self) -> &ArticlePayload {
        &self.0
    }

    /// Unwrap into the normalized payload
    pub fn into_inner(self) -> ArticlePayload {
        self.0
    }

    /// The parsed category
    pub fn category(&self) -> Category {
        // Checked during validation
        self.0.category.parse().unwrap_or_default()
    }

    /// Excerpts outside the recommended length
    pub fn warnings(&self) -> Vec<ExcerptWarning> {
        [
            ("excerpt_en", &self.0.excerpt_en),
            ("excerpt_it", &self.0.excerpt_it),
            ("excerpt_es", &self.0.excerpt_es),
        ]
        .into_iter()
        .filter_map(|(field, text)| {
            let chars = text.chars().count();
            (!EXCERPT_RANGE.contains(&chars)).then_some(ExcerptWarning { field, chars })
        })
        .collect()
    }
}

impl ArticlePayload {
    /// Normalize and check the payload
    ///
    /// Checks run in order: category membership, then required text fields,
    /// then tags. A blank category is reported as a missing field rather than
    /// an invalid one, and the missing list names every blank field at once.
    pub fn validate(mut self) -> Result<ValidatedArticle, ValidationError> {
        self.normalize();

        if !self.category.is_empty() {
            self.category.parse::<Category>()?;
        }

        let mut missing: Vec<&'static str> = self
            .text_fields()
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| name)
            .collect();

        if self.category.is_empty() {
            missing.push("category");
        }

        if !missing.is_empty() {
            if self.tags.is_empty() {
                missing.push("tags");
            }
            return Err(ValidationError::MissingFields(missing));
        }

        if self.tags.is_empty() {
            return Err(ValidationError::EmptyTags);
        }

        Ok(ValidatedArticle(self))
    }
}
