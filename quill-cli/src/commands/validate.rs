//! Validate command - check an article file locally

use std::path::PathBuf;

use clap::Args;
use quill_core::ArticlePayload;

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Article JSON file
    #[arg(required = true)]
    pub file: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> anyhow::Result<()> {
        let article = ArticlePayload::from_file(&self.file)?.validate()?;
        let payload = article.payload();

        println!("{} is valid", self.file.display());
        println!("  Title: {}", payload.title_en);
        println!("  Category: {}", article.category());
        println!("  Tags: {}", payload.tags.join(", "));
        if let Some(ref cover) = payload.cover_image {
            println!("  Cover image: {}", cover);
        }

        let warnings = article.warnings();
        if !warnings.is_empty() {
            println!();
            for warning in warnings {
                println!("Warning: {}", warning);
            }
        }

        Ok(())
    }
}
