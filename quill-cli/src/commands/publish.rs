//! Publish command - validate an article and create a draft

use std::path::PathBuf;

use clap::Args;
use quill_api::{PublishResult, Publisher, Session};
use quill_core::{ArticlePayload, Config, Secrets};
use url::Url;

/// Arguments for the publish command
#[derive(Args, Debug)]
pub struct PublishArgs {
    /// Article JSON file (defaults to the built-in sample)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Pre-issued bearer token; skips login
    #[arg(long)]
    pub token: Option<String>,

    /// Validate and show what would be sent without publishing
    #[arg(long)]
    pub dry_run: bool,
}

impl PublishArgs {
    /// Execute the publish command
    pub async fn execute(&self, verbose: bool, config: &Config, secrets: &Secrets) -> anyhow::Result<()> {
        let payload = match &self.file {
            Some(path) => ArticlePayload::from_file(path)?,
            None => {
                println!("No --file given, publishing the sample article");
                ArticlePayload::sample()
            }
        };

        let article = payload.validate().map_err(quill_api::Error::from)?;
        for warning in article.warnings() {
            println!("Warning: {}", warning);
        }

        let payload = article.payload();
        if verbose {
            tracing::info!(
                title = %payload.title_en,
                category = %payload.category,
                tags = ?payload.tags,
                "Article validated"
            );
        }

        println!("Title: {}", payload.title_en);
        println!("Category: {}", payload.category);
        println!("Tags: {}", payload.tags.join(", "));
        println!();

        if self.dry_run {
            println!("[Dry run] Would create a draft at {}", config.site_url()?.as_str().trim_end_matches('/'));
            println!("{}", serde_json::to_string_pretty(&article)?);
            return Ok(());
        }

        let token = self.token.clone().or_else(|| secrets.token());
        let session = match token {
            Some(token) => Session::from_token(token),
            None => super::login(config, secrets).await?,
        };

        let publisher = Publisher::from_config(config)?;
        println!("Creating draft...");
        let result = publisher.publish(&session, &article).await?;

        print_result(&result, publisher.site_url());
        Ok(())
    }
}

/// Print the created post and what to do next
pub(crate) fn print_result(result: &PublishResult, site: &Url) {
    let post = &result.post;

    println!();
    println!("Draft created");
    println!("  ID: {}", post.id);
    println!("  Slug: {}", post.slug);
    println!("  Title: {}", post.display_title());
    println!("  Category: {}", post.category);
    println!("  Published: {}", post.published);
    if let Some(ref created_at) = post.created_at {
        println!("  Created: {}", created_at);
    }

    if !result.next_steps.is_empty() {
        println!();
        println!("Next steps:");
        for (i, step) in result.next_steps.iter().enumerate() {
            println!("  {}. {}", i + 1, step);
        }
    }

    println!();
    println!("Edit: {}", result.edit_url(site));
}
