//! Check command - post a test article with a pre-issued token

use clap::Args;
use quill_api::{Error, Publisher, Session};
use quill_core::{ArticlePayload, Config, Secrets};

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Bearer token (defaults to QUILL_TOKEN or the secrets file)
    #[arg(long)]
    pub token: Option<String>,
}

impl CheckArgs {
    /// Execute the check command
    pub async fn execute(&self, config: &Config, secrets: &Secrets) -> anyhow::Result<()> {
        let Some(token) = self.token.clone().or_else(|| secrets.token()) else {
            anyhow::bail!(
                "No token available. Pass --token, set QUILL_TOKEN, \
                 or run `quill login --print-token` to get one"
            );
        };

        let publisher = Publisher::from_config(config)?;
        println!("Testing connection to the blog API...");
        println!("  URL: {}", publisher.create_url());
        println!("  Token: {}", super::token_prefix(&token));
        println!();

        let article = ArticlePayload::connection_test().validate()?;
        match publisher.publish(&Session::from_token(token), &article).await {
            Ok(result) => {
                println!("Connection works");
                super::publish::print_result(&result, publisher.site_url());
                Ok(())
            }
            Err(err) => {
                explain(&err);
                Err(err.into())
            }
        }
    }
}

/// Print a hint for each failure kind
fn explain(err: &Error) {
    eprintln!();
    match err {
        Error::Unauthorized(_) => {
            eprintln!("UNAUTHORIZED - token invalid or expired");
            eprintln!("  Get a new token with: quill login --print-token");
        }
        Error::Authorization {
            your_role,
            required_role,
            ..
        } => {
            eprintln!("FORBIDDEN - your account doesn't have permission");
            eprintln!("  Your role: {}", your_role);
            eprintln!("  Required: {}", required_role);
            eprintln!("  Make sure your account is 'editor' or 'admin'");
        }
        Error::RemoteValidation {
            message,
            missing_fields,
        } => {
            eprintln!("BAD REQUEST");
            eprintln!("  Error: {}", message);
            if !missing_fields.is_empty() {
                eprintln!("  Missing: {}", missing_fields.join(", "));
            }
        }
        Error::Transport(_) => {
            eprintln!("NETWORK ERROR - no response from the site");
            eprintln!("  Check that the site is running and that site.base_url is correct");
        }
        Error::Remote { status, message } => {
            eprintln!("ERROR {}", status);
            eprintln!("  {}", message);
        }
        other => {
            eprintln!("ERROR - {}", other);
        }
    }
    eprintln!();
}
