//! Login command - exchange credentials for a token

use clap::Args;
use quill_core::{Config, Secrets};

/// Arguments for the login command
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Print the access token to stdout
    #[arg(long)]
    pub print_token: bool,
}

impl LoginArgs {
    /// Execute the login command
    pub async fn execute(&self, config: &Config, secrets: &Secrets) -> anyhow::Result<()> {
        let session = super::login(config, secrets).await?;

        if self.print_token {
            println!();
            println!("{}", session.access_token());
        }

        Ok(())
    }
}
