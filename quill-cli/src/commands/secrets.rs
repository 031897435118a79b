//! Secrets command - manage the secrets file

use clap::{Args, Subcommand};
use quill_core::Secrets;

/// Arguments for the secrets command
#[derive(Args, Debug)]
pub struct SecretsArgs {
    #[command(subcommand)]
    pub command: SecretsCommand,
}

#[derive(Subcommand, Debug)]
pub enum SecretsCommand {
    /// Create a template secrets file with owner-only permissions
    Init,
}

impl SecretsArgs {
    /// Execute the secrets command
    pub fn execute(&self) -> anyhow::Result<()> {
        match self.command {
            SecretsCommand::Init => {
                let path = Secrets::create_template()?;
                println!("Created {}", path.display());
                println!("Add your account email and password, then run `quill login`");
            }
        }
        Ok(())
    }
}
