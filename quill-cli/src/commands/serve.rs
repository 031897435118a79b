//! Serve command - run the background generation service

use clap::Args;
use quill_core::{Config, Secrets};

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on (overrides config and env)
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Execute the serve command
    ///
    /// The port override is applied when the configuration is loaded.
    pub async fn execute(&self, config: &Config, secrets: &Secrets) -> anyhow::Result<()> {
        println!(
            "Starting Quill service on {}:{}",
            config.service.bind_address, config.service.port
        );
        quill_service::serve(config, secrets).await?;
        Ok(())
    }
}
