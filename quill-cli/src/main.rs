//! Quill CLI - log in and publish draft articles
//!
//! Articles are validated locally, then created as drafts on the site for
//! manual review.

mod commands;

use clap::{Parser, Subcommand};
use quill_core::{Config, Secrets};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{CheckArgs, LoginArgs, PublishArgs, SecretsArgs, ServeArgs, ValidateArgs};

/// Quill: publish multi-language articles as drafts
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Site base URL (overrides config and env)
    #[arg(long, global = true, env = "QUILL_SITE_URL")]
    site_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Log in and show the account's role
    Login(LoginArgs),

    /// Validate and publish an article as a draft
    #[command(visible_alias = "p")]
    Publish(PublishArgs),

    /// Validate an article file without publishing
    Validate(ValidateArgs),

    /// Post a small test article to check token and permissions
    Check(CheckArgs),

    /// Print a sample article JSON
    Template,

    /// Run the background generation service
    Serve(ServeArgs),

    /// Show current configuration
    Config,

    /// Manage the secrets file
    Secrets(SecretsArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    let port = match &cli.command {
        Some(Commands::Serve(args)) => args.port,
        _ => None,
    };

    // Load configuration with overrides
    let config = Config::load_with_overrides(cli.site_url.clone(), port)?;

    if cli.verbose {
        tracing::info!(
            site = %config.site.base_url,
            identity = %config.identity.base_url,
            timeout = ?config.http.timeout,
            generator = %config.generator.command,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("quill {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Login(args)) => {
            args.execute(&config, &Secrets::load()?).await?;
        }
        Some(Commands::Publish(args)) => {
            args.execute(cli.verbose, &config, &Secrets::load()?).await?;
        }
        Some(Commands::Validate(args)) => {
            args.execute()?;
        }
        Some(Commands::Check(args)) => {
            args.execute(&config, &Secrets::load()?).await?;
        }
        Some(Commands::Template) => {
            let sample = quill_core::ArticlePayload::sample();
            println!("{}", serde_json::to_string_pretty(&sample)?);
        }
        Some(Commands::Serve(args)) => {
            args.execute(&config, &Secrets::load()?).await?;
        }
        Some(Commands::Config) => {
            print_config(&config);
        }
        Some(Commands::Secrets(args)) => {
            args.execute()?;
        }
        None => {
            println!("Quill - publish multi-language articles as drafts");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn print_config(config: &Config) {
    println!("Quill Configuration");
    println!("===================");
    println!();
    println!("Site:");
    println!("  base_url: {}", config.site.base_url);
    println!();
    println!("Identity:");
    println!("  base_url: {}", or_unset(&config.identity.base_url));
    println!(
        "  api_key: {}",
        if config.identity.api_key.is_empty() { "(not set)" } else { "(set)" }
    );
    println!();
    println!("HTTP:");
    println!("  timeout: {:?}", config.http.timeout);
    println!();
    println!("Service:");
    println!("  bind: {}:{}", config.service.bind_address, config.service.port);
    println!();
    println!("Generator:");
    println!("  command: {} {}", config.generator.command, config.generator.args.join(" "));
    println!("  model: {}", config.generator.model.as_deref().unwrap_or("(default)"));
    println!();

    if let Some(path) = Config::default_config_path() {
        println!("Config file: {}", path.display());
        if path.exists() {
            println!("  (exists)");
        } else {
            println!("  (not found - using defaults)");
        }
    }
    if let Some(path) = Secrets::default_secrets_path() {
        println!("Secrets file: {}", path.display());
        if !path.exists() {
            println!("  (not found - run `quill secrets init`)");
        }
    }
}

fn or_unset(value: &str) -> &str {
    if value.trim().is_empty() {
        "(not set)"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_publish() {
        let cli = Cli::try_parse_from([
            "quill",
            "publish",
            "--file",
            "post.json",
            "--dry-run",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Publish(args)) => {
                assert_eq!(args.file.unwrap().to_str(), Some("post.json"));
                assert!(args.dry_run);
                assert!(args.token.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["quill", "check", "--site-url", "http://localhost:3000", "-v"])
            .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.site_url.as_deref(), Some("http://localhost:3000"));
    }

    #[test]
    fn test_validate_requires_file() {
        assert!(Cli::try_parse_from(["quill", "validate"]).is_err());
    }
}
