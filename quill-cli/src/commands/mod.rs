//! CLI command implementations

pub mod check;
pub mod login;
pub mod publish;
pub mod secrets;
pub mod serve;
pub mod validate;

pub use check::CheckArgs;
pub use login::LoginArgs;
pub use publish::PublishArgs;
pub use secrets::SecretsArgs;
pub use serve::ServeArgs;
pub use validate::ValidateArgs;

use quill_api::{Authenticator, Session};
use quill_core::{Config, Secrets};

/// Log in with the configured account
pub(crate) async fn login(config: &Config, secrets: &Secrets) -> anyhow::Result<Session> {
    let authenticator = Authenticator::from_config(config)?;
    let credentials = secrets.credentials()?;

    println!("Logging in as {}...", credentials.email);
    let session = authenticator.login(&credentials).await?;

    println!("Login successful");
    println!("  Email: {}", session.email().unwrap_or(&credentials.email));
    println!("  Role: {}", session.role().unwrap_or("unknown"));
    if session.can_publish() == Some(false) {
        println!();
        println!(
            "WARNING: Your role is '{}'. You need 'editor' or 'admin' role to create posts.",
            session.role().unwrap_or("unknown")
        );
    }

    Ok(session)
}

/// First characters of a token, for display
pub(crate) fn token_prefix(token: &str) -> String {
    let prefix: String = token.chars().take(20).collect();
    format!("{}...", prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_prefix() {
        assert_eq!(token_prefix("short"), "short...");
        assert_eq!(
            token_prefix("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9"),
            "eyJhbGciOiJIUzI1NiIs..."
        );
    }
}
