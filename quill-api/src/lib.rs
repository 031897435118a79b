//! Quill API - clients for the identity service and the blog endpoint
//!
//! [`Authenticator`] exchanges an email and password for a bearer token and
//! [`Publisher`] submits a validated article with that token. Each failure
//! comes back as a distinct [`Error`] variant so callers can tell bad
//! credentials from an unreachable service.

mod auth;
mod error;
mod http;
mod publisher;
mod types;

pub use auth::Authenticator;
pub use error::{Error, ErrorKind, Result};
pub use publisher::Publisher;
pub use types::{PublishResult, PublishedPost, Session, PUBLISHING_ROLES};
