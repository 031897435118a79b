//! Quill Core - Core library for the Quill publishing client
//!
//! This crate provides the article model and its validation gate, the
//! layered configuration and secrets, the external article generator, and
//! the job store used by the background service.

pub mod article;
pub mod config;
pub mod error;
pub mod generator;
pub mod jobs;
pub mod secrets;

pub use article::{ArticlePayload, Category, ExcerptWarning, ValidatedArticle, ValidationError};
pub use config::{
    Config, GeneratorConfig, HttpConfig, IdentityConfig, ServiceConfig, SiteConfig,
};
pub use error::{Error, Result};
pub use generator::{ArticleBrief, ArticleGenerator, CommandGenerator, PromptContext};
pub use jobs::{JobId, JobRecord, JobStatus, JobStore, MemoryJobStore, RecordChange};
pub use secrets::{AccountSecrets, Credentials, Secrets};
