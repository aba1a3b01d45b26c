//! gitcredits core library.
//!
//! This crate provides the building blocks for dumping a repository's
//! contributor credits: configuration, the GitHub REST client, display-name
//! normalization, the credits pipeline engine, and the git hook installer.

pub mod config;
pub mod engine;
pub mod errors;
pub mod github;
pub mod hooks;
pub mod models;
pub mod normalize;

// Re-exports for convenience.
pub use config::AppConfig;
pub use engine::CreditsEngine;
pub use github::GitHubClient;
