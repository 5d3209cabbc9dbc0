//! pairing-with core library.
//!
//! This crate provides the pieces behind the `pairing-with` CLI: the alias
//! book and its on-disk store, `Co-authored-by:` formatting, mention parsing
//! for commit messages, and the batched GitHub user lookup.

pub mod alias;
pub mod attribution;
pub mod config;
pub mod errors;
pub mod github;
pub mod mentions;

// Re-exports for convenience.
pub use alias::{AliasBook, AliasChange};
pub use attribution::{AttributionFormatter, UserRecord};
pub use config::AliasStore;
pub use errors::CoreError;
pub use github::GraphQlClient;
