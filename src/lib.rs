//! Query and predict semantic versions from git tag history.
//!
//! The crate combines the most recent release tag of a repository with the
//! amount of change since that tag (commit distance, working-tree dirtiness)
//! into a deterministic, monotonically increasing version string.

pub mod boundary;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod query;
pub mod resolver;
pub mod ui;

pub use error::{Result, VersionQueryError};
pub use query::{predict, query};
