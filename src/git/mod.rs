//! Git read-only facts abstraction layer
//!
//! The resolver only ever *reads* a repository: tag enumeration, commit
//! walking, HEAD identity and working-tree dirtiness. The [GitBackend] trait
//! captures exactly that surface, with two implementations:
//!
//! - [repository::Git2Backend]: real repositories via the `git2` crate
//! - [mock::MockBackend]: in-memory implementation for tests
//!
//! Most code should depend on the trait rather than a concrete backend.

pub mod mock;
pub mod repository;

pub use mock::MockBackend;
pub use repository::Git2Backend;

use crate::error::Result;
use git2::Oid;

/// Length of the short commit hash used as local version metadata
pub const SHORT_HASH_LEN: usize = 8;

/// First [SHORT_HASH_LEN] hex characters of a commit id
pub fn short_hash(oid: Oid) -> String {
    let full = oid.to_string();
    full.chars().take(SHORT_HASH_LEN).collect()
}

/// Read-only repository facts consumed by the resolver.
///
/// All methods are blocking calls with no internal timeout; callers that
/// need bounded latency impose their own. Errors from the underlying git
/// implementation propagate unchanged.
pub trait GitBackend {
    /// Every tag in the repository with the commit it is bound to.
    /// Annotated tags are peeled to their target commit.
    fn list_tags(&self) -> Result<Vec<(String, Oid)>>;

    /// Lazy walk over commits reachable from HEAD, most recent first.
    /// Finite, and not restartable across backend state changes.
    fn walk_commits(&self) -> Result<Box<dyn Iterator<Item = Result<Oid>> + '_>>;

    /// The commit HEAD currently points at
    fn head_commit(&self) -> Result<Oid>;

    /// Whether the working tree has uncommitted changes.
    ///
    /// # Arguments
    /// * `include_untracked` - Whether untracked files count as dirt
    fn is_dirty(&self, include_untracked: bool) -> Result<bool>;
}
