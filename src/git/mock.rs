use crate::error::Result;
use crate::git::GitBackend;
use git2::Oid;

/// In-memory backend for testing the resolver without a real repository.
///
/// Commits are held most-recent-first, mirroring the walk order of the real
/// backend. HEAD is the first commit in the list.
pub struct MockBackend {
    commits: Vec<Oid>,
    tags: Vec<(String, Oid)>,
    dirty: bool,
}

impl MockBackend {
    /// Create an empty mock repository
    pub fn new() -> Self {
        MockBackend {
            commits: Vec::new(),
            tags: Vec::new(),
            dirty: false,
        }
    }

    /// Deterministic commit id from a single byte, for readable tests
    pub fn oid(byte: u8) -> Oid {
        Oid::from_bytes(&[byte; 20]).expect("20 bytes form a valid oid")
    }

    /// Add a commit on top of the current history and move HEAD to it
    pub fn commit(&mut self, oid: Oid) {
        self.commits.insert(0, oid);
    }

    /// Bind a tag to a commit
    pub fn tag(&mut self, name: impl Into<String>, oid: Oid) {
        self.tags.push((name.into(), oid));
    }

    /// Mark the working tree dirty or clean
    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl GitBackend for MockBackend {
    fn list_tags(&self) -> Result<Vec<(String, Oid)>> {
        Ok(self.tags.clone())
    }

    fn walk_commits(&self) -> Result<Box<dyn Iterator<Item = Result<Oid>> + '_>> {
        Ok(Box::new(self.commits.iter().copied().map(Ok)))
    }

    fn head_commit(&self) -> Result<Oid> {
        self.commits
            .first()
            .copied()
            .ok_or_else(|| git2::Error::from_str("mock repository has no commits").into())
    }

    fn is_dirty(&self, _include_untracked: bool) -> Result<bool> {
        Ok(self.dirty)
    }
}
