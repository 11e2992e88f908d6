use crate::error::{Result, VersionQueryError};
use crate::git::GitBackend;
use git2::{Oid, Repository, StatusOptions};
use std::path::Path;

/// Wrapper around git2::Repository with our backend trait interface
pub struct Git2Backend {
    repo: Repository,
}

impl Git2Backend {
    /// Open the repository containing `path`, searching parent directories
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path)?;
        Ok(Git2Backend { repo })
    }

    /// Open the repository at exactly `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::open(path)?;
        Ok(Git2Backend { repo })
    }

    /// Create from an existing git2::Repository
    pub fn from_git2(repo: Repository) -> Self {
        Git2Backend { repo }
    }

    /// Path of the repository's working directory, if it has one
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }
}

impl GitBackend for Git2Backend {
    fn list_tags(&self) -> Result<Vec<(String, Oid)>> {
        let names = self.repo.tag_names(None)?;

        let mut tags = Vec::new();
        for name in names.iter().flatten() {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;
            // lightweight tags point at the commit directly; annotated tags
            // are peeled through the tag object
            let commit = reference.peel_to_commit()?;
            tags.push((name.to_string(), commit.id()));
        }

        Ok(tags)
    }

    fn walk_commits(&self) -> Result<Box<dyn Iterator<Item = Result<Oid>> + '_>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.push_head()?;

        Ok(Box::new(
            revwalk.map(|oid| oid.map_err(VersionQueryError::from)),
        ))
    }

    fn head_commit(&self) -> Result<Oid> {
        let head = self.repo.head()?;
        Ok(head.peel_to_commit()?.id())
    }

    fn is_dirty(&self, include_untracked: bool) -> Result<bool> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(include_untracked)
            .include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut options))?;
        Ok(!statuses.is_empty())
    }
}
