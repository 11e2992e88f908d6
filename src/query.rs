//! Path-level entry points: the only process-boundary surface of the core.
//!
//! Both functions locate the git repository containing `path` (searching
//! parent directories, like `git` itself) and resolve versions from its tag
//! history. The caller supplies the path explicitly; there is no caller
//! introspection.

use crate::boundary::ResolverWarning;
use crate::config::Config;
use crate::domain::Version;
use crate::error::Result;
use crate::git::Git2Backend;
use crate::resolver;
use std::path::Path;

/// Latest tagged version of the repository containing `path`.
///
/// # Returns
/// * `Ok((Version, warnings))` - The latest release-tag version plus any
///   per-tag parse diagnostics
/// * `Err` - `NoVersionsFound` when no tag parses, or a git error
pub fn query<P: AsRef<Path>>(path: P) -> Result<(Version, Vec<ResolverWarning>)> {
    let backend = Git2Backend::discover(path)?;
    let (latest, warnings) = resolver::latest_tag_version(&backend)?;
    Ok((latest.version, warnings))
}

/// Upcoming version of the repository containing `path`, derived from the
/// latest tag, commit distance and working-tree state.
pub fn predict<P: AsRef<Path>>(
    path: P,
    config: &Config,
) -> Result<(Version, Vec<ResolverWarning>)> {
    let backend = Git2Backend::discover(path)?;
    resolver::upcoming_version(&backend, config)
}
