//! Repository version resolver.
//!
//! Reads tag-encoded versions from a [GitBackend], selects the latest by the
//! version ordering, and derives the upcoming version by layering commit
//! distance and working-tree dirtiness onto it.

use crate::boundary::ResolverWarning;
use crate::config::Config;
use crate::domain::tag::release_tag_version;
use crate::domain::{Local, PreRelease, Separator, Version, VersionComponent};
use crate::error::{Result, VersionQueryError};
use crate::git::{short_hash, GitBackend};
use git2::Oid;

/// A parsed release tag: the tag name, its bound commit and the version it
/// encodes
#[derive(Debug, Clone)]
pub struct TaggedVersion {
    pub tag: String,
    pub commit: Oid,
    pub version: Version,
}

/// All parsed release tags of a repository together with the per-tag parse
/// diagnostics
#[derive(Debug, Default)]
pub struct TagVersions {
    pub entries: Vec<TaggedVersion>,
    pub warnings: Vec<ResolverWarning>,
}

/// Collect every parsable release tag of the repository.
///
/// Tags without a leading `v` are not release tags and are skipped silently.
/// `v`-prefixed tags whose version part fails to parse are dropped with an
/// [ResolverWarning::UnparsableTag] diagnostic; a bad tag never fails the
/// whole collection.
pub fn collect_tag_versions(backend: &dyn GitBackend) -> Result<TagVersions> {
    let mut collected = TagVersions::default();

    for (name, commit) in backend.list_tags()? {
        let Some(version_part) = release_tag_version(&name) else {
            continue;
        };
        match Version::parse(version_part) {
            Ok(version) => collected.entries.push(TaggedVersion {
                tag: name,
                commit,
                version,
            }),
            Err(err) => collected.warnings.push(ResolverWarning::UnparsableTag {
                tag: name,
                reason: err.to_string(),
            }),
        }
    }

    Ok(collected)
}

/// Latest release tag of the repository by version ordering.
///
/// # Returns
/// * `Ok((TaggedVersion, warnings))` - The maximal entry plus any per-tag
///   parse diagnostics gathered along the way
/// * `Err(NoVersionsFound)` - No tag encodes a parsable version
pub fn latest_tag_version(
    backend: &dyn GitBackend,
) -> Result<(TaggedVersion, Vec<ResolverWarning>)> {
    let TagVersions { entries, warnings } = collect_tag_versions(backend)?;

    let latest = entries
        .into_iter()
        .max_by(|a, b| a.version.cmp(&b.version))
        .ok_or(VersionQueryError::NoVersionsFound)?;

    Ok((latest, warnings))
}

/// Derive the upcoming version of the checkout.
///
/// Policy:
/// - clean tree sitting exactly on the latest release tag: the tagged
///   version is returned unchanged;
/// - new commits on a pre-release version set its counter to the commit
///   distance from the tag (absolute, not added on top of the old counter);
/// - new commits on a final version bump the patch component and attach a
///   fresh `.{label}{distance}` pre-release segment;
/// - new commits record the 8-character HEAD hash as local metadata;
/// - a dirty tree appends a `dirty<YYYYMMDDHHMMSS>` local segment, making
///   every dirty invocation produce a distinct string on purpose.
///
/// The version bound to the tag is never mutated; derivation works on an
/// independent copy.
pub fn upcoming_version(
    backend: &dyn GitBackend,
    config: &Config,
) -> Result<(Version, Vec<ResolverWarning>)> {
    let (latest, warnings) = latest_tag_version(backend)?;

    let head = backend.head_commit()?;
    let is_dirty = backend.is_dirty(config.include_untracked)?;
    let has_new_commits = head != latest.commit;

    if !has_new_commits && !is_dirty {
        return Ok((latest.version, warnings));
    }

    let mut version = latest.version.clone();

    if has_new_commits {
        let distance = commit_distance(backend, latest.commit, config.max_commit_distance)?;

        version = if version.has_pre_release() {
            version.increment(VersionComponent::PrePatch, distance)?
        } else {
            // the next release is assumed to be at least a patch above the
            // last tag
            let bumped = version.increment(VersionComponent::Patch, 1)?;
            bumped.with_pre_release(PreRelease::new(
                Some(Separator::Dot),
                config.pre_release_label.as_str(),
                Some(distance),
            )?)
        };

        version = version.with_local(Local::new(short_hash(head)));
    }

    if is_dirty {
        let stamp = format!(
            "dirty{}",
            chrono::Local::now().format("%Y%m%d%H%M%S")
        );
        let local = match version.local() {
            Some(existing) => {
                let mut local = existing.clone();
                local.push(Separator::Dot, stamp);
                local
            }
            None => Local::new(stamp),
        };
        version = version.with_local(local);
    }

    Ok((version, warnings))
}

/// Number of commits reachable from HEAD that are strictly newer than
/// `tag_commit`. The walk stops at the tag's commit without counting it; if
/// the tag commit is not reached within `max_distance` commits the walk is
/// aborted.
///
/// A tag commit that is not an ancestor of HEAD (tagged on an unmerged
/// branch) is never reached: the distance is then the full history depth,
/// bounded by `max_distance`.
fn commit_distance(backend: &dyn GitBackend, tag_commit: Oid, max_distance: usize) -> Result<u64> {
    let mut distance: u64 = 0;

    for oid in backend.walk_commits()? {
        if oid? == tag_commit {
            break;
        }
        if distance as usize >= max_distance {
            return Err(VersionQueryError::CommitDistanceExceeded(max_distance));
        }
        distance += 1;
    }

    Ok(distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockBackend;

    fn oid(byte: u8) -> Oid {
        MockBackend::oid(byte)
    }

    #[test]
    fn test_collect_skips_non_release_tags_silently() {
        let mut repo = MockBackend::new();
        repo.commit(oid(1));
        repo.tag("v1.0.0", oid(1));
        repo.tag("nightly", oid(1));
        repo.tag("1.2.3", oid(1));

        let collected = collect_tag_versions(&repo).unwrap();
        assert_eq!(collected.entries.len(), 1);
        assert!(collected.warnings.is_empty());
    }

    #[test]
    fn test_collect_warns_on_unparsable_release_tag() {
        let mut repo = MockBackend::new();
        repo.commit(oid(1));
        repo.tag("v1.0.0", oid(1));
        repo.tag("vNext", oid(1));

        let collected = collect_tag_versions(&repo).unwrap();
        assert_eq!(collected.entries.len(), 1);
        assert_eq!(collected.warnings.len(), 1);
        assert!(matches!(
            &collected.warnings[0],
            ResolverWarning::UnparsableTag { tag, .. } if tag == "vNext"
        ));
    }

    #[test]
    fn test_latest_is_maximum_regardless_of_enumeration_order() {
        for reversed in [false, true] {
            let mut repo = MockBackend::new();
            repo.commit(oid(1));
            repo.commit(oid(2));
            if reversed {
                repo.tag("v1.2.0", oid(2));
                repo.tag("v1.0.0", oid(1));
            } else {
                repo.tag("v1.0.0", oid(1));
                repo.tag("v1.2.0", oid(2));
            }

            let (latest, warnings) = latest_tag_version(&repo).unwrap();
            assert_eq!(latest.version.to_string(), "1.2.0");
            assert_eq!(latest.tag, "v1.2.0");
            assert!(warnings.is_empty());
        }
    }

    #[test]
    fn test_latest_fails_without_parsable_tags() {
        let mut repo = MockBackend::new();
        repo.commit(oid(1));
        repo.tag("nightly", oid(1));

        let err = latest_tag_version(&repo).unwrap_err();
        assert!(matches!(err, VersionQueryError::NoVersionsFound));
    }

    #[test]
    fn test_upcoming_fails_without_parsable_tags() {
        let mut repo = MockBackend::new();
        repo.commit(oid(1));

        let err = upcoming_version(&repo, &Config::default()).unwrap_err();
        assert!(matches!(err, VersionQueryError::NoVersionsFound));
    }

    #[test]
    fn test_upcoming_clean_at_tag_is_the_tagged_version() {
        let mut repo = MockBackend::new();
        repo.commit(oid(1));
        repo.tag("v1.2.0", oid(1));

        let (version, _) = upcoming_version(&repo, &Config::default()).unwrap();
        assert_eq!(version.to_string(), "1.2.0");
    }

    #[test]
    fn test_upcoming_final_release_with_new_commits() {
        let mut repo = MockBackend::new();
        repo.commit(oid(1));
        repo.tag("v1.2.0", oid(1));
        repo.commit(oid(2));
        repo.commit(oid(3));
        repo.commit(oid(4));

        let (version, _) = upcoming_version(&repo, &Config::default()).unwrap();
        // patch bump, dev distance, short head hash
        assert_eq!(version.to_string(), "1.2.1.dev3+04040404");
    }

    #[test]
    fn test_upcoming_pre_release_counter_is_absolute_distance() {
        let mut repo = MockBackend::new();
        repo.commit(oid(1));
        repo.tag("v1.2.0-dev1", oid(1));
        for byte in 2..7 {
            repo.commit(oid(byte));
        }

        let (version, _) = upcoming_version(&repo, &Config::default()).unwrap();
        assert_eq!(version.release(), &[1, 2, 0]);
        let pre = version.pre_release().unwrap();
        assert_eq!(pre.counter(), Some(5));
        // the tag's own separator is preserved
        assert!(version.to_string().starts_with("1.2.0-dev5+"));
    }

    #[test]
    fn test_upcoming_dirty_only_keeps_release_and_pre_release() {
        let mut repo = MockBackend::new();
        repo.commit(oid(1));
        repo.tag("v1.2.0", oid(1));
        repo.set_dirty(true);

        let (version, _) = upcoming_version(&repo, &Config::default()).unwrap();
        assert_eq!(version.release(), &[1, 2, 0]);
        assert!(version.pre_release().is_none());

        let segments: Vec<&str> = version.local().unwrap().segments().collect();
        assert_eq!(segments.len(), 1);
        assert!(segments[0].starts_with("dirty"));
        // dirty marker carries a YYYYMMDDHHMMSS timestamp
        assert_eq!(segments[0].len(), "dirty".len() + 14);
    }

    #[test]
    fn test_upcoming_dirty_successive_calls_differ_only_in_timestamp() {
        let mut repo = MockBackend::new();
        repo.commit(oid(1));
        repo.tag("v1.2.0", oid(1));
        repo.set_dirty(true);

        let (first, _) = upcoming_version(&repo, &Config::default()).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(1100));
        let (second, _) = upcoming_version(&repo, &Config::default()).unwrap();

        let first = first.to_string();
        let second = second.to_string();
        // same shape, distinct timestamp: dirty builds are never reproducible
        assert_ne!(first, second);
        assert!(first.starts_with("1.2.0+dirty"));
        assert!(second.starts_with("1.2.0+dirty"));
        assert_eq!(first.len(), second.len());
    }

    #[test]
    fn test_upcoming_dirty_with_new_commits_appends_to_hash() {
        let mut repo = MockBackend::new();
        repo.commit(oid(1));
        repo.tag("v1.2.0", oid(1));
        repo.commit(oid(2));
        repo.set_dirty(true);

        let (version, _) = upcoming_version(&repo, &Config::default()).unwrap();
        let segments: Vec<&str> = version.local().unwrap().segments().collect();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], "02020202");
        assert!(segments[1].starts_with("dirty"));
    }

    #[test]
    fn test_upcoming_dirty_pre_release_without_new_commits_is_untouched() {
        let mut repo = MockBackend::new();
        repo.commit(oid(1));
        repo.tag("v1.2.0-dev1", oid(1));
        repo.set_dirty(true);

        let (version, _) = upcoming_version(&repo, &Config::default()).unwrap();
        assert!(version.to_string().starts_with("1.2.0-dev1+dirty"));
    }

    #[test]
    fn test_upcoming_custom_pre_release_label() {
        let mut repo = MockBackend::new();
        repo.commit(oid(1));
        repo.tag("v0.3.0", oid(1));
        repo.commit(oid(2));

        let config = Config {
            pre_release_label: "rc".to_string(),
            ..Config::default()
        };
        let (version, _) = upcoming_version(&repo, &config).unwrap();
        assert!(version.to_string().starts_with("0.3.1.rc1+"));
    }

    #[test]
    fn test_upcoming_aborts_past_max_commit_distance() {
        let mut repo = MockBackend::new();
        repo.commit(oid(1));
        repo.tag("v1.0.0", oid(1));
        for byte in 2..6 {
            repo.commit(oid(byte));
        }

        let config = Config {
            max_commit_distance: 2,
            ..Config::default()
        };
        let err = upcoming_version(&repo, &config).unwrap_err();
        assert!(matches!(err, VersionQueryError::CommitDistanceExceeded(2)));
    }

    #[test]
    fn test_upcoming_with_tag_outside_head_history_counts_full_depth() {
        // tag bound to a commit that is not an ancestor of HEAD
        let mut repo = MockBackend::new();
        repo.commit(oid(1));
        repo.commit(oid(2));
        repo.tag("v1.0.0", oid(9));

        let (version, _) = upcoming_version(&repo, &Config::default()).unwrap();
        assert!(version.to_string().starts_with("1.0.1.dev2+"));
    }

    #[test]
    fn test_upcoming_forwards_collection_warnings() {
        let mut repo = MockBackend::new();
        repo.commit(oid(1));
        repo.tag("v1.0.0", oid(1));
        repo.tag("vBogus", oid(1));

        let (_, warnings) = upcoming_version(&repo, &Config::default()).unwrap();
        assert_eq!(warnings.len(), 1);
    }
}
