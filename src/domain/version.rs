//! Structured version value type with parsing, rendering, ordering and
//! component increment.
//!
//! Grammar: `release ("." release)* [sep? label counter?] ["+" local]` where
//! release entries are non-negative integers without leading zeros, the
//! pre-release label is alphabetic and local metadata is a sequence of
//! alphanumeric segments joined by `.` or `-`.

use crate::domain::prerelease::{PreRelease, Separator};
use crate::error::{Result, VersionQueryError};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;

const VERSION_PATTERN: &str = concat!(
    r"^(?P<release>(?:0|[1-9][0-9]*)(?:\.(?:0|[1-9][0-9]*))*)",
    r"(?:(?P<presep>[.-])?(?P<prelabel>[A-Za-z]+)(?P<precount>0|[1-9][0-9]*)?)?",
    r"(?:\+(?P<local>[0-9A-Za-z]+(?:[.-][0-9A-Za-z]+)*))?$",
);

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(VERSION_PATTERN).expect("version pattern is valid"))
}

/// Version component targeted by an increment operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionComponent {
    Major,
    Minor,
    Patch,
    /// Counter of an existing pre-release segment
    PrePatch,
}

impl VersionComponent {
    /// Index into the release sequence, if this is a release component
    fn release_index(&self) -> Option<usize> {
        match self {
            VersionComponent::Major => Some(0),
            VersionComponent::Minor => Some(1),
            VersionComponent::Patch => Some(2),
            VersionComponent::PrePatch => None,
        }
    }
}

impl fmt::Display for VersionComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VersionComponent::Major => "major",
            VersionComponent::Minor => "minor",
            VersionComponent::Patch => "patch",
            VersionComponent::PrePatch => "pre-patch",
        };
        write!(f, "{}", name)
    }
}

/// Local/build metadata: `+`-prefixed segments carrying provenance (commit
/// hash, dirty marker), with their original separators preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Local {
    head: String,
    tail: Vec<(Separator, String)>,
}

impl Local {
    /// Create local metadata with a single segment
    pub fn new(segment: impl Into<String>) -> Self {
        Local {
            head: segment.into(),
            tail: Vec::new(),
        }
    }

    /// Append a segment after the given separator
    pub fn push(&mut self, separator: Separator, segment: impl Into<String>) {
        self.tail.push((separator, segment.into()));
    }

    /// Iterate over the segment values, in order
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.head.as_str()).chain(self.tail.iter().map(|(_, s)| s.as_str()))
    }

    fn parse(raw: &str) -> Result<Self> {
        let mut segments: Vec<String> = vec![String::new()];
        let mut separators: Vec<Separator> = Vec::new();
        for c in raw.chars() {
            match Separator::from_char(c) {
                Some(sep) => {
                    separators.push(sep);
                    segments.push(String::new());
                }
                None => {
                    if let Some(last) = segments.last_mut() {
                        last.push(c);
                    }
                }
            }
        }
        if segments.iter().any(|s| s.is_empty()) {
            return Err(VersionQueryError::parse(format!(
                "empty local metadata segment in '{}'",
                raw
            )));
        }
        let mut iter = segments.into_iter();
        let head = match iter.next() {
            Some(h) => h,
            None => {
                return Err(VersionQueryError::parse(format!(
                    "empty local metadata in '{}'",
                    raw
                )))
            }
        };
        let tail = separators.into_iter().zip(iter).collect();
        Ok(Local { head, tail })
    }

    /// Precedence key: lowercased segment values in order
    fn sort_key(&self) -> Vec<String> {
        self.segments().map(|s| s.to_lowercase()).collect()
    }
}

impl fmt::Display for Local {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.head)?;
        for (sep, segment) in &self.tail {
            write!(f, "{}{}", sep, segment)?;
        }
        Ok(())
    }
}

/// Structured version: release sequence, optional pre-release segment,
/// optional local metadata.
///
/// Value object: derivation always works on an independent copy, never in
/// place on a shared instance. Equality follows the ordering, so versions
/// that differ only in pre-release separator or label case compare equal.
#[derive(Debug, Clone)]
pub struct Version {
    release: Vec<u64>,
    pre_release: Option<PreRelease>,
    local: Option<Local>,
}

impl Version {
    /// Create a final-release version from its release sequence
    ///
    /// # Returns
    /// * `Ok(Version)` - Valid version
    /// * `Err` - If the release sequence is empty
    pub fn new(release: Vec<u64>) -> Result<Self> {
        if release.is_empty() {
            return Err(VersionQueryError::parse("release sequence is empty"));
        }
        Ok(Version {
            release,
            pre_release: None,
            local: None,
        })
    }

    /// Parse a version string
    ///
    /// A leading `v` is not stripped here; that is the tag convention's job.
    ///
    /// # Example
    /// ```
    /// use version_query::domain::Version;
    /// let v = Version::parse("1.2.3-dev4+abcd1234").unwrap();
    /// assert_eq!(v.release(), &[1, 2, 3]);
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let captures = version_pattern().captures(input).ok_or_else(|| {
            VersionQueryError::parse(format!("'{}' does not match the version grammar", input))
        })?;

        let release_raw = &captures["release"];
        let mut release = Vec::new();
        for part in release_raw.split('.') {
            let value = part.parse::<u64>().map_err(|_| {
                VersionQueryError::parse(format!("invalid release component: '{}'", part))
            })?;
            release.push(value);
        }

        let pre_release = match captures.name("prelabel") {
            Some(label) => {
                let separator = captures
                    .name("presep")
                    .and_then(|m| m.as_str().chars().next())
                    .and_then(Separator::from_char);
                let counter = match captures.name("precount") {
                    Some(count) => Some(count.as_str().parse::<u64>().map_err(|_| {
                        VersionQueryError::parse(format!(
                            "invalid pre-release counter: '{}'",
                            count.as_str()
                        ))
                    })?),
                    None => None,
                };
                Some(PreRelease::new(separator, label.as_str(), counter)?)
            }
            None => None,
        };

        let local = match captures.name("local") {
            Some(local) => Some(Local::parse(local.as_str())?),
            None => None,
        };

        Ok(Version {
            release,
            pre_release,
            local,
        })
    }

    pub fn release(&self) -> &[u64] {
        &self.release
    }

    pub fn pre_release(&self) -> Option<&PreRelease> {
        self.pre_release.as_ref()
    }

    pub fn local(&self) -> Option<&Local> {
        self.local.as_ref()
    }

    pub fn has_pre_release(&self) -> bool {
        self.pre_release.is_some()
    }

    /// Return a copy with the given pre-release segment attached
    pub fn with_pre_release(&self, pre_release: PreRelease) -> Version {
        Version {
            release: self.release.clone(),
            pre_release: Some(pre_release),
            local: self.local.clone(),
        }
    }

    /// Return a copy with the given local metadata attached, replacing any
    /// existing metadata
    pub fn with_local(&self, local: Local) -> Version {
        Version {
            release: self.release.clone(),
            pre_release: self.pre_release.clone(),
            local: Some(local),
        }
    }

    /// Increment a version component, returning the incremented copy
    ///
    /// Incrementing a release component adds `amount` to that entry (the
    /// release sequence is zero-extended if shorter), zeroes all
    /// lower-significance release entries and clears pre-release and local
    /// metadata. Incrementing `PrePatch` sets the counter of the existing
    /// pre-release segment to `amount`, leaving everything else untouched.
    ///
    /// # Returns
    /// * `Ok(Version)` - The incremented copy
    /// * `Err` - `InvalidComponent` when `amount` is zero or `PrePatch` is
    ///   requested on a version without a pre-release segment
    pub fn increment(&self, component: VersionComponent, amount: u64) -> Result<Version> {
        if amount == 0 {
            return Err(VersionQueryError::invalid_component(format!(
                "increment amount must be positive, got {} for {}",
                amount, component
            )));
        }

        let mut next = self.clone();
        match component.release_index() {
            Some(index) => {
                if next.release.len() <= index {
                    next.release.resize(index + 1, 0);
                }
                next.release[index] += amount;
                for entry in next.release.iter_mut().skip(index + 1) {
                    *entry = 0;
                }
                next.pre_release = None;
                next.local = None;
            }
            None => match next.pre_release.as_mut() {
                Some(pre) => pre.set_counter(amount),
                None => {
                    return Err(VersionQueryError::invalid_component(format!(
                        "version '{}' has no pre-release segment to increment",
                        self
                    )));
                }
            },
        }
        Ok(next)
    }

    fn release_sort_key(&self, width: usize) -> Vec<u64> {
        let mut key = self.release.clone();
        key.resize(width, 0);
        key
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let release: Vec<String> = self.release.iter().map(|n| n.to_string()).collect();
        write!(f, "{}", release.join("."))?;
        if let Some(pre) = &self.pre_release {
            write!(f, "{}", pre)?;
        }
        if let Some(local) = &self.local {
            write!(f, "+{}", local)?;
        }
        Ok(())
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let width = self.release.len().max(other.release.len());
        let release_order = self
            .release_sort_key(width)
            .cmp(&other.release_sort_key(width));
        if release_order != Ordering::Equal {
            return release_order;
        }

        let self_pre = self
            .pre_release
            .as_ref()
            .map_or_else(PreRelease::absent_sort_key, |p| p.sort_key());
        let other_pre = other
            .pre_release
            .as_ref()
            .map_or_else(PreRelease::absent_sort_key, |p| p.sort_key());
        let pre_order = self_pre.cmp(&other_pre);
        if pre_order != Ordering::Equal {
            return pre_order;
        }

        // Local metadata is the lowest-precedence key; absent sorts first.
        let self_local = self.local.as_ref().map(|l| l.sort_key()).unwrap_or_default();
        let other_local = other
            .local
            .as_ref()
            .map(|l| l.sort_key())
            .unwrap_or_default();
        self_local.cmp(&other_local)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}
