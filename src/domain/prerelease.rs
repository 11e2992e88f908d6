//! Pre-release segment handling for structured versions
//!
//! A pre-release segment is a suffix like `-dev3`, `.rc1` or `beta` denoting a
//! not-yet-final build, ordered below the equivalent final release.

use crate::error::{Result, VersionQueryError};
use std::fmt;

/// Separator character preceding a pre-release segment or between local
/// metadata segments.
///
/// The original separator found while parsing is preserved bit-exactly when
/// rendering, so existing tag names round-trip unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// `.`
    Dot,
    /// `-`
    Hyphen,
}

impl Separator {
    /// Recognize a separator character
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Separator::Dot),
            '-' => Some(Separator::Hyphen),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Separator::Dot => '.',
            Separator::Hyphen => '-',
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Pre-release segment: optional separator, alphabetic label, optional counter
///
/// # Examples
/// - `-dev3` -> separator `-`, label `dev`, counter 3
/// - `.rc1` -> separator `.`, label `rc`, counter 1
/// - `beta` -> no separator, label `beta`, no counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreRelease {
    separator: Option<Separator>,
    label: String,
    counter: Option<u64>,
}

impl PreRelease {
    /// Create a new pre-release segment
    ///
    /// # Arguments
    /// * `separator` - Separator rendered before the label, if any
    /// * `label` - Alphabetic identifier (e.g. "dev", "rc", "beta")
    /// * `counter` - Optional numeric counter
    ///
    /// # Returns
    /// * `Ok(PreRelease)` - Valid segment
    /// * `Err` - If the label is empty or contains non-alphabetic characters
    pub fn new(
        separator: Option<Separator>,
        label: impl Into<String>,
        counter: Option<u64>,
    ) -> Result<Self> {
        let label = label.into();
        if label.is_empty() || !label.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(VersionQueryError::parse(format!(
                "invalid pre-release label: '{}'",
                label
            )));
        }
        Ok(PreRelease {
            separator,
            label,
            counter,
        })
    }

    pub fn separator(&self) -> Option<Separator> {
        self.separator
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn counter(&self) -> Option<u64> {
        self.counter
    }

    /// Replace the counter, keeping separator and label
    pub(crate) fn set_counter(&mut self, counter: u64) {
        self.counter = Some(counter);
    }

    /// Precedence key used by version ordering.
    ///
    /// Labels compare case-insensitively; an absent counter counts as 0. The
    /// separator carries no precedence, it is display-only.
    pub(crate) fn sort_key(&self) -> (u8, String, u64) {
        (0, self.label.to_lowercase(), self.counter.unwrap_or(0))
    }

    /// Key representing the absence of a pre-release segment; sorts above any
    /// present segment so final releases outrank their pre-releases.
    pub(crate) fn absent_sort_key() -> (u8, String, u64) {
        (1, String::new(), 0)
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(sep) = self.separator {
            write!(f, "{}", sep)?;
        }
        write!(f, "{}", self.label)?;
        if let Some(counter) = self.counter {
            write!(f, "{}", counter)?;
        }
        Ok(())
    }
}
