use std::fmt;

/// Non-fatal diagnostics produced while resolving versions from tag history.
/// Collected and returned alongside results rather than logged from a side
/// channel, so callers decide how to surface them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverWarning {
    /// Tag follows the `v` release-tag convention but its version part does
    /// not parse; the tag is dropped from resolution.
    UnparsableTag { tag: String, reason: String },
}

impl fmt::Display for ResolverWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolverWarning::UnparsableTag { tag, reason } => {
                write!(f, "Cannot parse tag '{}' as a version: {}", tag, reason)
            }
        }
    }
}
