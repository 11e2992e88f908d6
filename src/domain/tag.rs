//! Release-tag naming convention.
//!
//! Release tags are named `v` (or `V`) followed by a version string. Any
//! other tag name is not a release tag and is ignored by the resolver.

/// Extract the version part of a release tag name.
///
/// # Returns
/// * `Some(&str)` - The remainder after the `v` prefix, ready for parsing
/// * `None` - The name does not follow the release-tag convention
///
/// # Example
/// ```
/// use version_query::domain::tag::release_tag_version;
/// assert_eq!(release_tag_version("v1.2.3"), Some("1.2.3"));
/// assert_eq!(release_tag_version("release-1.2.3"), None);
/// ```
pub fn release_tag_version(name: &str) -> Option<&str> {
    name.strip_prefix('v').or_else(|| name.strip_prefix('V'))
}
