//! Domain logic - version values and tag conventions independent of git

pub mod prerelease;
pub mod tag;
pub mod version;

pub use prerelease::{PreRelease, Separator};
pub use version::{Local, Version, VersionComponent};
