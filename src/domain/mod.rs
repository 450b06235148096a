//! Domain logic - version strings, tag names and the git command lines built from them

pub mod tag;
pub mod version;

pub use tag::TagName;
pub use version::ProjectVersion;
