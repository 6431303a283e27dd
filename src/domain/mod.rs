//! Domain logic - version shapes and release tracks, independent of I/O

pub mod track;
pub mod version;

pub use track::{TrackKind, DEFAULT_STABLE_REF};
pub use version::{Version, VersionShape};
