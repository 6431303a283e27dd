//! Version transitions between release tracks
//!
//! The current version's shape picks the arithmetic, the track picks whether
//! the next artifact is stable or another release candidate:
//!
//! | shape        | stable track            | release-candidate track     |
//! |--------------|-------------------------|-----------------------------|
//! | `X.Y.Z`      | hotfix: `X.Y.(Z+1)`     | first RC: `X.(Y+1).0-rc.0`  |
//! | `X.Y.Z-rc.N` | promotion: `X.Y.Z`      | next RC: `X.Y.Z-rc.(N+1)`   |

use std::fmt;

use crate::domain::{TrackKind, Version, VersionShape};
use crate::error::{NextVersionError, Result};

/// Which rule produced the next version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Hotfix,
    Promotion,
    FirstReleaseCandidate,
    NextReleaseCandidate,
}

impl Flow {
    pub fn name(&self) -> &'static str {
        match self {
            Flow::Hotfix => "hotfix",
            Flow::Promotion => "stable promotion",
            Flow::FirstReleaseCandidate => "first release candidate",
            Flow::NextReleaseCandidate => "next release candidate",
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of a single transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub flow: Flow,
    pub previous: Version,
    pub next: Version,
}

/// Select the flow for a shape on a track
pub fn select_flow(shape: VersionShape, track: TrackKind) -> Flow {
    match (shape, track) {
        (VersionShape::Stable, TrackKind::Stable) => Flow::Hotfix,
        (VersionShape::Stable, TrackKind::ReleaseCandidate) => Flow::FirstReleaseCandidate,
        (VersionShape::ReleaseCandidate, TrackKind::Stable) => Flow::Promotion,
        (VersionShape::ReleaseCandidate, TrackKind::ReleaseCandidate) => {
            Flow::NextReleaseCandidate
        }
    }
}

/// Compute the next version for `current` on `track`
pub fn transition(current: &Version, track: TrackKind) -> Result<Transition> {
    let overflow = || NextVersionError::VersionOverflow(current.to_string());
    let Version {
        major,
        minor,
        patch,
        release_candidate,
    } = *current;

    let next = match (release_candidate, track) {
        (None, TrackKind::Stable) => {
            Version::new(major, minor, patch.checked_add(1).ok_or_else(overflow)?)
        }
        (None, TrackKind::ReleaseCandidate) => {
            Version::release_candidate(major, minor.checked_add(1).ok_or_else(overflow)?, 0, 0)
        }
        (Some(_), TrackKind::Stable) => current.stable(),
        (Some(rc), TrackKind::ReleaseCandidate) => {
            let rc = rc.checked_add(1).ok_or_else(overflow)?;
            Version::release_candidate(major, minor, patch, rc)
        }
    };

    Ok(Transition {
        flow: select_flow(current.shape(), track),
        previous: *current,
        next,
    })
}

/// Parse `current`, apply the transition for `track` and format the result.
///
/// # Errors
/// Returns [`NextVersionError::Parse`] carrying `current` when it is neither
/// `X.Y.Z` nor `X.Y.Z-rc.N`.
///
/// # Example
/// ```
/// use next_version::domain::TrackKind;
/// use next_version::transition::next_version;
///
/// assert_eq!(next_version("2.3.4", TrackKind::Stable).unwrap(), "2.3.5");
/// assert_eq!(next_version("2.3.4", TrackKind::ReleaseCandidate).unwrap(), "2.4.0-rc.0");
/// ```
pub fn next_version(current: &str, track: TrackKind) -> Result<String> {
    let version = Version::parse(current)?;
    Ok(transition(&version, track)?.next.to_string())
}
