use std::fmt;

/// Ref that designates the stable release branch unless configured otherwise
pub const DEFAULT_STABLE_REF: &str = "refs/heads/master";

/// Release track selected by the ref that triggered the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    Stable,
    ReleaseCandidate,
}

impl TrackKind {
    /// Classify a ref: stable iff it equals the stable ref exactly
    pub fn from_ref(git_ref: &str, stable_ref: &str) -> Self {
        if git_ref == stable_ref {
            TrackKind::Stable
        } else {
            TrackKind::ReleaseCandidate
        }
    }

    pub fn is_stable(&self) -> bool {
        matches!(self, TrackKind::Stable)
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackKind::Stable => write!(f, "stable"),
            TrackKind::ReleaseCandidate => write!(f, "release-candidate"),
        }
    }
}
