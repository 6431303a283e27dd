use crate::error::{NextVersionError, Result};
use std::fmt;
use std::str::FromStr;

const RC_SEPARATOR: &str = "-rc.";

/// Version shape: finished stable release or numbered release candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionShape {
    Stable,
    ReleaseCandidate,
}

/// Package version in one of the two supported shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub release_candidate: Option<u64>,
}

impl Version {
    /// Create a stable version (X.Y.Z)
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            release_candidate: None,
        }
    }

    /// Create a release candidate version (X.Y.Z-rc.N)
    pub fn release_candidate(major: u64, minor: u64, patch: u64, rc: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            release_candidate: Some(rc),
        }
    }

    /// Parse a version string.
    ///
    /// Accepts exactly `X.Y.Z` or `X.Y.Z-rc.N` where every component is one or
    /// more ASCII digits. Anything else, including a `v` prefix or surrounding
    /// whitespace, is rejected with a parse error carrying the input.
    pub fn parse(input: &str) -> Result<Self> {
        let (core, rc) = match input.split_once(RC_SEPARATOR) {
            Some((core, counter)) => (core, Some(counter)),
            None => (input, None),
        };

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() != 3 {
            return Err(NextVersionError::parse(input));
        }

        let major = parse_component(parts[0], input)?;
        let minor = parse_component(parts[1], input)?;
        let patch = parse_component(parts[2], input)?;
        let release_candidate = rc.map(|n| parse_component(n, input)).transpose()?;

        Ok(Version {
            major,
            minor,
            patch,
            release_candidate,
        })
    }

    pub fn shape(&self) -> VersionShape {
        match self.release_candidate {
            Some(_) => VersionShape::ReleaseCandidate,
            None => VersionShape::Stable,
        }
    }

    /// Drop the release candidate counter, keeping X.Y.Z
    pub fn stable(&self) -> Self {
        Version::new(self.major, self.minor, self.patch)
    }
}

/// ASCII digits only; `u64::from_str` alone accepts a leading '+'
fn parse_component(part: &str, input: &str) -> Result<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NextVersionError::parse(input));
    }
    part.parse::<u64>().map_err(|_| NextVersionError::parse(input))
}

impl FromStr for Version {
    type Err = NextVersionError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(rc) = self.release_candidate {
            write!(f, "{}{}", RC_SEPARATOR, rc)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stable() {
        let v = Version::parse("2.3.4").unwrap();
        assert_eq!(v, Version::new(2, 3, 4));
        assert_eq!(v.shape(), VersionShape::Stable);
    }

    #[test]
    fn test_parse_release_candidate() {
        let v = Version::parse("2.4.0-rc.3").unwrap();
        assert_eq!(v, Version::release_candidate(2, 4, 0, 3));
        assert_eq!(v.shape(), VersionShape::ReleaseCandidate);
    }

    #[test]
    fn test_parse_via_from_str() {
        let v: Version = "0.0.0-rc.0".parse().unwrap();
        assert_eq!(v, Version::release_candidate(0, 0, 0, 0));
    }

    #[test]
    fn test_parse_leading_zeros_normalized() {
        let v = Version::parse("01.002.3").unwrap();
        assert_eq!(v.to_string(), "1.2.3");
    }

    #[test]
    fn test_parse_invalid() {
        let inputs = [
            "",
            "abc",
            "v1.2.3",
            "V1.2.3",
            "1.2",
            "1.2.3.4",
            "1..3",
            "1.2.3-beta.1",
            "1.2.3-rc",
            "1.2.3-rc.",
            "1.2.3-rc.x",
            "1.2.3-rc.1.2",
            "1.2.3-rc.1-rc.2",
            "1.2.3-RC.1",
            "+1.2.3",
            "1.-2.3",
            " 1.2.3",
            "1.2.3\n",
            "1x2x3",
            "١.٢.٣",
            "99999999999999999999.0.0",
        ];

        for input in inputs {
            let err = Version::parse(input).unwrap_err();
            assert_eq!(err.parse_input(), Some(input), "input {:?}", input);
        }
    }

    #[test]
    fn test_stable_strips_counter() {
        let v = Version::release_candidate(1, 2, 3, 4);
        assert_eq!(v.stable(), Version::new(1, 2, 3));
    }

    #[test]
    fn test_display() {
        assert_eq!(Version::new(1, 2, 3).to_string(), "1.2.3");
        assert_eq!(
            Version::release_candidate(1, 2, 3, 10).to_string(),
            "1.2.3-rc.10"
        );
    }

    #[test]
    fn test_parse_large_components() {
        let max = u64::MAX.to_string();
        let input = format!("{}.{}.{}", max, max, max);
        let v = Version::parse(&input).unwrap();
        assert_eq!(v.to_string(), input);
    }
}
