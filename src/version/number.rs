//! The `Version` value and its precedence rules.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// A semantic version with free-form prerelease and build identifiers.
///
/// Ordering and equality follow semver precedence: build metadata is
/// ignored, a release sorts above any of its prereleases, and prerelease
/// identifiers compare numerically when both are numeric.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Vec<String>,
    pub build: Vec<String>,
}

impl Version {
    /// Create a release version with no prerelease or build identifiers.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            prerelease: Vec::new(),
            build: Vec::new(),
        }
    }

    /// Replace the prerelease identifiers.
    pub fn with_prerelease(mut self, prerelease: Vec<String>) -> Self {
        self.prerelease = prerelease;
        self
    }

    /// Replace the build metadata identifiers.
    pub fn with_build(mut self, build: Vec<String>) -> Self {
        self.build = build;
        self
    }

    /// Parse a complete semantic version string such as `1.2.3-4+sha.g0abc123`.
    pub fn parse(s: &str) -> Result<Self, semver::Error> {
        semver::Version::parse(s.trim()).map(Version::from)
    }

    /// Whether this is a true release (no prerelease identifiers).
    pub fn is_release(&self) -> bool {
        self.prerelease.is_empty()
    }

    /// Render as `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]`.
    pub fn to_semver_string(&self) -> String {
        self.to_string()
    }

    /// Render in the packaging-index format.
    ///
    /// Prereleases become `.devN` and carry the build metadata as a local
    /// version with every `-` turned into `.`. Releases never carry a local
    /// version.
    pub fn to_pep440_string(&self) -> String {
        let mut out = format!("{}.{}.{}", self.major, self.minor, self.patch);

        if self.prerelease.is_empty() {
            return out;
        }

        out.push_str(".dev");
        out.push_str(&self.prerelease.join("."));

        if !self.build.is_empty() {
            out.push('+');
            out.push_str(&self.build.join(".").replace('-', "."));
        }

        out
    }
}

impl From<semver::Version> for Version {
    fn from(v: semver::Version) -> Self {
        Version {
            major: v.major,
            minor: v.minor,
            patch: v.patch,
            prerelease: split_identifiers(v.pre.as_str()),
            build: split_identifiers(v.build.as_str()),
        }
    }
}

fn split_identifiers(s: &str) -> Vec<String> {
    if s.is_empty() {
        Vec::new()
    } else {
        s.split('.').map(str::to_string).collect()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.prerelease.is_empty() {
            write!(f, "-{}", self.prerelease.join("."))?;
        }
        if !self.build.is_empty() {
            write!(f, "+{}", self.build.join("."))?;
        }
        Ok(())
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| compare_prerelease(&self.prerelease, &other.prerelease))
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

/// Compare two prerelease identifier lists.
///
/// An empty list (a release) is greater than any non-empty one. Lists that
/// form a valid `semver::Prerelease` are compared by it; the rest (leading
/// zeros, empty or non-ASCII identifiers) use the same rules by hand.
pub fn compare_prerelease(a: &[String], b: &[String]) -> Ordering {
    match (semver_prerelease(a), semver_prerelease(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => compare_identifiers(a, b),
    }
}

fn semver_prerelease(ids: &[String]) -> Option<semver::Prerelease> {
    semver::Prerelease::new(&ids.join(".")).ok()
}

fn compare_identifiers(a: &[String], b: &[String]) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    for (x, y) in a.iter().zip(b.iter()) {
        let ord = compare_identifier(x, y);
        if ord != Ordering::Equal {
            return ord;
        }
    }

    a.len().cmp(&b.len())
}

fn compare_identifier(a: &str, b: &str) -> Ordering {
    match (is_numeric(a), is_numeric(b)) {
        (true, true) => {
            // Compare by magnitude without parsing so arbitrarily long
            // counters cannot overflow.
            let a = a.trim_start_matches('0');
            let b = b.trim_start_matches('0');
            a.len().cmp(&b.len()).then_with(|| a.cmp(b))
        }
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.cmp(b),
    }
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
