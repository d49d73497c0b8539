//! Scheme-up Version
//!
//! Thin layer over the [`semver`] crate providing the two primitives the
//! migration chain needs: a total ordering of node versions ([`compare`]) and
//! range satisfaction for locating the start node ([`satisfies`]).
//!
//! Ranges use the npm-style syntax node authors write:
//!
//! - `1.2.3` exact match
//! - `^1.2.3`, `~1.2.3`, `>=1.2.3`, `<=1.2.3`, `>1.2.3`, `<1.2.3`
//! - `>=1.0.0 <2.0.0` whitespace-separated comparators, all must hold
//! - `1.0.0 - 2.0.0` inclusive hyphen range
//! - `^1.0.0 || ^3.0.0` alternatives, any may hold

mod error;
mod range;

use std::cmp::Ordering;

pub use error::VersionError;
pub use range::Range;
pub use semver::Version;

/// Parse a `MAJOR.MINOR.PATCH` version, tolerating surrounding whitespace and
/// a leading `v`.
pub fn parse_version(version: &str) -> Result<Version, VersionError> {
  let trimmed = version.trim();
  let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);

  Version::parse(trimmed).map_err(|e| VersionError::InvalidVersion {
    version: version.to_string(),
    message: e.to_string(),
  })
}

/// Order two versions by semver precedence. Build metadata is ignored.
pub fn compare(a: &str, b: &str) -> Result<Ordering, VersionError> {
  let a = parse_version(a)?;
  let b = parse_version(b)?;
  Ok(precedence(&a, &b))
}

/// Semver precedence of two parsed versions. Build metadata is ignored.
pub fn precedence(a: &Version, b: &Version) -> Ordering {
  (a.major, a.minor, a.patch, &a.pre).cmp(&(b.major, b.minor, b.patch, &b.pre))
}

/// Whether `version` falls within `range`.
///
/// An unparseable version or range is never satisfied.
pub fn satisfies(version: &str, range: &str) -> bool {
  let Ok(version) = parse_version(version) else {
    return false;
  };

  Range::parse(range).is_ok_and(|range| range.matches(&version))
}
