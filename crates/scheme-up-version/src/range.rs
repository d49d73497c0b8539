//! npm-style range expressions compiled to [`semver::VersionReq`].
//!
//! `semver` treats a bare `1.2.3` as `^1.2.3` and separates comparators with
//! commas. Node authors write the npm dialect instead, so ranges are
//! rewritten before being handed to `VersionReq::parse`.

use std::fmt;

use semver::{Version, VersionReq};

use crate::error::VersionError;

/// A parsed range: one or more alternatives, any of which may match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range {
  source: String,
  alternatives: Vec<VersionReq>,
}

impl Range {
  pub fn parse(range: &str) -> Result<Self, VersionError> {
    let alternatives = range
      .split("||")
      .map(|alternative| {
        let rewritten = rewrite_alternative(alternative);
        VersionReq::parse(&rewritten).map_err(|e| VersionError::InvalidRange {
          range: range.to_string(),
          message: e.to_string(),
        })
      })
      .collect::<Result<Vec<_>, _>>()?;

    Ok(Self {
      source: range.to_string(),
      alternatives,
    })
  }

  pub fn matches(&self, version: &Version) -> bool {
    self.alternatives.iter().any(|req| req.matches(version))
  }

  /// The range as originally written.
  pub fn as_str(&self) -> &str {
    &self.source
  }
}

impl fmt::Display for Range {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.source)
  }
}

/// Rewrite one `||` alternative into `semver`'s comma-separated syntax.
fn rewrite_alternative(alternative: &str) -> String {
  let alternative = alternative.trim();
  if alternative.is_empty() {
    return "*".to_string();
  }

  if let Some((low, high)) = alternative.split_once(" - ") {
    return format!(">={}, <={}", exact(low.trim()), exact(high.trim()));
  }

  let mut comparators = Vec::new();
  let mut pending_op = String::new();
  for token in alternative.split_whitespace() {
    // `>= 1.0.0` splits the operator from its version
    if token.chars().all(is_operator) {
      pending_op.push_str(token);
      continue;
    }

    let comparator = if pending_op.is_empty() {
      exact_comparator(token)
    } else {
      format!("{}{}", pending_op, token)
    };
    pending_op.clear();
    comparators.push(comparator);
  }

  if !pending_op.is_empty() {
    comparators.push(pending_op);
  }

  comparators.join(", ")
}

fn is_operator(c: char) -> bool {
  matches!(c, '<' | '>' | '=' | '~' | '^')
}

/// A token with no operator is an exact match in npm ranges.
fn exact_comparator(token: &str) -> String {
  if token.starts_with(|c: char| c.is_ascii_digit()) || is_v_prefixed(token) {
    format!("={}", exact(token))
  } else {
    token.to_string()
  }
}

fn exact(version: &str) -> &str {
  if is_v_prefixed(version) {
    &version[1..]
  } else {
    version
  }
}

fn is_v_prefixed(token: &str) -> bool {
  let mut chars = token.chars();
  matches!(chars.next(), Some('v' | 'V')) && chars.next().is_some_and(|c| c.is_ascii_digit())
}
