//! The closed set of migration error kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Every failure a migration can report falls into exactly one of these kinds.
///
/// Each kind has a stable wire code (`FLOW-000N`) and a fixed human-readable
/// message. Codes are what error-like values carry in their cause when they
/// are re-raised across nested migrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
  /// The chain has no nodes to evaluate against.
  #[serde(rename = "FLOW-0001")]
  NodesNotRegistered,

  /// The input version matches no node's range.
  #[serde(rename = "FLOW-0002")]
  UnsupportedVersion,

  /// The input lacks a valid string `version` field.
  #[serde(rename = "FLOW-0003")]
  MissingVersion,

  /// A node expected at a chain position is absent.
  ///
  /// Only reachable through an implementation bug; a well-formed chain never
  /// reports it.
  #[serde(rename = "FLOW-0004")]
  NoMigrationNodeFound,

  /// Anything not already tagged with one of the other kinds.
  #[serde(rename = "FLOW-0005")]
  Unknown,

  /// A node was built without a validation step.
  #[serde(rename = "FLOW-0006")]
  NoAssertFunction,
}

impl ErrorKind {
  /// All kinds, in code order.
  pub const ALL: [ErrorKind; 6] = [
    ErrorKind::NodesNotRegistered,
    ErrorKind::UnsupportedVersion,
    ErrorKind::MissingVersion,
    ErrorKind::NoMigrationNodeFound,
    ErrorKind::Unknown,
    ErrorKind::NoAssertFunction,
  ];

  /// Stable code for this kind.
  pub fn code(self) -> &'static str {
    match self {
      ErrorKind::NodesNotRegistered => "FLOW-0001",
      ErrorKind::UnsupportedVersion => "FLOW-0002",
      ErrorKind::MissingVersion => "FLOW-0003",
      ErrorKind::NoMigrationNodeFound => "FLOW-0004",
      ErrorKind::Unknown => "FLOW-0005",
      ErrorKind::NoAssertFunction => "FLOW-0006",
    }
  }

  /// Human-readable message reported for this kind.
  pub fn message(self) -> &'static str {
    match self {
      ErrorKind::NodesNotRegistered => "No nodes are registered in the VersionFlow.",
      ErrorKind::UnsupportedVersion => "Unsupported input version.",
      ErrorKind::MissingVersion => "Missing or invalid version in input object.",
      ErrorKind::NoMigrationNodeFound => "No migration node found.",
      ErrorKind::Unknown => "Unknown error during validation.",
      ErrorKind::NoAssertFunction => "No assert function provided for validation node.",
    }
  }

  /// Look up a kind by its code. Unrecognized codes yield `None`.
  pub fn from_code(code: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|kind| kind.code() == code)
  }
}

impl fmt::Display for ErrorKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.code())
  }
}
