use thiserror::Error;

/// Errors produced while parsing versions or ranges.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
  #[error("invalid version '{version}': {message}")]
  InvalidVersion { version: String, message: String },

  #[error("invalid range '{range}': {message}")]
  InvalidRange { range: String, message: String },
}
