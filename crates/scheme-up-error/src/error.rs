//! The normalized migration error.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::kind::ErrorKind;
use crate::raised::Raised;

/// A migration failure: one [`ErrorKind`], its message, and an optional
/// payload describing the data that triggered it.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct FlowError {
  kind: ErrorKind,
  message: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  payload: Option<Value>,
}

impl FlowError {
  /// Create an error of the given kind without a payload.
  pub fn new(kind: ErrorKind) -> Self {
    Self {
      kind,
      message: kind.message().to_string(),
      payload: None,
    }
  }

  /// Create an error of the given kind carrying `payload`.
  pub fn with_payload(kind: ErrorKind, payload: impl Into<Value>) -> Self {
    Self {
      kind,
      message: kind.message().to_string(),
      payload: Some(payload.into()),
    }
  }

  /// Normalize anything a callback raised into a `FlowError`.
  ///
  /// This is the only place raised values are inspected. It is idempotent:
  /// normalizing a `FlowError` returns it unchanged.
  pub fn normalize(raised: impl Into<Raised>) -> Self {
    match raised.into() {
      Raised::Flow(error) => error,
      Raised::Error { message, cause } => {
        let tagged = cause.as_ref().and_then(|cause| {
          let kind = cause
            .get("code")
            .and_then(Value::as_str)
            .and_then(ErrorKind::from_code)?;
          let data = cause.get("data").filter(|data| !data.is_null()).cloned();
          Some((kind, data))
        });

        match tagged {
          Some((kind, Some(data))) => Self::with_payload(kind, data),
          Some((kind, None)) => Self::with_payload(kind, message),
          None => Self::with_payload(ErrorKind::Unknown, message),
        }
      }
      Raised::Value(value) => Self::with_payload(ErrorKind::Unknown, value),
      Raised::Undefined => Self::new(ErrorKind::Unknown),
    }
  }

  pub fn kind(&self) -> ErrorKind {
    self.kind
  }

  /// Stable code of this error's kind, e.g. `FLOW-0003`.
  pub fn code(&self) -> &'static str {
    self.kind.code()
  }

  pub fn message(&self) -> &str {
    &self.message
  }

  pub fn payload(&self) -> Option<&Value> {
    self.payload.as_ref()
  }

  /// Consume the error, returning its payload.
  pub fn into_payload(self) -> Option<Value> {
    self.payload
  }
}
