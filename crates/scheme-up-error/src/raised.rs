//! Values raised by validation, transformation and recovery callbacks.

use std::any::Any;
use std::fmt;

use serde_json::{Value, json};

use crate::error::FlowError;

/// What a callback failed with, before normalization.
///
/// Callbacks are free to fail with anything: an already normalized error, an
/// error-like value, or a bare value. [`FlowError::normalize`] turns each
/// shape into a tagged [`FlowError`].
#[derive(Debug, Clone, PartialEq)]
pub enum Raised {
  /// An already normalized error.
  Flow(FlowError),

  /// A generic error-like value.
  ///
  /// `cause` may carry a `{ "code": ..., "data": ... }` pair when the error
  /// was re-raised from a nested migration.
  Error {
    message: String,
    cause: Option<Value>,
  },

  /// Any other raised value, kept verbatim.
  Value(Value),

  /// The failure carried nothing at all.
  Undefined,
}

impl Raised {
  /// An error-like value with the given message and no cause.
  pub fn error(message: impl fmt::Display) -> Self {
    Self::Error {
      message: message.to_string(),
      cause: None,
    }
  }

  /// An error-like value whose cause is tagged with `code` and optional `data`.
  pub fn tagged(message: impl fmt::Display, code: impl Into<String>, data: Option<Value>) -> Self {
    let cause = match data {
      Some(data) => json!({ "code": code.into(), "data": data }),
      None => json!({ "code": code.into() }),
    };

    Self::Error {
      message: message.to_string(),
      cause: Some(cause),
    }
  }

  /// Recover a raised value from a panic payload.
  ///
  /// Panics with a message become error-like values. `panic_any` with a
  /// `FlowError`, a `Raised` or a `serde_json::Value` is unwrapped as such.
  pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
    if let Some(message) = payload.downcast_ref::<&str>() {
      return Self::error(message);
    }

    let payload = match payload.downcast::<String>() {
      Ok(message) => return Self::error(message),
      Err(payload) => payload,
    };
    let payload = match payload.downcast::<FlowError>() {
      Ok(error) => return Self::Flow(*error),
      Err(payload) => payload,
    };
    let payload = match payload.downcast::<Raised>() {
      Ok(raised) => return *raised,
      Err(payload) => payload,
    };

    match payload.downcast::<Value>() {
      Ok(value) => Self::Value(*value),
      Err(_) => Self::Undefined,
    }
  }
}

impl From<FlowError> for Raised {
  fn from(error: FlowError) -> Self {
    Self::Flow(error)
  }
}

impl From<Value> for Raised {
  fn from(value: Value) -> Self {
    Self::Value(value)
  }
}

impl From<&str> for Raised {
  fn from(value: &str) -> Self {
    Self::Value(Value::String(value.to_string()))
  }
}

impl From<String> for Raised {
  fn from(value: String) -> Self {
    Self::Value(Value::String(value))
  }
}

impl From<serde_json::Error> for Raised {
  fn from(error: serde_json::Error) -> Self {
    Self::error(error)
  }
}

impl From<anyhow::Error> for Raised {
  fn from(error: anyhow::Error) -> Self {
    match error.downcast::<FlowError>() {
      Ok(error) => Self::Flow(error),
      Err(error) => Self::error(error),
    }
  }
}

#[cfg(test)]
mod tests {
  use std::panic;

  use super::*;
  use crate::kind::ErrorKind;

  #[test]
  fn test_bare_strings_are_values() {
    assert_eq!(Raised::from("bad"), Raised::Value(json!("bad")));
    assert_eq!(
      Raised::from("bad".to_string()),
      Raised::Value(json!("bad"))
    );
  }

  #[test]
  fn test_anyhow_downcasts_flow_error() {
    let error = anyhow::Error::new(FlowError::new(ErrorKind::UnsupportedVersion));

    assert_eq!(
      Raised::from(error),
      Raised::Flow(FlowError::new(ErrorKind::UnsupportedVersion))
    );
  }

  #[test]
  fn test_anyhow_other_errors_are_error_like() {
    let error = anyhow::anyhow!("Data.name must be a string");

    assert_eq!(
      Raised::from(error),
      Raised::error("Data.name must be a string")
    );
  }

  #[test]
  fn test_serde_error_is_error_like() {
    let error = serde_json::from_str::<u32>("\"nope\"").unwrap_err();
    let message = error.to_string();

    assert_eq!(Raised::from(error), Raised::error(message));
  }

  #[test]
  fn test_tagged_builds_code_and_data_cause() {
    let raised = Raised::tagged("boom", "FLOW-0002", Some(json!({ "version": "9.0.0" })));

    assert_eq!(
      raised,
      Raised::Error {
        message: "boom".to_string(),
        cause: Some(json!({ "code": "FLOW-0002", "data": { "version": "9.0.0" } })),
      }
    );
  }

  fn panic_payload(f: impl FnOnce() + panic::UnwindSafe) -> Box<dyn Any + Send> {
    panic::catch_unwind(f).unwrap_err()
  }

  #[test]
  fn test_from_panic_payloads() {
    let payload = panic_payload(|| panic!("static message"));
    assert_eq!(Raised::from_panic(payload), Raised::error("static message"));

    let payload = panic_payload(|| panic!("formatted {}", 7));
    assert_eq!(Raised::from_panic(payload), Raised::error("formatted 7"));

    let payload = panic_payload(|| panic::panic_any(FlowError::new(ErrorKind::MissingVersion)));
    assert_eq!(
      Raised::from_panic(payload),
      Raised::Flow(FlowError::new(ErrorKind::MissingVersion))
    );

    let payload = panic_payload(|| panic::panic_any(json!({ "code": 500 })));
    assert_eq!(Raised::from_panic(payload), Raised::Value(json!({ "code": 500 })));

    let payload = panic_payload(|| panic::panic_any(17_u8));
    assert_eq!(Raised::from_panic(payload), Raised::Undefined);
  }
}
