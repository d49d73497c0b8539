//! Staged construction of migration nodes.

use std::fmt;
use std::sync::Arc;

use scheme_up_config::FlowConfig;
use scheme_up_error::{ErrorKind, FlowError, Raised};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::node::{MigrationNode, TransformFn, ValidateFn};

/// Accumulates the fields of a [`MigrationNode`].
///
/// Setters may be called in any order and return the builder for chaining.
/// Only [`build`](Self::build) checks completeness: a node without a
/// validation step cannot be built.
///
/// ```
/// use scheme_up_chain::NodeBuilder;
///
/// let mut builder = NodeBuilder::new();
/// builder
///   .version("2.0.0")
///   .range("^2.0.0")
///   .validate(|input| match input.get("data") {
///     Some(_) => Ok(()),
///     None => Err("data is required".into()),
///   });
///
/// let node = builder.build().unwrap();
/// assert_eq!(node.version(), "2.0.0");
/// ```
#[derive(Clone)]
pub struct NodeBuilder {
  version: String,
  range: String,
  validate: Option<ValidateFn>,
  transform: Option<TransformFn>,
}

impl NodeBuilder {
  /// A builder starting from the default version `1.0.0` and range `~1.0.0`.
  pub fn new() -> Self {
    Self::with_config(&FlowConfig::default())
  }

  /// A builder starting from the defaults in `config`.
  pub fn with_config(config: &FlowConfig) -> Self {
    Self {
      version: config.default_version.clone(),
      range: config.default_range.clone(),
      validate: None,
      transform: None,
    }
  }

  /// Set the version of the schema this node represents.
  ///
  /// The string is not checked here; an invalid version surfaces when the
  /// chain is ordered.
  pub fn version(&mut self, version: impl Into<String>) -> &mut Self {
    self.version = version.into();
    self
  }

  /// Set the range of input versions this node accepts.
  pub fn range(&mut self, range: impl Into<String>) -> &mut Self {
    self.range = range.into();
    self
  }

  /// Set the validation step. Required.
  pub fn validate<F>(&mut self, validate: F) -> &mut Self
  where
    F: Fn(&Value) -> Result<(), Raised> + Send + Sync + 'static,
  {
    self.validate = Some(Arc::new(validate));
    self
  }

  /// Validate by deserializing the input into `T`.
  pub fn validate_as<T>(&mut self) -> &mut Self
  where
    T: DeserializeOwned + 'static,
  {
    self.validate(|input| {
      T::deserialize(input)?;
      Ok(())
    })
  }

  /// Deserialize the input into `T`, then run `check` on it.
  pub fn validate_with<T, F>(&mut self, check: F) -> &mut Self
  where
    T: DeserializeOwned + 'static,
    F: Fn(&T) -> Result<(), Raised> + Send + Sync + 'static,
  {
    self.validate(move |input| {
      let typed = T::deserialize(input)?;
      check(&typed)
    })
  }

  /// Set the transformation step to the next version.
  pub fn transform<F>(&mut self, transform: F) -> &mut Self
  where
    F: Fn(Value) -> Result<Value, Raised> + Send + Sync + 'static,
  {
    self.transform = Some(Arc::new(transform));
    self
  }

  /// Set a typed transformation: the input is deserialized into `In` and the
  /// `Out` returned by `migrate` is serialized back.
  pub fn transform_as<In, Out, F>(&mut self, migrate: F) -> &mut Self
  where
    In: DeserializeOwned + 'static,
    Out: Serialize + 'static,
    F: Fn(In) -> Result<Out, Raised> + Send + Sync + 'static,
  {
    self.transform(move |input| {
      let typed: In = serde_json::from_value(input)?;
      let output = migrate(typed)?;
      Ok(serde_json::to_value(output)?)
    })
  }

  /// Build the node.
  ///
  /// Fails with [`ErrorKind::NoAssertFunction`], carrying the configured
  /// version, when no validation step was set.
  pub fn build(&self) -> Result<MigrationNode, FlowError> {
    let Some(validate) = self.validate.clone() else {
      return Err(FlowError::with_payload(
        ErrorKind::NoAssertFunction,
        json!({ "version": self.version }),
      ));
    };

    Ok(MigrationNode::new(
      self.version.clone(),
      self.range.clone(),
      validate,
      self.transform.clone(),
    ))
  }
}

impl Default for NodeBuilder {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Debug for NodeBuilder {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("NodeBuilder")
      .field("version", &self.version)
      .field("range", &self.range)
      .field("has_validate", &self.validate.is_some())
      .field("has_transform", &self.transform.is_some())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use serde::Deserialize;

  use super::*;

  #[derive(Debug, Deserialize, Serialize)]
  struct Person {
    name: String,
    age: u32,
  }

  #[derive(Debug, Serialize)]
  struct Renamed {
    full_name: String,
  }

  fn accept_all(_: &Value) -> Result<(), Raised> {
    Ok(())
  }

  #[test]
  fn test_defaults_when_not_set() {
    let node = NodeBuilder::new().validate(accept_all).build().unwrap();

    assert_eq!(node.version(), "1.0.0");
    assert_eq!(node.range(), "~1.0.0");
    assert!(!node.has_transform());
  }

  #[test]
  fn test_defaults_from_config() {
    let config = FlowConfig {
      default_version: "0.1.0".to_string(),
      default_range: "^0.1.0".to_string(),
    };

    let node = NodeBuilder::with_config(&config)
      .validate(accept_all)
      .build()
      .unwrap();

    assert_eq!(node.version(), "0.1.0");
    assert_eq!(node.range(), "^0.1.0");
  }

  #[test]
  fn test_setters_in_any_order() {
    let node = NodeBuilder::new()
      .transform(Ok)
      .range(">=2.0.0")
      .validate(accept_all)
      .version("2.1.0")
      .build()
      .unwrap();

    assert_eq!(node.version(), "2.1.0");
    assert_eq!(node.range(), ">=2.0.0");
    assert!(node.has_transform());
  }

  #[test]
  fn test_last_setter_wins() {
    let node = NodeBuilder::new()
      .version("1.0.0")
      .version("3.0.0")
      .validate(accept_all)
      .build()
      .unwrap();

    assert_eq!(node.version(), "3.0.0");
  }

  #[test]
  fn test_build_without_validate_fails_with_default_version() {
    let err = NodeBuilder::new().build().unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NoAssertFunction);
    assert_eq!(err.payload(), Some(&json!({ "version": "1.0.0" })));
  }

  #[test]
  fn test_build_without_validate_carries_set_version() {
    let err = NodeBuilder::new()
      .version("2.0.0")
      .transform(Ok)
      .build()
      .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NoAssertFunction);
    assert_eq!(err.payload(), Some(&json!({ "version": "2.0.0" })));
  }

  #[test]
  fn test_build_is_repeatable() {
    let mut builder = NodeBuilder::new();
    builder.validate(accept_all);

    let first = builder.build().unwrap();
    let second = builder.build().unwrap();

    assert_eq!(first.describe(), second.describe());
  }

  #[test]
  fn test_validate_runs_callback() {
    let node = NodeBuilder::new()
      .validate(|input| {
        if input.get("data").is_some_and(Value::is_object) {
          Ok(())
        } else {
          Err("Data must be an object".into())
        }
      })
      .build()
      .unwrap();

    assert!(node.validate(&json!({ "data": {} })).is_ok());
    assert_eq!(
      node.validate(&json!({ "data": 1 })).unwrap_err(),
      Raised::from("Data must be an object")
    );
  }

  #[test]
  fn test_node_without_transform_passes_input_through() {
    let node = NodeBuilder::new().validate(accept_all).build().unwrap();
    let input = json!({ "version": "1.0.0", "data": [1, 2, 3] });

    assert_eq!(node.transform(input.clone()).unwrap(), input);
  }

  #[test]
  fn test_validate_as_rejects_wrong_shape() {
    let node = NodeBuilder::new().validate_as::<Person>().build().unwrap();

    assert!(node.validate(&json!({ "name": "Ada", "age": 36 })).is_ok());
    assert!(matches!(
      node.validate(&json!({ "name": "Ada" })),
      Err(Raised::Error { .. })
    ));
  }

  #[test]
  fn test_validate_with_runs_typed_check() {
    let node = NodeBuilder::new()
      .validate_with(|person: &Person| {
        if person.age < 150 {
          Ok(())
        } else {
          Err("age out of range".into())
        }
      })
      .build()
      .unwrap();

    assert!(node.validate(&json!({ "name": "Ada", "age": 36 })).is_ok());
    assert_eq!(
      node.validate(&json!({ "name": "Ada", "age": 200 })).unwrap_err(),
      Raised::from("age out of range")
    );
  }

  #[test]
  fn test_transform_as_maps_types() {
    let node = NodeBuilder::new()
      .validate(accept_all)
      .transform_as(|person: Person| {
        Ok(Renamed {
          full_name: person.name,
        })
      })
      .build()
      .unwrap();

    let output = node.transform(json!({ "name": "Ada", "age": 36 })).unwrap();
    assert_eq!(output, json!({ "full_name": "Ada" }));

    assert!(matches!(
      node.transform(json!({ "age": 36 })),
      Err(Raised::Error { .. })
    ));
  }

  #[test]
  fn test_debug_hides_callbacks() {
    let mut builder = NodeBuilder::new();
    builder.version("4.0.0");

    let rendered = format!("{:?}", builder);
    assert!(rendered.contains("4.0.0"));
    assert!(rendered.contains("has_validate: false"));
  }
}
