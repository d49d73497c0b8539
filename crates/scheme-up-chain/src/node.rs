use std::fmt;
use std::sync::Arc;

use scheme_up_error::Raised;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inspects a value and fails if it does not have the node's shape.
pub type ValidateFn = Arc<dyn Fn(&Value) -> Result<(), Raised> + Send + Sync>;

/// Produces the next version's shape from the current one.
pub type TransformFn = Arc<dyn Fn(Value) -> Result<Value, Raised> + Send + Sync>;

/// A single migration step.
///
/// Nodes are created by [`NodeBuilder`](crate::NodeBuilder) and never
/// mutated afterwards. Cloning a node shares its callbacks.
#[derive(Clone)]
pub struct MigrationNode {
  version: String,
  range: String,
  validate: ValidateFn,
  transform: Option<TransformFn>,
}

impl MigrationNode {
  pub(crate) fn new(
    version: String,
    range: String,
    validate: ValidateFn,
    transform: Option<TransformFn>,
  ) -> Self {
    Self {
      version,
      range,
      validate,
      transform,
    }
  }

  /// Version of the schema this node represents.
  pub fn version(&self) -> &str {
    &self.version
  }

  /// Range of input versions this node accepts.
  pub fn range(&self) -> &str {
    &self.range
  }

  /// Whether this node changes the shape of its input.
  pub fn has_transform(&self) -> bool {
    self.transform.is_some()
  }

  /// Run the validation step against `input`.
  pub fn validate(&self, input: &Value) -> Result<(), Raised> {
    (self.validate)(input)
  }

  /// Run the transformation step. Nodes without one return `input` as is.
  pub fn transform(&self, input: Value) -> Result<Value, Raised> {
    match &self.transform {
      Some(transform) => transform(input),
      None => Ok(input),
    }
  }

  pub fn describe(&self) -> NodeDescriptor {
    NodeDescriptor {
      version: self.version.clone(),
      range: self.range.clone(),
      has_transform: self.has_transform(),
    }
  }
}

impl fmt::Debug for MigrationNode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MigrationNode")
      .field("version", &self.version)
      .field("range", &self.range)
      .field("has_transform", &self.has_transform())
      .finish_non_exhaustive()
  }
}

/// Serializable summary of a node, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDescriptor {
  pub version: String,
  pub range: String,
  pub has_transform: bool,
}
