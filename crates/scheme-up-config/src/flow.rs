use serde::{Deserialize, Serialize};

/// Version a node builder starts with.
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Range a node builder starts with.
pub const DEFAULT_RANGE: &str = "~1.0.0";

/// Defaults applied to node builders created by a flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
  /// Version tag of a node that never sets one.
  pub default_version: String,
  /// Acceptance range of a node that never sets one.
  pub default_range: String,
}

impl Default for FlowConfig {
  fn default() -> Self {
    Self {
      default_version: DEFAULT_VERSION.to_string(),
      default_range: DEFAULT_RANGE.to_string(),
    }
  }
}

impl FlowConfig {
  /// Parse a config from a JSON document.
  pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
    serde_json::from_str(json)
  }

  /// Parse a config from an already decoded JSON value.
  pub fn from_json_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
    serde_json::from_value(value)
  }
}
