//! Scheme-up
//!
//! A versioned-object migration engine. Records tagged with a semantic
//! `version` are upgraded one version step at a time into the latest shape,
//! with the record's structure validated at every step.
//!
//! This crate re-exports the public surface of the workspace:
//! - [`VersionFlow`]: register nodes, execute migrations, recover failures
//! - [`NodeBuilder`] / [`MigrationNode`]: one validation and transformation step
//! - [`MigrationChain`]: the sorted nodes and the upgrade traversal
//! - [`FlowError`] / [`ErrorKind`] / [`Raised`]: the error taxonomy
//! - [`FlowConfig`]: defaults for new node builders
//!
//! ```
//! use scheme_up::{ErrorKind, VersionFlow};
//! use serde_json::json;
//!
//! let mut flow = VersionFlow::new();
//! flow.add(|node| {
//!   node.version("1.0.0").range("^1.0.0").validate(|input| {
//!     match input.pointer("/data/name") {
//!       Some(name) if name.is_string() => Ok(()),
//!       _ => Err("Data.name must be a string".into()),
//!     }
//!   });
//! });
//!
//! let err = flow.execute(json!({ "version": "1.0.0", "data": {} })).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Unknown);
//! ```

pub use scheme_up_chain::{
  FlowResult, MigrationChain, MigrationNode, NodeBuilder, NodeDescriptor, TransformFn, ValidateFn,
};
pub use scheme_up_config::{DEFAULT_RANGE, DEFAULT_VERSION, FlowConfig};
pub use scheme_up_error::{ErrorKind, FlowError, Raised};
pub use scheme_up_flow::{
  CatchFn, ChannelNotifier, MigrationEvent, MigrationNotifier, NoopNotifier, VersionFlow,
};

/// Semver primitives used to order chains and match ranges.
pub mod version {
  pub use scheme_up_version::{Range, Version, VersionError, compare, parse_version, satisfies};
}
