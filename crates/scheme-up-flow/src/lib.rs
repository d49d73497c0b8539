//! Scheme-up Flow
//!
//! This crate provides the [`VersionFlow`] orchestrator, the public entry
//! point for migrating versioned objects:
//! - node registration through [`NodeBuilder`] callbacks
//! - compilation into a semver-sorted [`MigrationChain`]
//! - execution with an optional recovery callback
//! - migration events delivered to a [`MigrationNotifier`]
//!
//! ```
//! use scheme_up_flow::VersionFlow;
//! use serde_json::json;
//!
//! let mut flow = VersionFlow::new();
//! flow
//!   .add(|node| {
//!     node
//!       .version("1.0.0")
//!       .range("^1.0.0")
//!       .validate(|_| Ok(()))
//!       .transform(|mut value| {
//!         value["version"] = json!("2.0.0");
//!         Ok(value)
//!       });
//!   })
//!   .add(|node| {
//!     node.version("2.0.0").range("^2.0.0").validate(|_| Ok(()));
//!   });
//!
//! let output = flow.execute(json!({ "version": "1.0.0" })).unwrap();
//! assert_eq!(output, json!({ "version": "2.0.0" }));
//! ```

mod events;
mod flow;

pub use events::{ChannelNotifier, MigrationEvent, MigrationNotifier, NoopNotifier};
pub use flow::{CatchFn, VersionFlow};
pub use scheme_up_chain::{FlowResult, MigrationChain, MigrationNode, NodeBuilder};
