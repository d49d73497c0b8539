//! Scheme-up Chain
//!
//! This crate provides the migration building blocks:
//! - [`MigrationNode`]: one versioned validation and transformation step
//! - [`NodeBuilder`]: staged construction of a node, checked at build time
//! - [`MigrationChain`]: the ordered nodes plus the upgrade traversal
//!
//! A chain upgrades a versioned object by locating the first node whose
//! range accepts the object's `version`, then walking forward to the end of
//! the chain, validating before every transformation, and finally asserting
//! the result against the last node.

mod builder;
mod chain;
mod node;
mod result;

pub use builder::NodeBuilder;
pub use chain::MigrationChain;
pub use node::{MigrationNode, NodeDescriptor, TransformFn, ValidateFn};
pub use result::FlowResult;
