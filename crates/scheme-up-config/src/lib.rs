//! Scheme-up Config
//!
//! Serializable configuration for migration flows. A [`FlowConfig`] supplies
//! the defaults every new node builder starts from, so node definitions only
//! need to spell out what differs.
//!
//! Configuration can be embedded in a host application's own settings file
//! as JSON:
//!
//! ```json
//! {
//!   "default_version": "1.0.0",
//!   "default_range": "~1.0.0"
//! }
//! ```
//!
//! Missing fields fall back to the built-in defaults.

mod flow;

pub use flow::{DEFAULT_RANGE, DEFAULT_VERSION, FlowConfig};
