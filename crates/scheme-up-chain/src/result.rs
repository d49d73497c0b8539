//! Flow result type.

use scheme_up_error::FlowError;
use serde_json::Value;

/// Outcome of an upgrade: the final value, or the normalized error that
/// aborted it.
pub type FlowResult<T = Value> = Result<T, FlowError>;
