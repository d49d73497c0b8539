//! Migration events and notifiers for observability.
//!
//! A [`VersionFlow`](crate::VersionFlow) emits one event when an execution
//! starts and one when it ends, so hosts can count upgrades, persist audit
//! trails or surface recoveries without wrapping every call site.

use scheme_up_error::FlowError;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Events emitted while executing a flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MigrationEvent {
  /// An execution has started. `version` is the input's version tag, when it
  /// has a string one.
  Started { version: Option<String> },

  /// An execution reached the terminal shape.
  Completed {
    version: Option<String>,
    final_version: Option<String>,
  },

  /// An execution failed and was not recovered.
  Failed { error: FlowError },

  /// A failure was replaced by the recovery callback's fallback value.
  Recovered { error: FlowError },
}

/// Trait for receiving migration events.
///
/// The flow calls `notify` synchronously, on the executing thread.
pub trait MigrationNotifier: Send + Sync {
  fn notify(&self, event: MigrationEvent);
}

/// A notifier that discards all events.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl MigrationNotifier for NoopNotifier {
  fn notify(&self, _event: MigrationEvent) {}
}

/// A notifier that forwards events to an unbounded channel.
///
/// Sending never blocks, so a slow consumer cannot stall a migration.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
  sender: mpsc::UnboundedSender<MigrationEvent>,
}

impl ChannelNotifier {
  pub fn new(sender: mpsc::UnboundedSender<MigrationEvent>) -> Self {
    Self { sender }
  }

  /// Create a notifier together with the receiving end of its channel.
  pub fn channel() -> (Self, mpsc::UnboundedReceiver<MigrationEvent>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (Self::new(sender), receiver)
  }
}

impl MigrationNotifier for ChannelNotifier {
  fn notify(&self, event: MigrationEvent) {
    // Receiver may have been dropped
    let _ = self.sender.send(event);
  }
}
