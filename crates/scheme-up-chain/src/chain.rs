//! The migration chain and its upgrade traversal.

use std::panic::{self, AssertUnwindSafe};

use scheme_up_error::{ErrorKind, FlowError, Raised};
use scheme_up_version::{parse_version, precedence, satisfies};
use serde_json::{Value, json};
use tracing::{Span, debug, field, instrument, trace};

use crate::node::{MigrationNode, NodeDescriptor};
use crate::result::FlowResult;

/// An ordered sequence of migration nodes.
///
/// The chain holds no mutable state and can run any number of upgrades.
#[derive(Debug, Clone, Default)]
pub struct MigrationChain {
  nodes: Vec<MigrationNode>,
}

impl MigrationChain {
  /// Wrap `nodes` in the order given.
  pub fn new(nodes: Vec<MigrationNode>) -> Self {
    Self { nodes }
  }

  /// Wrap `nodes` sorted ascending by semver precedence.
  ///
  /// The sort is stable, so nodes with equal versions keep their relative
  /// order. A node whose version cannot be parsed cannot be ordered and fails
  /// with [`ErrorKind::Unknown`].
  pub fn sorted(nodes: Vec<MigrationNode>) -> Result<Self, FlowError> {
    let mut keyed = nodes
      .into_iter()
      .map(|node| -> Result<_, FlowError> {
        let version = parse_version(node.version()).map_err(|e| {
          FlowError::with_payload(
            ErrorKind::Unknown,
            json!({ "version": node.version(), "message": e.to_string() }),
          )
        })?;
        Ok((version, node))
      })
      .collect::<Result<Vec<_>, _>>()?;

    keyed.sort_by(|(a, _), (b, _)| precedence(a, b));

    Ok(Self::new(keyed.into_iter().map(|(_, node)| node).collect()))
  }

  pub fn nodes(&self) -> &[MigrationNode] {
    &self.nodes
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// Version of the terminal node, i.e. the shape every upgrade ends in.
  pub fn latest_version(&self) -> Option<&str> {
    self.nodes.last().map(MigrationNode::version)
  }

  pub fn describe(&self) -> Vec<NodeDescriptor> {
    self.nodes.iter().map(MigrationNode::describe).collect()
  }

  /// Upgrade `input` to the shape of the last node in the chain.
  ///
  /// The walk starts at the first node, in chain order, whose range accepts
  /// `input.version`. When ranges overlap the earliest node wins; chain
  /// authors are expected to keep ranges disjoint. Every node from there on
  /// validates the current value and then transforms it. The last node of
  /// the chain validates the final value once more.
  ///
  /// Failures abort the walk at the first error, including panics raised by
  /// callbacks, and are returned normalized.
  #[instrument(
    name = "upgrade_to_latest",
    skip(self, input),
    fields(nodes = self.nodes.len(), version = field::Empty)
  )]
  pub fn upgrade_to_latest(&self, input: Value) -> FlowResult<Value> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.walk(input)))
      .unwrap_or_else(|payload| Err(Raised::from_panic(payload)));

    match outcome {
      Ok(output) => {
        debug!("migration_completed");
        Ok(output)
      }
      Err(raised) => {
        let error = FlowError::normalize(raised);
        debug!(code = error.code(), error = %error, "migration_aborted");
        Err(error)
      }
    }
  }

  fn walk(&self, input: Value) -> Result<Value, Raised> {
    let version = match input.get("version") {
      Some(Value::String(version)) if !version.is_empty() => version.clone(),
      other => {
        let payload = match other {
          Some(version) => json!({ "version": version }),
          None => json!({}),
        };
        return Err(FlowError::with_payload(ErrorKind::MissingVersion, payload).into());
      }
    };
    Span::current().record("version", version.as_str());

    if self.nodes.is_empty() {
      return Err(FlowError::new(ErrorKind::NodesNotRegistered).into());
    }

    let start = self
      .nodes
      .iter()
      .position(|node| satisfies(&version, node.range()))
      .ok_or_else(|| {
        FlowError::with_payload(ErrorKind::UnsupportedVersion, json!({ "version": version }))
      })?;

    debug!(
      start_version = self.nodes[start].version(),
      steps = self.nodes.len() - start,
      "start_node_located"
    );

    let mut current = input;
    for node in &self.nodes[start..] {
      node.validate(&current)?;
      trace!(node_version = node.version(), "node_validated");

      if node.has_transform() {
        current = node.transform(current)?;
        trace!(node_version = node.version(), "node_transformed");
      }
    }

    let last = self
      .nodes
      .last()
      .ok_or_else(|| FlowError::new(ErrorKind::NoMigrationNodeFound))?;
    last.validate(&current)?;

    Ok(current)
  }
}
