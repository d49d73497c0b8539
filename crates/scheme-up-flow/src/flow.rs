//! The flow orchestrator.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use scheme_up_chain::{FlowResult, MigrationChain, NodeBuilder};
use scheme_up_config::FlowConfig;
use scheme_up_error::{FlowError, Raised};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::events::{MigrationEvent, MigrationNotifier, NoopNotifier};

/// Recovery callback: given the normalized failure, return a fallback value,
/// nothing, or a new failure.
pub type CatchFn = Arc<dyn Fn(&FlowError) -> Result<Option<Value>, Raised> + Send + Sync>;

/// Collects node definitions and migrates versioned objects through them.
///
/// Nodes are kept as builders and only built when the flow is compiled, so
/// the chain is rebuilt and re-sorted on every [`execute`](Self::execute).
/// Registration order does not matter; the chain is ordered by semver.
pub struct VersionFlow {
  config: FlowConfig,
  builders: Vec<NodeBuilder>,
  recover: Option<CatchFn>,
  notifier: Arc<dyn MigrationNotifier>,
}

impl VersionFlow {
  /// Create an empty flow with default node settings.
  pub fn new() -> Self {
    Self::with_config(FlowConfig::default())
  }

  /// Create an empty flow whose node builders start from `config`.
  pub fn with_config(config: FlowConfig) -> Self {
    Self {
      config,
      builders: Vec::new(),
      recover: None,
      notifier: Arc::new(NoopNotifier),
    }
  }

  /// Deliver migration events to `notifier`.
  pub fn with_notifier(mut self, notifier: impl MigrationNotifier + 'static) -> Self {
    self.notifier = Arc::new(notifier);
    self
  }

  pub fn config(&self) -> &FlowConfig {
    &self.config
  }

  /// Number of registered node definitions.
  pub fn len(&self) -> usize {
    self.builders.len()
  }

  pub fn is_empty(&self) -> bool {
    self.builders.is_empty()
  }

  /// Register a node. `configure` receives a fresh builder seeded from the
  /// flow's config.
  pub fn add<F>(&mut self, configure: F) -> &mut Self
  where
    F: FnOnce(&mut NodeBuilder),
  {
    let mut builder = NodeBuilder::with_config(&self.config);
    configure(&mut builder);
    self.builders.push(builder);
    self
  }

  /// Set the recovery callback, replacing any previous one.
  ///
  /// On failure the callback receives the normalized error. Returning a
  /// truthy value turns the execution into a success with that value.
  /// Returning `None` or a falsy value (`null`, `false`, `0`, `""`) keeps
  /// the original failure. Failing replaces the original failure with the
  /// callback's own.
  pub fn catch<F>(&mut self, callback: F) -> &mut Self
  where
    F: Fn(&FlowError) -> Result<Option<Value>, Raised> + Send + Sync + 'static,
  {
    self.recover = Some(Arc::new(callback));
    self
  }

  /// Compile the registered nodes into a chain sorted by version.
  ///
  /// The first node missing a validation step fails the build.
  pub fn build(&self) -> Result<MigrationChain, FlowError> {
    let nodes = self
      .builders
      .iter()
      .map(NodeBuilder::build)
      .collect::<Result<Vec<_>, _>>()?;

    MigrationChain::sorted(nodes)
  }

  /// Upgrade `input` to the latest version.
  ///
  /// A flow that cannot be built fails without consulting the recovery
  /// callback. Migration failures go through the callback when one is set.
  #[instrument(name = "flow_execute", skip(self, input), fields(nodes = self.builders.len()))]
  pub fn execute(&self, input: Value) -> FlowResult<Value> {
    let version = version_tag(&input);

    info!(version = ?version, "migration_started");
    self.notifier.notify(MigrationEvent::Started {
      version: version.clone(),
    });

    let chain = match self.build() {
      Ok(chain) => chain,
      Err(error) => {
        self.fail(&error);
        return Err(error);
      }
    };

    match chain.upgrade_to_latest(input) {
      Ok(output) => {
        let final_version = version_tag(&output);
        info!(version = ?version, final_version = ?final_version, "migration_completed");
        self.notifier.notify(MigrationEvent::Completed {
          version,
          final_version,
        });
        Ok(output)
      }
      Err(error) => self.recover(error),
    }
  }

  /// Typed variant of [`execute`](Self::execute): `input` is serialized
  /// before the upgrade and the final value is deserialized into `T`.
  pub fn execute_as<T, I>(&self, input: &I) -> FlowResult<T>
  where
    T: DeserializeOwned,
    I: Serialize + ?Sized,
  {
    let input = serde_json::to_value(input).map_err(FlowError::normalize)?;
    let output = self.execute(input)?;
    serde_json::from_value(output).map_err(FlowError::normalize)
  }

  fn recover(&self, error: FlowError) -> FlowResult<Value> {
    let Some(callback) = &self.recover else {
      self.fail(&error);
      return Err(error);
    };

    debug!(code = error.code(), "recovery_invoked");
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| callback(&error)))
      .unwrap_or_else(|payload| Err(Raised::from_panic(payload)));

    match outcome {
      Ok(Some(fallback)) if !is_falsy(&fallback) => {
        info!(code = error.code(), "recovery_succeeded");
        self.notifier.notify(MigrationEvent::Recovered { error });
        Ok(fallback)
      }
      Ok(_) => {
        self.fail(&error);
        Err(error)
      }
      Err(raised) => {
        let replaced = FlowError::normalize(raised);
        warn!(
          code = replaced.code(),
          original_code = error.code(),
          "recovery_failed"
        );
        self.fail(&replaced);
        Err(replaced)
      }
    }
  }

  fn fail(&self, error: &FlowError) {
    warn!(code = error.code(), error = %error, "migration_failed");
    self.notifier.notify(MigrationEvent::Failed {
      error: error.clone(),
    });
  }
}

impl Default for VersionFlow {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Debug for VersionFlow {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("VersionFlow")
      .field("config", &self.config)
      .field("builders", &self.builders)
      .field("has_catch", &self.recover.is_some())
      .finish_non_exhaustive()
  }
}

fn is_falsy(value: &Value) -> bool {
  match value {
    Value::Null => true,
    Value::Bool(flag) => !flag,
    Value::Number(number) => number.as_f64() == Some(0.0),
    Value::String(text) => text.is_empty(),
    Value::Array(_) | Value::Object(_) => false,
  }
}

fn version_tag(value: &Value) -> Option<String> {
  value
    .get("version")
    .and_then(Value::as_str)
    .map(str::to_string)
}
