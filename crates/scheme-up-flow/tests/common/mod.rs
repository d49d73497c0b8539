//! Shared fixtures: a three-version person record and its validators.

#![allow(dead_code)]

use std::sync::Once;

use anyhow::{Context, bail, ensure};
use scheme_up_error::Raised;
use scheme_up_flow::VersionFlow;
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

/// Fixed reference year so birth-year arithmetic is deterministic.
pub const REFERENCE_YEAR: i64 = 2025;

static TRACING: Once = Once::new();

/// Route tracing output through the test harness. Honors `RUST_LOG`.
pub fn init_tracing() {
  TRACING.call_once(|| {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
      .with_env_filter(filter)
      .with_test_writer()
      .try_init();
  });
}

fn data_of<'a>(input: &'a Value, version: &str) -> anyhow::Result<&'a Value> {
  ensure!(input.is_object(), "Input must be an object");
  if input.get("version").and_then(Value::as_str) != Some(version) {
    bail!("Expected version {}", version);
  }
  let data = input.get("data").context("Data must be an object")?;
  ensure!(data.is_object(), "Data must be an object");
  Ok(data)
}

fn check_v1(input: &Value) -> anyhow::Result<()> {
  let data = data_of(input, "1.0.0")?;
  ensure!(data["name"].is_string(), "Data.name must be a string");
  ensure!(data["age"].is_number(), "Data.age must be a number");
  Ok(())
}

fn check_v2(input: &Value) -> anyhow::Result<()> {
  let data = data_of(input, "2.0.0")?;
  ensure!(data["fullName"].is_string(), "Data.fullName must be a string");
  ensure!(data["birthYear"].is_number(), "Data.birthYear must be a number");
  Ok(())
}

fn check_v3(input: &Value) -> anyhow::Result<()> {
  let data = data_of(input, "3.0.0")?;
  ensure!(data["name"].is_string(), "Data.name must be a string");
  ensure!(data["age"].is_number(), "Data.age must be a number");
  ensure!(data["isAdult"].is_boolean(), "Data.isAdult must be a boolean");
  Ok(())
}

pub fn assert_v1(input: &Value) -> Result<(), Raised> {
  Ok(check_v1(input)?)
}

pub fn assert_v2(input: &Value) -> Result<(), Raised> {
  Ok(check_v2(input)?)
}

pub fn assert_v3(input: &Value) -> Result<(), Raised> {
  Ok(check_v3(input)?)
}

/// 1.0.0 -> 2.0.0: `name` becomes `fullName`, `age` becomes `birthYear`.
pub fn v1_to_v2(v1: Value) -> Result<Value, Raised> {
  let age = v1["data"]["age"].as_i64().ok_or("age must be an integer")?;
  Ok(json!({
    "version": "2.0.0",
    "data": {
      "fullName": v1["data"]["name"],
      "birthYear": REFERENCE_YEAR - age,
    }
  }))
}

/// 2.0.0 -> 3.0.0: back to `name` and `age`, plus `isAdult`.
pub fn v2_to_v3(v2: Value) -> Result<Value, Raised> {
  let birth_year = v2["data"]["birthYear"]
    .as_i64()
    .ok_or("birthYear must be an integer")?;
  let age = REFERENCE_YEAR - birth_year;
  Ok(json!({
    "version": "3.0.0",
    "data": {
      "name": v2["data"]["fullName"],
      "age": age,
      "isAdult": age >= 18,
    }
  }))
}

pub fn add_v1(flow: &mut VersionFlow) {
  flow.add(|node| {
    node
      .version("1.0.0")
      .range("^1.0.0")
      .validate(assert_v1)
      .transform(v1_to_v2);
  });
}

pub fn add_v2(flow: &mut VersionFlow) {
  flow.add(|node| {
    node
      .version("2.0.0")
      .range("^2.0.0")
      .validate(assert_v2)
      .transform(v2_to_v3);
  });
}

pub fn add_v3(flow: &mut VersionFlow) {
  flow.add(|node| {
    node.version("3.0.0").range("^3.0.0").validate(assert_v3);
  });
}

/// The full 1.0.0 -> 2.0.0 -> 3.0.0 person flow.
pub fn person_flow() -> VersionFlow {
  init_tracing();
  let mut flow = VersionFlow::new();
  add_v1(&mut flow);
  add_v2(&mut flow);
  add_v3(&mut flow);
  flow
}
