//! Run context definitions.
//!
//! The run context is the data a task's templates can reference: the flow the
//! task belongs to, the current execution, and any extra variables.
//!
//! ```json
//! {
//!   "flow": { "id": "unreliable_flow", "namespace": "company.team" },
//!   "execution": { "id": "4wjtkzwVGBM9yKnjm3yv8r" },
//!   "task_id": "alert_on_failure",
//!   "vars": { "region": "eu" }
//! }
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunContextDef {
  #[serde(default)]
  pub flow: FlowDef,

  #[serde(default)]
  pub execution: ExecutionDef,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub task_id: Option<String>,

  /// Extra variables, exposed at the top level of the template context.
  #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
  pub vars: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowDef {
  #[serde(default)]
  pub id: String,
  #[serde(default)]
  pub namespace: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub revision: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionDef {
  #[serde(default)]
  pub id: String,
  /// RFC 3339 start timestamp, as reported by the caller.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub start_date: Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_empty_context() {
    let ctx: RunContextDef = serde_json::from_str("{}").unwrap();
    assert_eq!(ctx, RunContextDef::default());
  }

  #[test]
  fn test_vars_round_through_serde() {
    let ctx: RunContextDef = serde_json::from_str(
      r#"{"flow": {"id": "f", "namespace": "n"}, "execution": {"id": "e"}, "vars": {"count": 3}}"#,
    )
    .unwrap();

    assert_eq!(ctx.flow.id, "f");
    assert_eq!(ctx.flow.namespace, "n");
    assert_eq!(ctx.execution.id, "e");
    assert_eq!(ctx.vars["count"], 3);

    let json = serde_json::to_value(&ctx).unwrap();
    assert!(json.get("task_id").is_none());
  }
}
