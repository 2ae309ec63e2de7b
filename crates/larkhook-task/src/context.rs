use std::sync::Arc;

use larkhook_config::RunContextDef;
use larkhook_render::{RenderError, Renderer, SecretProvider, TemplateRenderer};

/// Context provided to a task during execution.
#[derive(Clone)]
pub struct RunContext {
  /// Execution ID, for log correlation.
  pub execution_id: String,

  /// Flow the task belongs to.
  pub flow_id: String,

  /// Task ID within the flow.
  pub task_id: String,

  renderer: Arc<dyn Renderer>,
}

impl RunContext {
  /// Create a context whose templates render against `def` with secrets from `secrets`.
  pub fn new(def: &RunContextDef, secrets: Arc<dyn SecretProvider>) -> Self {
    Self::with_renderer(def, Arc::new(TemplateRenderer::new(def, secrets)))
  }

  /// Create a context with a custom renderer.
  pub fn with_renderer(def: &RunContextDef, renderer: Arc<dyn Renderer>) -> Self {
    Self {
      execution_id: def.execution.id.clone(),
      flow_id: def.flow.id.clone(),
      task_id: def.task_id.clone().unwrap_or_default(),
      renderer,
    }
  }

  pub fn renderer(&self) -> &dyn Renderer {
    self.renderer.as_ref()
  }

  pub fn render(&self, template: &str) -> Result<String, RenderError> {
    self.renderer.render(template)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use larkhook_config::{ExecutionDef, FlowDef};
  use larkhook_render::StaticSecretProvider;

  #[test]
  fn test_context_ids() {
    let def = RunContextDef {
      flow: FlowDef {
        id: "my_flow".to_string(),
        namespace: "company.team".to_string(),
        revision: None,
      },
      execution: ExecutionDef {
        id: "exec-1".to_string(),
        start_date: None,
      },
      task_id: None,
      vars: Default::default(),
    };
    let ctx = RunContext::new(&def, Arc::new(StaticSecretProvider::new()));

    assert_eq!(ctx.execution_id, "exec-1");
    assert_eq!(ctx.flow_id, "my_flow");
    assert_eq!(ctx.task_id, "");
    assert_eq!(ctx.render("{{ flow.namespace }}").unwrap(), "company.team");
  }
}
