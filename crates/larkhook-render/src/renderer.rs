use std::sync::Arc;

use larkhook_config::RunContextDef;
use minijinja::{Environment, ErrorKind, UndefinedBehavior, Value};
use serde_json::json;
use tracing::trace;

use crate::error::RenderError;
use crate::secret::SecretProvider;

/// Renders template strings against the current run.
pub trait Renderer: Send + Sync {
  fn render(&self, template: &str) -> Result<String, RenderError>;
}

/// minijinja-backed renderer bound to a single run context.
///
/// Template variables:
/// - `flow.id`, `flow.namespace`, `flow.revision`
/// - `execution.id`, `execution.start_date`
/// - `task_id`
/// - each entry of the context's `vars`, at the top level
///
/// Referencing an undefined variable is an error.
pub struct TemplateRenderer {
  env: Environment<'static>,
  context: Value,
}

impl TemplateRenderer {
  pub fn new(context: &RunContextDef, secrets: Arc<dyn SecretProvider>) -> Self {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_keep_trailing_newline(true);
    env.add_function("secret", move |key: String| -> Result<String, minijinja::Error> {
      lookup_secret(secrets.as_ref(), &key)
    });

    Self {
      env,
      context: Value::from_serialize(build_context(context)),
    }
  }
}

impl Renderer for TemplateRenderer {
  fn render(&self, template: &str) -> Result<String, RenderError> {
    if !has_template_markers(template) {
      return Ok(template.to_string());
    }

    trace!(template, "rendering template");
    self
      .env
      .render_str(template, self.context.clone())
      .map_err(render_error)
  }
}

/// Build the template context. Reserved keys win over same-named `vars`.
fn build_context(context: &RunContextDef) -> serde_json::Value {
  let mut root = context.vars.clone();
  root.insert("flow".to_string(), json!(context.flow));
  root.insert("execution".to_string(), json!(context.execution));
  root.insert("task_id".to_string(), json!(context.task_id));
  serde_json::Value::Object(root)
}

fn has_template_markers(template: &str) -> bool {
  template.contains("{{") || template.contains("{%") || template.contains("{#")
}

fn lookup_secret(provider: &dyn SecretProvider, key: &str) -> Result<String, minijinja::Error> {
  match provider.get(key) {
    Ok(Some(value)) => Ok(value),
    Ok(None) => Err(
      minijinja::Error::new(ErrorKind::InvalidOperation, format!("secret '{}' not found", key))
        .with_source(RenderError::SecretNotFound {
          key: key.to_string(),
        }),
    ),
    Err(e) => Err(
      minijinja::Error::new(ErrorKind::InvalidOperation, e.to_string()).with_source(e),
    ),
  }
}

/// Surface a secret failure raised inside the template as itself.
fn render_error(err: minijinja::Error) -> RenderError {
  let mut source = std::error::Error::source(&err);
  while let Some(cause) = source {
    if let Some(render_err) = cause.downcast_ref::<RenderError>() {
      return render_err.clone();
    }
    source = cause.source();
  }
  RenderError::template(err.to_string())
}
