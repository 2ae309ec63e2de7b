use larkhook_config::LarkWebhookDef;
use larkhook_http::{HttpClient, HttpRequest, ReqwestHttpClient, Url};
use larkhook_render::Renderer;
use tracing::{debug, error, info, instrument};

use crate::context::RunContext;
use crate::error::TaskError;
use crate::options::render_options;

/// Send a Lark (Feishu) message through an incoming webhook.
#[derive(Debug, Clone)]
pub struct LarkIncomingWebhook {
  def: LarkWebhookDef,
}

impl LarkIncomingWebhook {
  pub fn new(def: LarkWebhookDef) -> Self {
    Self { def }
  }

  /// Execute the task.
  ///
  /// The HTTP client is built from the task's options for this call only and is
  /// dropped on return, whatever the outcome.
  #[instrument(
    name = "lark_incoming_webhook",
    skip(self, ctx),
    fields(
      execution_id = %ctx.execution_id,
      flow_id = %ctx.flow_id,
      task_id = %ctx.task_id,
    )
  )]
  pub async fn run(&self, ctx: &RunContext) -> Result<(), TaskError> {
    let result = self.run_inner(ctx).await;

    if let Err(e) = &result {
      error!(error = %e, "task failed");
    }

    result
  }

  async fn run_inner(&self, ctx: &RunContext) -> Result<(), TaskError> {
    self.def.validate()?;

    let options = render_options(&self.def.options, ctx.renderer())?;
    let client = ReqwestHttpClient::new(&options)?;

    send_webhook(&self.def, ctx.renderer(), &client).await
  }
}

/// Render the task's templates and POST the payload once.
///
/// The payload is checked before the rendered URL is parsed: a missing payload
/// fails as such whatever the URL holds, and neither a missing payload nor one
/// that does not render to valid JSON touches the network. A response other
/// than 200 is not an error unless
/// [`LarkWebhookDef::fail_on_error_status`] is set, in which case any non-2xx
/// status fails the call.
pub async fn send_webhook(
  def: &LarkWebhookDef,
  renderer: &dyn Renderer,
  client: &dyn HttpClient,
) -> Result<(), TaskError> {
  let rendered_url = renderer.render(&def.url)?;
  let payload = prepare_message(def, renderer)?;
  let url = parse_url(&rendered_url)?;

  debug!(payload = %payload, "send lark webhook");

  let mut request = HttpRequest::post_json(url, payload);
  for (name, template) in &def.options.headers {
    // The JSON content type is fixed, and configured auth owns Authorization.
    if name.eq_ignore_ascii_case("content-type")
      || (def.options.auth.is_some() && name.eq_ignore_ascii_case("authorization"))
    {
      continue;
    }
    request = request.with_header(name.clone(), renderer.render(template)?);
  }

  let response = client.send(request).await?;

  debug!(status = response.status, body = %response.body, "response");

  if response.status == 200 {
    info!("request succeeded");
  }

  if def.fail_on_error_status && !response.is_success() {
    return Err(TaskError::ErrorStatus {
      status: response.status,
      body: response.body,
    });
  }

  Ok(())
}

fn parse_url(rendered: &str) -> Result<Url, TaskError> {
  let rendered = rendered.trim();

  if rendered.is_empty() {
    return Err(TaskError::invalid_input("url", "must not be empty"));
  }

  Url::parse(rendered).map_err(|e| TaskError::invalid_input("url", e.to_string()))
}

fn prepare_message(
  def: &LarkWebhookDef,
  renderer: &dyn Renderer,
) -> Result<serde_json::Value, TaskError> {
  let template = def.payload.as_deref().ok_or(TaskError::MissingPayload)?;
  let rendered = renderer.render(template)?;
  serde_json::from_str(&rendered).map_err(TaskError::MalformedPayload)
}
