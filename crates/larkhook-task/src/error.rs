use larkhook_config::ConfigError;
use larkhook_http::HttpError;
use larkhook_render::RenderError;
use thiserror::Error;

/// Errors that can occur during task execution.
#[derive(Debug, Error)]
pub enum TaskError {
  /// The task definition failed validation.
  #[error("invalid task definition: {0}")]
  Config(#[from] ConfigError),

  /// A template could not be rendered.
  #[error("render error: {0}")]
  Render(#[from] RenderError),

  /// A rendered value is unusable.
  #[error("invalid input '{field}': {message}")]
  InvalidInput { field: String, message: String },

  /// No payload was configured.
  #[error("'payload' must be provided")]
  MissingPayload,

  /// The rendered payload is not a JSON document.
  #[error("payload is not valid JSON: {0}")]
  MalformedPayload(#[source] serde_json::Error),

  /// The request could not be sent or its response not read.
  #[error(transparent)]
  Http(#[from] HttpError),

  /// The webhook answered with a non-2xx status and the task is set to fail on it.
  #[error("webhook responded with status {status}: {body}")]
  ErrorStatus { status: u16, body: String },
}

impl TaskError {
  pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
    Self::InvalidInput {
      field: field.into(),
      message: message.into(),
    }
  }
}
