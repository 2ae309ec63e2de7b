use thiserror::Error;

/// Errors that can occur while rendering a template.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
  /// The template failed to parse or evaluate.
  #[error("failed to render template: {message}")]
  Template { message: String },

  /// A template called `secret(key)` for a key no provider knows.
  #[error("secret '{key}' not found")]
  SecretNotFound { key: String },

  /// A secret provider failed to answer.
  #[error("secret provider error: {message}")]
  Provider { message: String },
}

impl RenderError {
  pub fn template(message: impl Into<String>) -> Self {
    Self::Template {
      message: message.into(),
    }
  }

  pub fn provider(message: impl Into<String>) -> Self {
    Self::Provider {
      message: message.into(),
    }
  }
}
