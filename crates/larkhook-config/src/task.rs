use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::options::HttpOptions;

/// Definition of a Lark incoming-webhook task.
///
/// Both `url` and `payload` are template strings. They are rendered against the
/// run context at execution time; the rendered payload must be a JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LarkWebhookDef {
  /// Incoming webhook URL, e.g. `https://open.larksuite.com/open-apis/bot/v2/hook/xxx`
  pub url: String,

  /// Message payload template. Rendering happens before JSON parsing.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub payload: Option<String>,

  /// Options applied to the HTTP client for this task.
  #[serde(default)]
  pub options: HttpOptions,

  /// Fail the task when the webhook answers with a non-2xx status.
  ///
  /// Off by default: a non-200 answer is only visible in the debug log.
  #[serde(default)]
  pub fail_on_error_status: bool,
}

impl LarkWebhookDef {
  /// Create a definition with default options.
  pub fn new(url: impl Into<String>, payload: Option<String>) -> Self {
    Self {
      url: url.into(),
      payload,
      options: HttpOptions::default(),
      fail_on_error_status: false,
    }
  }

  /// Check the required fields before execution.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.url.trim().is_empty() {
      return Err(ConfigError::missing("url"));
    }
    self.options.validate()
  }
}
