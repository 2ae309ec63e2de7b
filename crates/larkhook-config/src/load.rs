use std::path::Path;

use serde::de::DeserializeOwned;
use tokio::fs;

use crate::context::RunContextDef;
use crate::error::ConfigError;
use crate::task::LarkWebhookDef;

/// Load and validate a task definition from a JSON file.
pub async fn load_task(path: impl AsRef<Path>) -> Result<LarkWebhookDef, ConfigError> {
  let def: LarkWebhookDef = read_json(path.as_ref()).await?;
  def.validate()?;
  Ok(def)
}

/// Load a run context from a JSON file.
pub async fn load_context(path: impl AsRef<Path>) -> Result<RunContextDef, ConfigError> {
  read_json(path.as_ref()).await
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
  let content = fs::read_to_string(path)
    .await
    .map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;

  serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
    path: path.to_path_buf(),
    source,
  })
}
