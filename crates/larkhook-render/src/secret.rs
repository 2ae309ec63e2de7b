//! Secret providers backing the `secret()` template function.
//!
//! - `EnvSecretProvider`: reads `{prefix}{KEY}` environment variables
//! - `StaticSecretProvider`: fixed in-memory values
//! - `ChainSecretProvider`: asks each provider in order, first answer wins

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::RenderError;

/// Resolves secret values by key.
pub trait SecretProvider: Send + Sync {
  /// Returns `None` when this provider does not know the key.
  fn get(&self, key: &str) -> Result<Option<String>, RenderError>;
}

/// Environment variable secret provider.
///
/// A secret `LARK_WEBHOOK` is read from `SECRET_LARK_WEBHOOK` with the default
/// prefix.
#[derive(Debug, Clone)]
pub struct EnvSecretProvider {
  prefix: String,
}

impl EnvSecretProvider {
  pub const DEFAULT_PREFIX: &'static str = "SECRET_";

  pub fn new() -> Self {
    Self::with_prefix(Self::DEFAULT_PREFIX)
  }

  pub fn with_prefix(prefix: impl Into<String>) -> Self {
    Self {
      prefix: prefix.into(),
    }
  }
}

impl Default for EnvSecretProvider {
  fn default() -> Self {
    Self::new()
  }
}

impl SecretProvider for EnvSecretProvider {
  fn get(&self, key: &str) -> Result<Option<String>, RenderError> {
    match std::env::var(format!("{}{}", self.prefix, key)) {
      Ok(value) => Ok(Some(value)),
      Err(std::env::VarError::NotPresent) => Ok(None),
      Err(std::env::VarError::NotUnicode(_)) => Err(RenderError::provider(format!(
        "environment value for secret '{}' is not valid unicode",
        key
      ))),
    }
  }
}

/// Fixed set of secrets held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSecretProvider {
  secrets: HashMap<String, String>,
}

impl StaticSecretProvider {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
    self.secrets.insert(key.into(), value.into());
  }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StaticSecretProvider {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    Self {
      secrets: iter
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect(),
    }
  }
}

impl SecretProvider for StaticSecretProvider {
  fn get(&self, key: &str) -> Result<Option<String>, RenderError> {
    Ok(self.secrets.get(key).cloned())
  }
}

/// Asks each provider in order and returns the first value found.
#[derive(Clone, Default)]
pub struct ChainSecretProvider {
  providers: Vec<Arc<dyn SecretProvider>>,
}

impl ChainSecretProvider {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with(mut self, provider: impl SecretProvider + 'static) -> Self {
    self.providers.push(Arc::new(provider));
    self
  }
}

impl SecretProvider for ChainSecretProvider {
  fn get(&self, key: &str) -> Result<Option<String>, RenderError> {
    for provider in &self.providers {
      if let Some(value) = provider.get(key)? {
        return Ok(Some(value));
      }
    }
    Ok(None)
  }
}
