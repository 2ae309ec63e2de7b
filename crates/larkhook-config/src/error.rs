use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating definitions.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// A required field is missing or empty.
  #[error("missing required field: {field}")]
  MissingField { field: String },

  /// A field holds a value that can never be valid.
  #[error("invalid value for '{field}': {message}")]
  InvalidField { field: String, message: String },

  /// Reading a definition file failed.
  #[error("failed to read {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// A definition file is not valid JSON for the expected shape.
  #[error("failed to parse {}: {source}", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
}

impl ConfigError {
  pub fn missing(field: impl Into<String>) -> Self {
    Self::MissingField {
      field: field.into(),
    }
  }

  pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
    Self::InvalidField {
      field: field.into(),
      message: message.into(),
    }
  }
}
