use thiserror::Error;

/// Errors raised by the HTTP layer.
#[derive(Debug, Error)]
pub enum HttpError {
  /// The client could not be built from its options.
  #[error("failed to build http client: {source}")]
  Build {
    #[source]
    source: reqwest::Error,
  },

  /// A header name or value is not valid HTTP.
  #[error("invalid header '{name}'")]
  InvalidHeader { name: String },

  /// The request failed in transit (connect, TLS, timeout, body read).
  #[error("http error: {0}")]
  Transport(#[from] reqwest::Error),
}
