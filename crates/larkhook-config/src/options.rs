//! HTTP client options for a webhook task.
//!
//! These mirror the knobs a notification task usually exposes on its HTTP
//! client: timeouts, an outbound proxy, authentication, extra headers and the
//! redirect policy. Everything is optional; an empty object yields a client
//! with library defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpOptions {
  /// Time allowed to establish the connection.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub connect_timeout_ms: Option<u64>,

  /// Time allowed for the whole request, from send to the end of the body.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub read_timeout_ms: Option<u64>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub proxy: Option<ProxyOptions>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub auth: Option<AuthOptions>,

  /// Extra request headers. Values are templates.
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub headers: BTreeMap<String, String>,

  #[serde(default = "default_follow_redirects")]
  pub follow_redirects: bool,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub user_agent: Option<String>,
}

fn default_follow_redirects() -> bool {
  true
}

impl Default for HttpOptions {
  fn default() -> Self {
    Self {
      connect_timeout_ms: None,
      read_timeout_ms: None,
      proxy: None,
      auth: None,
      headers: BTreeMap::new(),
      follow_redirects: true,
      user_agent: None,
    }
  }
}

impl HttpOptions {
  pub fn validate(&self) -> Result<(), ConfigError> {
    if let Some(proxy) = &self.proxy {
      if proxy.address.trim().is_empty() {
        return Err(ConfigError::missing("options.proxy.address"));
      }
      if proxy.port == 0 {
        return Err(ConfigError::invalid("options.proxy.port", "port must be non-zero"));
      }
    }

    Ok(())
  }
}

/// Outbound HTTP proxy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyOptions {
  /// Proxy host name or IP address.
  pub address: String,
  pub port: u16,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub username: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub password: Option<String>,
}

impl ProxyOptions {
  /// Proxy URL in the `http://host:port` form.
  pub fn url(&self) -> String {
    format!("http://{}:{}", self.address, self.port)
  }
}

/// Authentication sent with every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthOptions {
  Basic {
    username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    password: Option<String>,
  },
  Bearer {
    token: String,
  },
}
