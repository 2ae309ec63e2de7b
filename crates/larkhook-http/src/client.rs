use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use larkhook_config::{AuthOptions, HttpOptions};
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::{Client, Proxy};
use tracing::debug;

use crate::error::HttpError;
use crate::types::{HttpRequest, HttpResponse};

/// Sends HTTP requests.
#[async_trait]
pub trait HttpClient: Send + Sync {
  /// Send one request and read the full response body.
  ///
  /// Non-2xx statuses are returned as responses, not errors.
  async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

/// reqwest-backed client configured from [`HttpOptions`].
pub struct ReqwestHttpClient {
  client: Client,
  auth: Option<AuthOptions>,
}

impl ReqwestHttpClient {
  pub fn new(options: &HttpOptions) -> Result<Self, HttpError> {
    let mut builder = Client::builder();

    if let Some(ms) = options.connect_timeout_ms {
      builder = builder.connect_timeout(Duration::from_millis(ms));
    }
    if let Some(ms) = options.read_timeout_ms {
      builder = builder.timeout(Duration::from_millis(ms));
    }

    // Only an explicitly configured proxy is used; HTTP_PROXY and friends are ignored.
    if let Some(proxy) = &options.proxy {
      let mut reqwest_proxy =
        Proxy::all(proxy.url()).map_err(|source| HttpError::Build { source })?;
      if let Some(username) = &proxy.username {
        reqwest_proxy =
          reqwest_proxy.basic_auth(username, proxy.password.as_deref().unwrap_or_default());
      }
      builder = builder.proxy(reqwest_proxy);
    } else {
      builder = builder.no_proxy();
    }

    builder = builder.redirect(if options.follow_redirects {
      Policy::default()
    } else {
      Policy::none()
    });

    if let Some(user_agent) = &options.user_agent {
      builder = builder.user_agent(user_agent);
    }

    let client = builder
      .build()
      .map_err(|source| HttpError::Build { source })?;

    Ok(Self {
      client,
      auth: options.auth.clone(),
    })
  }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
  async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
    debug!(method = %request.method, url = %request.url, "sending request");

    let mut builder = self.client.request(request.method, request.url);

    for (name, value) in &request.headers {
      let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|_| HttpError::InvalidHeader { name: name.clone() })?;
      let header_value =
        HeaderValue::from_str(value).map_err(|_| HttpError::InvalidHeader { name: name.clone() })?;
      builder = builder.header(header_name, header_value);
    }

    builder = match &self.auth {
      Some(AuthOptions::Basic { username, password }) => {
        builder.basic_auth(username, password.as_deref())
      }
      Some(AuthOptions::Bearer { token }) => builder.bearer_auth(token),
      None => builder,
    };

    if let Some(body) = &request.body {
      builder = builder.json(body);
    }

    let response = builder.send().await?;

    let status = response.status().as_u16();
    let headers: BTreeMap<String, String> = response
      .headers()
      .iter()
      .filter_map(|(k, v)| {
        v.to_str()
          .ok()
          .map(|val| (k.as_str().to_string(), val.to_string()))
      })
      .collect();

    let body = response.text().await?;

    Ok(HttpResponse {
      status,
      headers,
      body,
    })
  }
}
