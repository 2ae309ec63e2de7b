use larkhook_config::{AuthOptions, HttpOptions};
use larkhook_render::Renderer;

use crate::error::TaskError;

/// Render the credential fields of client-level options.
///
/// Auth values and proxy credentials may reference secrets. Request headers are
/// rendered per request and are left untouched here. A bearer token that
/// renders to blank is rejected.
pub fn render_options(
  options: &HttpOptions,
  renderer: &dyn Renderer,
) -> Result<HttpOptions, TaskError> {
  let mut rendered = options.clone();

  rendered.auth = match &options.auth {
    Some(AuthOptions::Basic { username, password }) => Some(AuthOptions::Basic {
      username: renderer.render(username)?,
      password: password.as_deref().map(|p| renderer.render(p)).transpose()?,
    }),
    Some(AuthOptions::Bearer { token }) => {
      let token = renderer.render(token)?;
      if token.trim().is_empty() {
        return Err(TaskError::invalid_input("options.auth.token", "must not be empty"));
      }
      Some(AuthOptions::Bearer { token })
    }
    None => None,
  };

  if let Some(proxy) = rendered.proxy.as_mut() {
    proxy.username = proxy
      .username
      .as_deref()
      .map(|u| renderer.render(u))
      .transpose()?;
    proxy.password = proxy
      .password
      .as_deref()
      .map(|p| renderer.render(p))
      .transpose()?;
  }

  Ok(rendered)
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use super::*;
  use larkhook_config::{ProxyOptions, RunContextDef};
  use larkhook_render::{RenderError, StaticSecretProvider, TemplateRenderer};

  fn renderer() -> TemplateRenderer {
    let secrets: StaticSecretProvider = [("TOKEN", "t-123"), ("PROXY_PASS", "hunter2"), ("BLANK", "")]
      .into_iter()
      .collect();
    TemplateRenderer::new(&RunContextDef::default(), Arc::new(secrets))
  }

  #[test]
  fn test_render_bearer_token() {
    let options = HttpOptions {
      auth: Some(AuthOptions::Bearer {
        token: "{{ secret('TOKEN') }}".to_string(),
      }),
      ..HttpOptions::default()
    };

    let rendered = render_options(&options, &renderer()).unwrap();
    assert_eq!(
      rendered.auth,
      Some(AuthOptions::Bearer {
        token: "t-123".to_string()
      })
    );
  }

  #[test]
  fn test_render_proxy_credentials() {
    let options = HttpOptions {
      proxy: Some(ProxyOptions {
        address: "10.0.0.1".to_string(),
        port: 3128,
        username: Some("svc".to_string()),
        password: Some("{{ secret('PROXY_PASS') }}".to_string()),
      }),
      ..HttpOptions::default()
    };

    let rendered = render_options(&options, &renderer()).unwrap();
    let proxy = rendered.proxy.unwrap();
    assert_eq!(proxy.username.as_deref(), Some("svc"));
    assert_eq!(proxy.password.as_deref(), Some("hunter2"));
  }

  #[test]
  fn test_headers_left_as_templates() {
    let mut options = HttpOptions::default();
    options
      .headers
      .insert("X-Flow".to_string(), "{{ flow.id }}".to_string());

    let rendered = render_options(&options, &renderer()).unwrap();
    assert_eq!(rendered.headers["X-Flow"], "{{ flow.id }}");
  }

  #[test]
  fn test_missing_secret_fails() {
    let options = HttpOptions {
      auth: Some(AuthOptions::Basic {
        username: "bot".to_string(),
        password: Some("{{ secret('NOPE') }}".to_string()),
      }),
      ..HttpOptions::default()
    };

    let err = render_options(&options, &renderer()).unwrap_err();
    assert!(matches!(
      err,
      TaskError::Render(RenderError::SecretNotFound { .. })
    ));
  }

  #[test]
  fn test_bearer_token_rendering_to_blank_fails() {
    let options = HttpOptions {
      auth: Some(AuthOptions::Bearer {
        token: "{{ secret('BLANK') }}".to_string(),
      }),
      ..HttpOptions::default()
    };

    let err = render_options(&options, &renderer()).unwrap_err();
    assert!(matches!(
      err,
      TaskError::InvalidInput { ref field, .. } if field == "options.auth.token"
    ));
  }

  #[test]
  fn test_literal_empty_bearer_token_fails() {
    let options = HttpOptions {
      auth: Some(AuthOptions::Bearer {
        token: String::new(),
      }),
      ..HttpOptions::default()
    };

    assert!(render_options(&options, &renderer()).is_err());
  }
}
