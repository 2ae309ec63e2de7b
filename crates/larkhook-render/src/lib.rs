//! Larkhook Render
//!
//! Template rendering for task definitions. Every templated field of a task
//! (`url`, `payload`, option headers) goes through a [`Renderer`] before use.
//!
//! The default implementation, [`TemplateRenderer`], uses minijinja against the
//! run context and exposes a `secret(key)` function backed by a
//! [`SecretProvider`]:
//!
//! ```text
//! {{ secret('LARK_WEBHOOK') }}
//! Failure alert for flow {{ flow.namespace }}.{{ flow.id }} with ID {{ execution.id }}
//! ```

mod error;
mod renderer;
mod secret;

pub use error::RenderError;
pub use renderer::{Renderer, TemplateRenderer};
pub use secret::{ChainSecretProvider, EnvSecretProvider, SecretProvider, StaticSecretProvider};
