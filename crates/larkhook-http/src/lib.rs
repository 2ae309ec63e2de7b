//! HTTP client seam for webhook delivery.
//!
//! Tasks talk to the network through the [`HttpClient`] trait so the transport
//! can be swapped for a stub in tests. [`ReqwestHttpClient`] is the real
//! implementation, configured from a task's [`HttpOptions`](larkhook_config::HttpOptions).

mod client;
mod error;
mod types;

pub use client::{HttpClient, ReqwestHttpClient};
pub use error::HttpError;
pub use reqwest::Method;
pub use types::{HttpRequest, HttpResponse};
pub use url::Url;
