//! Lark (Feishu) incoming-webhook task.
//!
//! A custom bot in a Lark group chat exposes a webhook URL; POSTing a JSON
//! message to it pushes the message into the chat. Supported message types
//! include `text`, `post` (rich text), `image`, `share_chat` and `interactive`
//! cards. The task does not inspect the message: it only checks that the
//! rendered payload is well-formed JSON.
//!
//! Two entry points:
//! - [`send_webhook`]: render, parse and POST with an injected renderer and client
//! - [`LarkIncomingWebhook::run`]: validate, build a client from the task's HTTP
//!   options for this invocation only, then call [`send_webhook`]

mod context;
mod error;
mod options;
mod webhook;

pub use context::RunContext;
pub use error::TaskError;
pub use options::render_options;
pub use webhook::{LarkIncomingWebhook, send_webhook};
