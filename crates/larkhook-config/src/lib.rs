//! Larkhook Config
//!
//! Serializable definitions for a Lark (Feishu) incoming-webhook task, the HTTP
//! options applied to its client, and the run context its templates render
//! against. These are the on-disk shapes, before any template is rendered.
//!
//! Definitions are loaded from JSON files:
//!
//! ```json
//! {
//!   "url": "{{ secret('LARK_WEBHOOK') }}",
//!   "payload": "{\"msg_type\":\"text\",\"content\":{\"text\":\"Failure in {{ flow.id }}\"}}",
//!   "options": { "read_timeout_ms": 5000 }
//! }
//! ```

mod context;
mod error;
mod load;
mod options;
mod task;

pub use context::{ExecutionDef, FlowDef, RunContextDef};
pub use error::ConfigError;
pub use load::{load_context, load_task};
pub use options::{AuthOptions, HttpOptions, ProxyOptions};
pub use task::LarkWebhookDef;
