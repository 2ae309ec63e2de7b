//! Shared helpers: a recording HTTP client, a log capture layer, and a one-shot server.

#![allow(dead_code)]

use std::fmt;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use larkhook_http::{HttpClient, HttpError, HttpRequest, HttpResponse, Url};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// HTTP client that records every request and answers with a fixed response.
pub struct StubClient {
  response: HttpResponse,
  requests: Mutex<Vec<HttpRequest>>,
}

impl StubClient {
  pub fn new(status: u16, body: &str) -> Self {
    Self {
      response: HttpResponse::new(status, body),
      requests: Mutex::new(Vec::new()),
    }
  }

  pub fn requests(&self) -> Vec<HttpRequest> {
    self.requests.lock().unwrap().clone()
  }
}

#[async_trait]
impl HttpClient for StubClient {
  async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
    self.requests.lock().unwrap().push(request);
    Ok(self.response.clone())
  }
}

/// Log events captured as (level, message).
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<(Level, String)>>>);

impl CapturedLogs {
  pub fn contains(&self, level: Level, message: &str) -> bool {
    self
      .0
      .lock()
      .unwrap()
      .iter()
      .any(|(l, m)| *l == level && m == message)
  }
}

impl<S: Subscriber> Layer<S> for CapturedLogs {
  fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
    let mut visitor = MessageVisitor(String::new());
    event.record(&mut visitor);
    self
      .0
      .lock()
      .unwrap()
      .push((*event.metadata().level(), visitor.0));
  }
}

struct MessageVisitor(String);

impl Visit for MessageVisitor {
  fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
    if field.name() == "message" {
      self.0 = format!("{:?}", value);
    }
  }
}

/// Install a capturing subscriber for the current thread.
pub fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
  use tracing_subscriber::layer::SubscriberExt;

  let logs = CapturedLogs::default();
  let subscriber = tracing_subscriber::registry().with(logs.clone());
  let guard = tracing::subscriber::set_default(subscriber);
  (logs, guard)
}

/// Accept one connection, return the raw request, answer with `status` and `body`.
pub async fn serve_once(status: u16, body: &'static str) -> (Url, JoinHandle<String>) {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();

  let handle = tokio::spawn(async move {
    let (mut socket, _) = listener.accept().await.unwrap();
    let request = read_request(&mut socket).await;

    let response = format!(
      "HTTP/1.1 {} Status\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
      status,
      body.len(),
      body
    );
    socket.write_all(response.as_bytes()).await.unwrap();
    socket.shutdown().await.ok();
    request
  });

  let url = Url::parse(&format!("http://{}/open-apis/bot/v2/hook/abc", addr)).unwrap();
  (url, handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
  let mut data = Vec::new();
  let mut buf = [0u8; 4096];

  loop {
    let n = socket.read(&mut buf).await.unwrap();
    if n == 0 {
      break;
    }
    data.extend_from_slice(&buf[..n]);

    let text = String::from_utf8_lossy(&data);
    if let Some(header_end) = text.find("\r\n\r\n") {
      let content_length = text[..header_end]
        .lines()
        .find_map(|line| {
          let (name, value) = line.split_once(':')?;
          name
            .eq_ignore_ascii_case("content-length")
            .then(|| value.trim().parse::<usize>().ok())
            .flatten()
        })
        .unwrap_or(0);
      if data.len() >= header_end + 4 + content_length {
        break;
      }
    }
  }

  String::from_utf8(data).unwrap()
}

/// Body of a raw HTTP request, parsed as JSON.
pub fn request_json(raw: &str) -> serde_json::Value {
  let body = raw.split("\r\n\r\n").nth(1).unwrap_or_default();
  serde_json::from_str(body).unwrap()
}
