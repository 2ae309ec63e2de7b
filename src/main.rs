use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use larkhook_config::{LarkWebhookDef, RunContextDef, load_context, load_task};
use larkhook_render::{ChainSecretProvider, EnvSecretProvider, StaticSecretProvider};
use larkhook_task::{LarkIncomingWebhook, RunContext};

/// larkhook - send Lark (Feishu) incoming-webhook notifications
#[derive(Parser)]
#[command(name = "larkhook")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Log at debug level (payload and response body)
  #[arg(long, short, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Run a task definition file
  Run {
    /// Path to the task definition (JSON)
    task_file: PathBuf,

    #[command(flatten)]
    context: ContextArgs,
  },

  /// Send a message without a task file
  Send {
    /// Webhook URL template
    #[arg(long)]
    url: String,

    /// Payload template; read from stdin when omitted
    #[arg(long)]
    payload: Option<String>,

    /// Fail when the webhook answers with a non-2xx status
    #[arg(long)]
    fail_on_error_status: bool,

    #[command(flatten)]
    context: ContextArgs,
  },
}

#[derive(Args)]
struct ContextArgs {
  /// Path to a run context file (JSON) with flow, execution and vars
  #[arg(long)]
  context: Option<PathBuf>,

  /// Secret available to `secret()`, as KEY=VALUE. Falls back to SECRET_<KEY> env vars.
  #[arg(long = "secret", value_parser = parse_secret)]
  secrets: Vec<(String, String)>,
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  match cli.command {
    Some(Commands::Run { task_file, context }) => {
      run(task_file, context)?;
    }
    Some(Commands::Send {
      url,
      payload,
      fail_on_error_status,
      context,
    }) => {
      send(url, payload, fail_on_error_status, context)?;
    }
    None => {
      println!("larkhook - use --help to see available commands");
    }
  }

  Ok(())
}

fn init_tracing(verbose: bool) {
  let filter = if verbose {
    EnvFilter::new("info,larkhook_task=debug,larkhook_http=debug,larkhook_render=debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .init();
}

fn run(task_file: PathBuf, context: ContextArgs) -> Result<()> {
  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async {
    let def = load_task(&task_file)
      .await
      .with_context(|| format!("failed to load task: {}", task_file.display()))?;
    execute(def, context).await
  })
}

fn send(
  url: String,
  payload: Option<String>,
  fail_on_error_status: bool,
  context: ContextArgs,
) -> Result<()> {
  let payload = match payload {
    Some(p) => Some(p),
    None => read_payload_from_stdin()?,
  };

  let mut def = LarkWebhookDef::new(url, payload);
  def.fail_on_error_status = fail_on_error_status;

  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(execute(def, context))
}

async fn execute(def: LarkWebhookDef, args: ContextArgs) -> Result<()> {
  let context_def = match &args.context {
    Some(path) => load_context(path)
      .await
      .with_context(|| format!("failed to load context: {}", path.display()))?,
    None => RunContextDef::default(),
  };

  let cli_secrets: StaticSecretProvider = args.secrets.into_iter().collect();
  let secrets = ChainSecretProvider::new()
    .with(cli_secrets)
    .with(EnvSecretProvider::new());

  let ctx = RunContext::new(&context_def, Arc::new(secrets));

  LarkIncomingWebhook::new(def)
    .run(&ctx)
    .await
    .context("lark webhook task failed")
}

fn read_payload_from_stdin() -> Result<Option<String>> {
  use std::io::IsTerminal;

  if io::stdin().is_terminal() {
    return Ok(None);
  }

  let mut input = String::new();
  io::stdin()
    .read_to_string(&mut input)
    .context("failed to read payload from stdin")?;

  if input.trim().is_empty() {
    Ok(None)
  } else {
    Ok(Some(input))
  }
}

fn parse_secret(s: &str) -> Result<(String, String), String> {
  let (key, value) = s
    .split_once('=')
    .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
  if key.is_empty() {
    return Err("secret key must not be empty".to_string());
  }
  Ok((key.to_string(), value.to_string()))
}
