//! steward server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, and serves the agreement API over HTTP.
//!
//! # One-shot reminder runs
//!
//! `steward --remind` performs a single reminder-dispatch cycle against the
//! store and exits — suitable for cron. Reminders go through the
//! notification port, which this binary stubs with a log-only
//! implementation; a real deployment would plug in a mail integration.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use chrono::Utc;
use clap::Parser;
use serde::Deserialize;
use steward_core::{
  agreement::AgreementStatus,
  lifecycle,
  reminder::{self, Notifier, RenewalNotice},
  store::AgreementStore,
};
use steward_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "steward agreement tracker")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Run one reminder-dispatch cycle and exit instead of serving HTTP.
  #[arg(long)]
  remind: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct ServerConfig {
  #[serde(default = "default_host")]
  host: String,
  #[serde(default = "default_port")]
  port: u16,
  #[serde(default = "default_db_path")]
  db_path: PathBuf,
  #[serde(default = "default_window_days")]
  renewal_window_days: u32,
}

fn default_host() -> String { "127.0.0.1".to_owned() }
fn default_port() -> u16 { 8080 }
fn default_db_path() -> PathBuf { PathBuf::from("steward.db") }
fn default_window_days() -> u32 { lifecycle::DEFAULT_RENEWAL_WINDOW_DAYS }

/// The stubbed notification port: logs instead of sending mail.
struct LogNotifier;

impl Notifier for LogNotifier {
  async fn notify(&self, recipient: &str, notice: &RenewalNotice) {
    tracing::info!(
      recipient,
      service_type = %notice.service_type,
      end_date = %notice.end_date,
      "sending renewal reminder"
    );
  }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("STEWARD"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Open SQLite store (schema is created idempotently).
  let store = SqliteStore::open(&server_cfg.db_path)
    .await
    .with_context(|| {
      format!("failed to open store at {:?}", server_cfg.db_path)
    })?;

  // Helper mode: dispatch reminders once and exit.
  if cli.remind {
    return remind_once(&store, server_cfg.renewal_window_days).await;
  }

  let app =
    steward_api::api_router(Arc::new(store), Arc::new(LogNotifier))
      .layer(TraceLayer::new_for_http());
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// One reminder cycle: due set × catch-all list through the log notifier.
async fn remind_once(store: &SqliteStore, window_days: u32) -> anyhow::Result<()> {
  let agreements = store
    .list_agreements(Some(AgreementStatus::Active))
    .await
    .context("failed to list active agreements")?;
  let due =
    lifecycle::upcoming_renewals(&agreements, Utc::now().date_naive(), window_days);
  let recipients = store.list_emails().await.context("failed to list emails")?;

  let report = reminder::dispatch(&due, &recipients, &LogNotifier).await;
  tracing::info!(
    sent = report.sent,
    warning = ?report.warning,
    "reminder run complete"
  );
  Ok(())
}
