//! WeTalk server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, selects the configured token verifier, and
//! serves the forum API over HTTP.

mod settings;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use wetalk_auth::{AnyVerifier, JwksVerifier, LocalHs256Verifier};
use wetalk_store_sqlite::SqliteStore;

use crate::settings::{AuthSettings, ServerConfig};

#[derive(Parser)]
#[command(author, version, about = "WeTalk forum server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
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
    .set_default("host", "127.0.0.1")?
    .set_default("port", 5000)?
    .set_default("store_path", "wetalk.db")?
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("WETALK").separator("__"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);

  // Open SQLite store.
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  // Select the one active token verifier.
  let verifier = build_verifier(&server_cfg.auth)?;

  let app = axum::Router::new()
    .nest("/api", wetalk_api::api_router(Arc::new(store), Arc::new(verifier)))
    .layer(TraceLayer::new_for_http());

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Construct the verifier named by `settings`.
fn build_verifier(settings: &AuthSettings) -> anyhow::Result<AnyVerifier> {
  match settings {
    AuthSettings::Local { secret } => {
      tracing::info!("using local shared-secret token verification");
      Ok(AnyVerifier::Local(LocalHs256Verifier::new(secret)))
    }
    AuthSettings::Federated { issuer, jwks_path } => {
      tracing::info!(%issuer, "using federated JWKS token verification");
      let jwks_json = std::fs::read_to_string(jwks_path)
        .with_context(|| format!("failed to read JWKS at {jwks_path:?}"))?;
      let verifier = JwksVerifier::from_json(issuer, &jwks_json)
        .context("failed to parse JWKS document")?;
      Ok(AnyVerifier::Federated(verifier))
    }
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
