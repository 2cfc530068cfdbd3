//! trendspot server binary.
//!
//! Reads `trendspot.toml` (or the path given with `--config`) plus any
//! `TRENDSPOT_*` environment overrides, opens the SQLite store, makes sure
//! the bootstrap admin exists, and serves the JSON API over HTTP.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use trendspot_core::store::{AccountStore, TrendStore};
use trendspot_server::{AppState, ServerConfig};
use trendspot_store_sqlite::SqliteStore;

#[derive(Parser)]
#[command(author, version, about = "Trendspot trend curation server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "trendspot.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 8501)?
    .set_default("store_path", "trendspot.db")?
    .set_default("seed_demo_data", true)?
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("TRENDSPOT"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store_path = expand_tilde(&server_cfg.store_path);

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  store
    .ensure_bootstrap_admin()
    .await
    .context("failed to create bootstrap admin")?;

  if server_cfg.seed_demo_data {
    let seeded = store
      .seed_defaults()
      .await
      .context("failed to seed demo trends")?;
    if seeded > 0 {
      tracing::info!(count = seeded, "seeded demo trends");
    }
  }

  let app = trendspot_server::router(AppState::new(store));
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
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
