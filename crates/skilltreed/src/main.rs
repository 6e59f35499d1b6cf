//! SkillTree daemon - learning platform progression backend.
//!
//! Serves the account/course/XP API over HTTP, backed by the SQLite
//! award ledger in `skilltree_common`.

use anyhow::Result;
use clap::Parser;
use skilltree_common::LedgerStore;
use skilltreed::{catalog, config::DaemonConfig, server, server::AppState};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "skilltreed", version, about = "Learning platform progression daemon")]
struct Cli {
    /// Config file path (defaults to /etc/skilltree/skilltreed.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the data directory from the config
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Override the listen address from the config
    #[arg(long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = DaemonConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(listen) = cli.listen {
        config.listen_addr = listen;
    }

    info!("skilltreed v{} starting", env!("CARGO_PKG_VERSION"));

    let store = LedgerStore::open(&config.db_path())?;
    store.seed_courses(&catalog::default_catalog())?;

    server::run(AppState::new(store), &config.listen_addr).await
}
