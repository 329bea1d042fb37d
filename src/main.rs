mod config;
mod item;
mod protocol;
mod server;
mod store;
mod util;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use config::Config;
use server::Server;
use store::ItemStore;
use tracing::info;

/// In-memory shopping list HTTP service
#[derive(Parser, Debug)]
#[command(name = "shoplist", version, about)]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to listen on, overrides the config file
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on, overrides the config file
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    }
    .with_listen_overrides(args.host, args.port);

    // Initialize logging
    util::logging::init(&config.log)?;

    info!("Starting shoplist - in-memory shopping list API");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let store = Arc::new(ItemStore::new());
    for seed in &config.seed {
        store
            .seed(seed.id.clone(), seed.item())
            .with_context(|| format!("failed to seed item '{}'", seed.id))?;
    }
    info!("Seeded {} items", store.len()?);

    let server = Server::bind(&config.server_addr, store)
        .await
        .with_context(|| format!("failed to bind {}", config.server_addr))?;
    info!("Shopping List API is running on {}", server.local_addr());

    // Start server (blocking until shutdown)
    server.run().await?;

    Ok(())
}
