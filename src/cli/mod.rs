pub mod app;
pub mod commands;

pub use app::Cli;

use crate::config::Config;
use crate::contacts::ContactStore;
use crate::db;
use crate::persist::global_registry;
use anyhow::Result;
use std::path::Path;

/// Open the configured store and run the parsed command against it
pub async fn run(cli: Cli, config: &Config, config_dir: &Path) -> Result<()> {
    let db_path = cli
        .database
        .unwrap_or_else(|| config.database_path(config_dir));

    let pool = db::connect(&db_path).await?;
    let store = ContactStore::open(pool, global_registry()).await?;

    commands::contacts::handle(cli.command, &store).await
}
