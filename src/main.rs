use anyhow::Result;
use clap::Parser;
use log::info;
use option_persist::cli::{self, Cli};
use option_persist::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_dir = Config::get_config_dir()?;
    let config = Config::load()?;

    // Initialize logger to file (truncate on each run)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(config.log_path(&config_dir))?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    info!("Starting option-persist");
    cli::run(cli, &config, &config_dir).await
}
