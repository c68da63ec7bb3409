use super::commands::contacts::ContactsSubcommands;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "option-persist")]
#[command(about = "Demo contact store with optional columns backed by SQLite")]
pub struct Cli {
    /// Database file to use instead of the configured one
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: ContactsSubcommands,
}
