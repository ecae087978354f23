mod cli;
mod commands;
mod config;
mod utils;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::{
    handle_browse_command, handle_config_command, handle_genres_command, handle_like_command,
    handle_show_command, handle_wishlist_command,
};
use crate::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose when both are given.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::get_config_path);

    if let Commands::Config { command } = cli.command {
        return handle_config_command(command, &config_path).await;
    }

    let config = Config::load_from(&config_path).await?;
    tracing::debug!("Loaded configuration from {}", config_path.display());

    match cli.command {
        Commands::Browse(args) => handle_browse_command(args, &config).await,
        Commands::Genres => handle_genres_command(&config).await,
        Commands::Show { id } => handle_show_command(id, &config).await,
        Commands::Like { id } => handle_like_command(id, &config).await,
        Commands::Wishlist => handle_wishlist_command(&config).await,
        Commands::Config { .. } => Ok(()),
    }
}
