use clap::Parser;
use dotenvy::dotenv;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use spikesync::command::{self, Cli, Command};
use spikesync::config::SyncConfig;

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = SyncConfig::from_env();
    debug!("Configuration: {:?}", config);

    match cli.command {
        Command::Inspect(args) => command::inspect(args).await,
        Command::Align(args) => command::align_segment(args, config).await,
    }
}
