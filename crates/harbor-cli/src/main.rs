//! Harbor CLI - Command-line interface for the Harbor container registry API.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "harbor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if matches!(cli.command, Commands::Version) {
        println!("harbor {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let client = cli.connection.client()?;
    match cli.command {
        Commands::Project(args) => commands::project::run(&client, args).await,
        Commands::Member(args) => commands::member::run(&client, args).await,
        Commands::Metadata(args) => commands::metadata::run(&client, args).await,
        Commands::Quota(args) => commands::quota::run(&client, args).await,
        Commands::Retention(args) => commands::retention::run(&client, args).await,
        Commands::Health => commands::system::health(&client).await,
        Commands::Ping => commands::system::ping(&client).await,
        Commands::Version => Ok(()),
    }
}
