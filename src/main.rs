//! Examsched CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use examsched::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init(args) => examsched::cli::commands::init::execute(args, cli.json).await,
        Commands::Preview(args) => examsched::cli::commands::preview::execute(args, cli.json).await,
        Commands::Schedule(args) => {
            examsched::cli::commands::schedule::execute(args, cli.json).await
        }
        Commands::Runs(args) => examsched::cli::commands::runs::execute(args, cli.json).await,
    };

    if let Err(err) = result {
        examsched::cli::handle_error(err, cli.json);
    }
}
