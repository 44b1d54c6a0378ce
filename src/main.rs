use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing - only show logs with --verbose
    let filter = if cli.verbose {
        EnvFilter::new("marketpulse=debug")
    } else {
        EnvFilter::new("marketpulse=warn")
    };

    // stdout carries the exported report
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Analyze(args) => cli::analyze::execute(args).await,
        Commands::Parse(args) => cli::parse::execute(args),
        Commands::Classify(args) => cli::classify::execute(args),
        Commands::Render(args) => cli::render::execute(args),
        Commands::Sample(args) => cli::sample::execute(args),
        Commands::Schema => cli::schema::execute(),
    }
}
