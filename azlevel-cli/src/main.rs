//! azlevel command-line entry point

use anyhow::Result;
use azlevel_cli::commands::Commands;
use clap::Parser;

/// Heuristic A-Z reading level classifier for book manuscripts
#[derive(Debug, Parser)]
#[command(name = "azlevel", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Classify(args) => args.execute(),
        Commands::List { subcommand } => subcommand.execute(),
        Commands::Validate(args) => args.execute(),
        Commands::GenerateConfig(args) => args.execute(),
    }
}
