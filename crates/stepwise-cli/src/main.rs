//! Stepwise CLI entry point.
//!
//! Binary name: `stepw`
//!
//! Parses CLI arguments, wires the Gemini provider and JSON store into
//! the roadmap service, then dispatches to the appropriate command
//! handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,stepwise=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "stepw", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init().await?;

    match cli.command {
        Commands::Generate { topic } => {
            cli::roadmap::generate(&state, topic, cli.json).await?;
        }

        Commands::Customize { roadmap, instruction } => {
            cli::roadmap::customize(&state, &roadmap, instruction, cli.json).await?;
        }

        Commands::List => {
            cli::roadmap::list(&state, cli.json).await?;
        }

        Commands::Show { roadmap } => {
            cli::roadmap::show(&state, &roadmap, cli.json).await?;
        }

        Commands::Toggle { roadmap, step } => {
            cli::roadmap::toggle(&state, &roadmap, &step, cli.json).await?;
        }

        Commands::Delete { roadmap, force } => {
            cli::roadmap::delete(&state, &roadmap, force, cli.json).await?;
        }

        Commands::Export { roadmap, output } => {
            cli::roadmap::export(&state, &roadmap, output, cli.json).await?;
        }

        Commands::Status => {
            cli::status::status(&state, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
