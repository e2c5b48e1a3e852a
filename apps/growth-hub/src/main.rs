//! # Growth Hub
//!
//! Entry point: parse arguments, set up logging, dispatch.

use clap::Parser;
use growth_hub::AppError;
use growth_hub::cli::{Cli, Command, cmd_evaluate, cmd_grid, cmd_routes, cmd_team, run_server};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so `--json` output on stdout stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let output = match cli.command {
        Command::Serve(args) => return run_server(args.into()).await,
        Command::Grid { input } => cmd_grid(input.as_deref(), cli.json)?,
        Command::Evaluate {
            ratings,
            output,
            gate_next,
        } => cmd_evaluate(&ratings, &output, gate_next, cli.json)?,
        Command::Team => cmd_team(cli.json)?,
        Command::Routes => cmd_routes(cli.json)?,
    };
    println!("{output}");
    Ok(())
}
