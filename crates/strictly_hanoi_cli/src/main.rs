//! Strictly Hanoi - terminal Tower of Hanoi

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use strictly_hanoi::solve;
use strictly_hanoi_cli::{Cli, Command, HanoiConfig, Session};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = HanoiConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Play { disks, time_limit } => {
            let config = config.with_overrides(disks, time_limit, cli.log_level)?;
            init_tracing(config.log_level());
            run_play(config)
        }
        Command::Solve { disks, json } => {
            let config = config.with_overrides(disks, None, cli.log_level)?;
            init_tracing(config.log_level());
            run_solve(*config.disks(), json)
        }
    }
}

/// Logs go to stderr so they never interleave with the board on stdout.
fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Run an interactive round on stdin/stdout
#[instrument(skip(config))]
fn run_play(config: HanoiConfig) -> Result<()> {
    info!(disks = config.disks(), time_limit_secs = config.time_limit_secs(), "Starting play session");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut session = Session::new(config);
    session.run(stdin.lock(), &mut stdout)
}

/// Print the optimal solution
#[instrument]
fn run_solve(disks: usize, json: bool) -> Result<()> {
    let steps = solve(disks)?;
    info!(disks, steps = steps.len(), "Solution computed");

    if json {
        println!("{}", serde_json::to_string_pretty(&steps)?);
    } else {
        for step in &steps {
            println!("{:>4}. {}", step.step, step);
        }
    }
    Ok(())
}
