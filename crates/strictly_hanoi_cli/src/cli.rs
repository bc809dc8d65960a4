//! Command-line interface for strictly_hanoi.

use clap::{Parser, Subcommand};

/// Strictly Hanoi - Tower of Hanoi in the terminal
#[derive(Parser, Debug)]
#[command(name = "strictly_hanoi")]
#[command(about = "Tower of Hanoi with a round clock and move scoring", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./strictly_hanoi.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Log filter used when RUST_LOG is not set (e.g. "debug", "strictly_hanoi=trace")
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a round interactively
    Play {
        /// Number of disks
        #[arg(short, long)]
        disks: Option<usize>,

        /// Time limit in seconds (0 plays without a clock)
        #[arg(short, long)]
        time_limit: Option<u64>,
    },

    /// Print the optimal solution
    Solve {
        /// Number of disks
        #[arg(short, long)]
        disks: Option<usize>,

        /// Print the moves as JSON
        #[arg(long)]
        json: bool,
    },
}
