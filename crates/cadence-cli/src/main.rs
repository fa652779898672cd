//! Cadence CLI - Command-line interface for the Cadence loop driver

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check, replay, run};

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Fixed-timestep loop driver: run, replay and check loop configurations", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a demo loop against the system clock with simulated work
    Run {
        /// Path to a loop config file
        #[arg(long)]
        config: Option<String>,

        /// Update steps per second (overrides the config file)
        #[arg(long)]
        rate: Option<u32>,

        /// Idle threshold in seconds (overrides the config file)
        #[arg(long)]
        idle_threshold: Option<f64>,

        /// Quit once this much simulation time (seconds) has been stepped
        #[arg(long, default_value = "2.0")]
        duration: f64,

        /// Simulated work per callback, in milliseconds
        #[arg(long, default_value = "5")]
        work_ms: u64,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Replay a fixed sequence of clock readings and print each iteration
    Replay {
        /// Comma-separated clock readings in seconds; the first seeds the loop
        #[arg(long, value_delimiter = ',', required = true)]
        readings: Vec<f64>,

        /// Signal quit on this input poll (default: one poll per reading)
        #[arg(long)]
        quit_after: Option<usize>,

        /// Path to a loop config file
        #[arg(long)]
        config: Option<String>,

        /// Update steps per second (overrides the config file)
        #[arg(long)]
        rate: Option<u32>,

        /// Idle threshold in seconds (overrides the config file)
        #[arg(long)]
        idle_threshold: Option<f64>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Validate a loop config file
    Check {
        /// Path to config file
        config: String,
    },
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            rate,
            idle_threshold,
            duration,
            work_ms,
            format,
        } => run::run(run::RunArgs {
            config,
            rate,
            idle_threshold,
            duration,
            work_ms,
            format,
        }),
        Commands::Replay {
            readings,
            quit_after,
            config,
            rate,
            idle_threshold,
            format,
        } => replay::run(replay::ReplayArgs {
            readings,
            quit_after,
            config,
            rate,
            idle_threshold,
            format,
        }),
        Commands::Check { config } => check::run(&config),
    }
}

fn init_tracing() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already set");
    }
}
