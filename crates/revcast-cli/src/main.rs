mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::cardinality::CardinalityArgs;
use commands::simulate::RunArgs;

/// Revenue plan search and profit forecasting
#[derive(Parser)]
#[command(
    name = "revcast",
    version,
    about = "Revenue plan search and profit forecasting",
    long_about = "Forecasts net profit over a monthly horizon by combining amortized \
                  deal commissions with immediately recognized coaching revenue, and \
                  searches candidate monthly plans for ones that clear a profit target. \
                  Supports a greedy single forecast, exhaustive enumeration, and \
                  seeded stochastic sampling."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Single best-effort forecast from the greedy planner
    Greedy(RunArgs),
    /// Enumerate every deal/coaching combination in the configuration
    Exhaustive(RunArgs),
    /// Stochastic batched search over the candidate space
    Sample(RunArgs),
    /// Estimate a strategy's candidate count without running it
    Cardinality(CardinalityArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Greedy(args) => commands::simulate::run_greedy(args),
        Commands::Exhaustive(args) => commands::simulate::run_exhaustive(args),
        Commands::Sample(args) => commands::simulate::run_sample(args),
        Commands::Cardinality(args) => commands::cardinality::run_cardinality(args),
        Commands::Version => {
            println!("revcast {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
