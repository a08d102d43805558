mod commands;
mod config;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::process;

use commands::dscr::DscrArgs;
use commands::loan::PaymentArgs;
use commands::normalize::NormalizeArgs;
use commands::project::ProjectArgs;
use config::CliConfig;

/// Loan and debt service coverage calculations for property acquisitions
#[derive(Parser)]
#[command(
    name = "rfa",
    version,
    about = "Loan and debt service coverage calculations for property acquisitions",
    long_about = "A CLI for checking whether a rental property acquisition is viable: \
                  monthly loan payment, debt service coverage ratio and its risk tier. \
                  Numeric arguments accept either ',' or '.' as decimal separator."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (overrides the config file)
    #[arg(long, global = true)]
    output: Option<OutputFormat>,

    /// Decimal places for table, CSV and minimal output
    #[arg(long, global = true)]
    decimals: Option<u32>,

    /// Path to a YAML config file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log calculation steps to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a raw numeric field the way the calculators do
    Normalize(NormalizeArgs),
    /// Monthly payment of a fixed-rate, fully amortizing loan
    Payment(PaymentArgs),
    /// Debt service coverage ratio and risk tier
    Dscr(DscrArgs),
    /// Full acquisition analysis of a stored project (JSON)
    Project(ProjectArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    logging::init_cli_logger(cli.verbose);

    let config = match CliConfig::resolve(cli.config.as_deref(), cli.output, cli.decimals) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Normalize(args) => commands::normalize::run_normalize(args),
        Commands::Payment(args) => commands::loan::run_payment(args),
        Commands::Dscr(args) => commands::dscr::run_dscr(args),
        Commands::Project(args) => commands::project::run_project(args, &config),
        Commands::Version => {
            println!("rfa {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&config, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
