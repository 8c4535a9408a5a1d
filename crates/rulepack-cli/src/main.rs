mod config;
mod service;

use clap::Parser;
use config::Config;
use service::AggregateService;
use std::process::ExitCode;
use tracing::error;

/// Aggregates project rule and mode documents into a merged rules file and a modes JSON file.
#[derive(Parser, Debug)]
#[command(name = "rulepack", version, about)]
struct Cli {
    /// Print the effective layered configuration as TOML and exit.
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Exits on --help, --version or unknown arguments before anything is read or written
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    if cli.print_config {
        return match config.to_toml_string() {
            Ok(text) => {
                print!("{text}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Failed to render configuration: {e:#}");
                ExitCode::FAILURE
            }
        };
    }

    if let Err(e) = rulepack_logging::init_logging(&config.logging.level, config.logging.format) {
        eprintln!("Failed to initialize logging: {e:#}");
        return ExitCode::FAILURE;
    }

    match AggregateService::new(config).run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
