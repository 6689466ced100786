mod cli;

use clap::{Parser, Subcommand};
use cli::request::{RequestArgs, Runtime};
use sherpa_core::RequestTransformer;
use sherpa_core::conf::{SherpaConfig, load_config};
use sherpa_core::logging::init_logging;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "sherpa",
    version,
    about = "Sherpa: turn runtime-native HTTP requests into canonical requests"
)]
struct Cli {
    /// Path to a sherpa.toml config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize one request and print the canonical request as JSON
    Normalize {
        #[command(flatten)]
        request: RequestArgs,

        #[arg(long, value_enum, default_value_t = Runtime::Streaming)]
        runtime: Runtime,
    },

    /// Normalize one request through both runtimes and check they agree
    Compare {
        #[command(flatten)]
        request: RequestArgs,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("config error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => SherpaConfig::default(),
    };

    init_logging(&config.logging);
    let transformer = RequestTransformer::new(config.transform);

    let outcome = match cli.command {
        Command::Normalize { request, runtime } => {
            cli::normalize::run(&transformer, &request, runtime).map(|_| true)
        }
        Command::Compare { request } => cli::compare::run(&transformer, &request),
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
