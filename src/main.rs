mod predict;
mod tle;
mod web;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::fs;
use std::process::ExitCode;

use crate::predict::{PredictRequest, Predictor, Sgp4Propagator};
use crate::web::api::error::ErrorResponse;
use crate::web::Config;

#[derive(Parser)]
#[command(name = "debris-triage")]
#[command(about = "Satellite/debris closest-approach screening")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an element set file
    Validate { tle: String },
    /// Screen a satellite against a debris object
    Predict {
        #[arg(long)]
        satellite: String,
        #[arg(long)]
        debris: String,
        #[arg(long)]
        horizon_minutes: Option<u32>,
        #[arg(long)]
        step_seconds: Option<u32>,
        /// Sampling start (RFC3339), defaults to now
        #[arg(long)]
        epoch: Option<DateTime<Utc>>,
        #[arg(long)]
        config: Option<String>,
    },
    /// Serve the HTTP API
    Serve {
        #[arg(long)]
        config: Option<String>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { tle } => validate(&tle),
        Commands::Predict {
            satellite,
            debris,
            horizon_minutes,
            step_seconds,
            epoch,
            config,
        } => {
            let Some(config) = load_config(config.as_deref()) else {
                return ExitCode::FAILURE;
            };
            let request = match (fs::read_to_string(&satellite), fs::read_to_string(&debris)) {
                (Ok(satellite_tle), Ok(debris_tle)) => PredictRequest {
                    satellite_tle,
                    debris_tle,
                    horizon_minutes: horizon_minutes.unwrap_or(config.prediction.horizon_minutes),
                    step_seconds: step_seconds.unwrap_or(config.prediction.step_seconds),
                },
                (Err(e), _) | (_, Err(e)) => {
                    eprintln!("Error reading file: {}", e);
                    return ExitCode::FAILURE;
                }
            };
            predict(config, &request, epoch.unwrap_or_else(Utc::now))
        }
        Commands::Serve { config } => match load_config(config.as_deref()) {
            Some(config) => serve(config),
            None => ExitCode::FAILURE,
        },
    }
}

fn load_config(path: Option<&str>) -> Option<Config> {
    match Config::load(path) {
        Ok(config) => Some(config),
        Err(e) => {
            eprintln!("Config error: {}", e);
            None
        }
    }
}

fn validate(path: &str) -> ExitCode {
    let text = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let set = match tle::parse_and_validate(&text) {
        Ok(set) => set,
        Err(e) => {
            eprintln!("Invalid element set: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match set.mean_motion() {
        Ok(mean_motion) => {
            let regime = predict::Policy::default().classify(mean_motion);
            println!("Element set is valid");
            println!("  name:        {}", set.name);
            println!("  catalog:     {}", set.catalog_number());
            println!("  mean motion: {:.8} rev/day", mean_motion);
            println!("  regime:      {}", regime);
            for (number, line) in [(1, &set.line1), (2, &set.line2)] {
                let expected = tle::checksum(line);
                let status = if line.ends_with(char::from(b'0' + expected)) {
                    "ok"
                } else {
                    "mismatch"
                };
                println!("  checksum {}:  {} ({})", number, expected, status);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Invalid element set: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn predict(config: Config, request: &PredictRequest, epoch: DateTime<Utc>) -> ExitCode {
    let predictor = Predictor::new(Sgp4Propagator, config.policy);

    let (json, code) = match predictor.predict(request, epoch) {
        Ok(result) => (serde_json::to_string_pretty(&result), ExitCode::SUCCESS),
        Err(e) => {
            let body = ErrorResponse::with_message("prediction_failed", &e.to_string());
            (serde_json::to_string_pretty(&body), ExitCode::FAILURE)
        }
    };

    match json {
        Ok(json) => {
            println!("{}", json);
            code
        }
        Err(e) => {
            eprintln!("Serialization error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn serve(config: Config) -> ExitCode {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(web::run_server(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
