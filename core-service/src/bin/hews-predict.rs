//! Offline scoring: run one prediction against a model artifact and print the
//! JSON report.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use hews_core::{respond, HewsContext, PredictRequest};

#[derive(Parser, Debug)]
#[command(name = "hews-predict")]
#[command(about = "Score one (year, sector, month, conflict type) against a HEWS model artifact", long_about = None)]
#[command(version)]
struct Args {
    /// Model artifact manifest (model.json)
    model: PathBuf,

    /// Forecast year
    #[arg(allow_negative_numbers = true)]
    year: f64,

    /// Sector name, e.g. "Teknaf Border"
    sector: String,

    /// Three-letter month, e.g. "Jan"
    month: String,

    /// Conflict category, e.g. "State-based Action"
    conflict_type: String,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let ctx = match HewsContext::from_artifact(&args.model) {
        Ok(ctx) => ctx,
        Err(e) => {
            log::error!("Failed to load model artifact: {}", e);
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let request = PredictRequest::new(args.year, &args.sector, &args.month, &args.conflict_type);
    let response = respond(&ctx, &request);

    match serde_json::to_string_pretty(&response) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    }

    if response.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
