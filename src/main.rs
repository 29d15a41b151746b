//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `github_crawler` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Writing the JSON results to stdout or a file
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use github_crawler::initialization::init_logger_with;
use github_crawler::{run_search, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env (current directory first, then
    // next to the executable)
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let config = Config::parse();

    init_logger_with(config.log_level.into(), config.log_format)
        .context("Failed to initialize logger")?;

    let output = config.output.clone();
    let pretty = config.pretty;

    match run_search(config).await {
        Ok(report) => {
            let json = report
                .to_json(pretty)
                .context("Failed to serialize results")?;
            match output {
                Some(path) => {
                    tokio::fs::write(&path, format!("{}\n", json))
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    log::info!("Results saved in {}", path.display());
                }
                None => println!("{}", json),
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("github_crawler error: {:#}", e);
            process::exit(1);
        }
    }
}
