mod error;
mod parse;
mod report;
mod stats;

use anyhow::Result;
use clap::Parser;
use error::ReportError;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Connectivity-test log to summarize
    log_file: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_logging();

    let args = Args::parse();

    if let Err(e) = run(&args).await {
        let code = match e.downcast_ref::<ReportError>() {
            Some(err @ ReportError::FileNotFound { .. }) => {
                println!("Error: {}", err);
                err.exit_code()
            }
            Some(err) => {
                println!("An error occurred: {}", err);
                err.exit_code()
            }
            None => {
                println!("An error occurred: {:#}", e);
                1
            }
        };
        std::process::exit(code);
    }
}

async fn run(args: &Args) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::process_log_file(&args.log_file, &mut out).await?;
    Ok(())
}

// Logs go to stderr; stdout carries only the report.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}
