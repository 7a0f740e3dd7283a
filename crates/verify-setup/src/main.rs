//! Setup verification for the stock research agent
//!
//! Runs every check in order, prints a summary and writes
//! `verification_report.json`. Exits with status 0 exactly when all critical
//! checks pass.
//!
//! ```bash
//! cargo run --bin verify-setup
//! cargo run --bin verify-setup -- --model mistral --skip-network
//! ```

mod checks;
mod report;

use anyhow::Context;
use checks::{CheckContext, all_checks, run_check};
use clap::Parser;
use colored::Colorize;
use report::Report;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use stock_research::OllamaSettings;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "verify-setup")]
#[command(about = "Verify the environment for the stock research agent", long_about = None)]
#[command(version)]
struct Args {
    /// Where to write the JSON report
    #[arg(long, default_value = "verification_report.json")]
    report: PathBuf,

    /// Repository root for the files check
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Model to test instead of OLLAMA_MODEL
    #[arg(long)]
    model: Option<String>,

    /// Skip the TCP reachability probes
    #[arg(long)]
    skip_network: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    agent_utils::load_dotenv();
    agent_utils::init_tracing("warn");

    let args = Args::parse();

    let mut ollama = OllamaSettings::from_env().context("Invalid Ollama configuration")?;
    if let Some(model) = args.model {
        ollama.model = model;
    }
    info!(model = %ollama.model, host = %ollama.host, "Starting setup verification");

    let ctx = Arc::new(CheckContext {
        root: args.root,
        ollama,
        skip_network: args.skip_network,
    });

    report::print_header();
    let mut results = Vec::new();
    for (index, check) in all_checks().into_iter().enumerate() {
        report::print_heading(index + 1, check.title());
        let result = run_check(check, Arc::clone(&ctx)).await;
        report::print_findings(&result.details);
        results.push(result);
    }

    report::print_summary(&results, &ctx.ollama.model);

    let report = Report::new(&results);
    match report.save(&args.report) {
        Ok(()) => println!(
            "\n{}",
            format!("Verification report saved to: {}", args.report.display()).cyan()
        ),
        Err(e) => {
            warn!(error = %e, "Could not save verification report");
            println!("\n{}", format!("Could not save report: {e:#}").yellow());
        }
    }

    Ok(if report.critical_passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
