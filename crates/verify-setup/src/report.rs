//! Terminal summary and the persisted JSON report

use crate::checks::{CheckResult, Finding, Mark};
use anyhow::Context;
use chrono::Local;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::path::Path;

/// Overall verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Readiness {
    AllPassed,
    BasicReady,
    Incomplete,
}

impl Readiness {
    pub fn of(results: &[CheckResult]) -> Self {
        if results.iter().all(|r| r.passed) {
            Readiness::AllPassed
        } else if critical_passed(results) {
            Readiness::BasicReady
        } else {
            Readiness::Incomplete
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Readiness::AllPassed => "ALL CHECKS PASSED - READY TO USE",
            Readiness::BasicReady => "BASIC FUNCTIONALITY READY",
            Readiness::Incomplete => "SETUP INCOMPLETE",
        }
    }
}

/// True when every critical check passed
pub fn critical_passed(results: &[CheckResult]) -> bool {
    results.iter().filter(|r| r.critical).all(|r| r.passed)
}

/// What to do about each failed check; the flag marks critical ones
pub fn recommendations(results: &[CheckResult], model: &str) -> Vec<(bool, String)> {
    results
        .iter()
        .filter(|r| !r.passed)
        .filter_map(|r| {
            let advice = match r.name {
                "toolchain" => "Install Rust 1.85 or newer: rustup update stable".to_string(),
                "dependencies" => "Install cargo via rustup and Ollama via \
                                   curl -fsSL https://ollama.com/install.sh | sh"
                    .to_string(),
                "ollama" => "Start the Ollama service: ollama serve".to_string(),
                "yahoo_finance" => "Check network connectivity for Yahoo Finance".to_string(),
                "model" => format!("Download the model: ollama pull {model}"),
                "files" => "Missing required files: run from the repository root or pass --root"
                    .to_string(),
                "network" => "Check network connectivity and firewall settings".to_string(),
                "integration" => {
                    "Run `research-agent ask \"Analyze AAPL\"` to see the full error".to_string()
                }
                _ => return None,
            };
            Some((r.critical, advice))
        })
        .collect()
}

pub fn print_header() {
    let rule = "=".repeat(50);
    println!("{}", rule.cyan().bold());
    println!("{}", "  Stock Research Agent Setup Verification".cyan().bold());
    println!("{}", rule.cyan().bold());
}

pub fn print_heading(index: usize, title: &str) {
    println!("\n{}", format!("{index}. {title}").blue().bold());
}

pub fn print_findings(details: &[Finding]) {
    for finding in details {
        let line = match finding.status {
            Mark::Ok => format!("   ✓ {}", finding.message.green()),
            Mark::Warn => format!("   ⚠ {}", finding.message.yellow()),
            Mark::Fail => format!("   ✗ {}", finding.message.red()),
        };
        println!("{line}");
    }
}

fn summary_table(results: &[CheckResult]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Check", "Critical", "Status"]);

    for result in results {
        let status = if result.passed {
            Cell::new("PASS").fg(Color::Green)
        } else if result.critical {
            Cell::new("FAIL").fg(Color::Red)
        } else {
            Cell::new("FAIL").fg(Color::Yellow)
        };
        table.add_row(vec![
            Cell::new(result.name),
            Cell::new(if result.critical { "yes" } else { "no" }),
            status,
        ]);
    }
    table
}

pub fn print_summary(results: &[CheckResult], model: &str) {
    println!("\n{}", "VERIFICATION SUMMARY".cyan().bold());
    println!("{}", summary_table(results));
    println!();

    let readiness = Readiness::of(results);
    match readiness {
        Readiness::AllPassed => {
            println!("{}", readiness.label().green().bold());
            println!("\n{}", "To start the application:".cyan());
            println!("   cargo run --release --bin research-agent");
            println!("\n{}", "Then open the web interface at:".cyan());
            println!("   http://localhost:7860");
        }
        Readiness::BasicReady => {
            println!("{}", readiness.label().yellow().bold());
            println!("{}", "Some optional features may not work properly".yellow());
        }
        Readiness::Incomplete => {
            println!("{}", readiness.label().red().bold());
            println!("{}", "Critical issues found - please resolve before using".red());
        }
    }

    let advice = recommendations(results, model);
    if !advice.is_empty() {
        println!("\n{}", "Recommendations:".purple().bold());
        for (critical, text) in advice {
            if critical {
                println!("   • {}", text.red());
            } else {
                println!("   • {}", text.yellow());
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct SystemInfo {
    os: &'static str,
    arch: &'static str,
    family: &'static str,
    cpus: Option<usize>,
}

impl SystemInfo {
    fn current() -> Self {
        Self {
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
            family: std::env::consts::FAMILY,
            cpus: std::thread::available_parallelism().ok().map(usize::from),
        }
    }
}

/// Contents of `verification_report.json`
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    timestamp: String,
    #[serde(serialize_with = "results_by_name")]
    results: &'a [CheckResult],
    pub critical_passed: bool,
    status: Readiness,
    system_info: SystemInfo,
}

// Keyed by check name, in run order
fn results_by_name<S: Serializer>(results: &&[CheckResult], serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(results.len()))?;
    for result in *results {
        map.serialize_entry(result.name, result)?;
    }
    map.end()
}

impl<'a> Report<'a> {
    pub fn new(results: &'a [CheckResult]) -> Self {
        Self {
            timestamp: Local::now().to_rfc3339(),
            results,
            critical_passed: critical_passed(results),
            status: Readiness::of(results),
            system_info: SystemInfo::current(),
        }
    }

    /// Overwrite `path` with the pretty-printed report
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}
