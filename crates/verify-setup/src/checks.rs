//! Setup checks and the runner that isolates them
//!
//! Each check reports findings line by line and decides whether it passed.
//! Checks run on their own task, so an error or a panic inside one only
//! fails that check.

use agent_llm::providers::{OllamaConfig, OllamaProvider};
use agent_llm::{CompletionRequest, LLMProvider, Message};
use agent_tools::Tool;
use anyhow::{Context, bail};
use async_trait::async_trait;
use regex::Regex;
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use stock_research::agents::create_research_agent;
use stock_research::api::{HistoryRange, PriceHistory, YahooFinanceClient};
use stock_research::profiles::ollama_provider;
use stock_research::{DataSources, ModelProfile, OllamaSettings, StockPriceTool};
use tokio::net::TcpStream;
use tokio::process::Command;
use tracing::debug;

/// Oldest supported compiler
pub const MIN_RUST_VERSION: (u32, u32) = (1, 85);
/// Files the repository must contain, relative to the root
pub const REQUIRED_FILES: [&str; 5] = [
    "Cargo.toml",
    "README.md",
    "DESIGN.md",
    "crates/stock-research/Cargo.toml",
    "crates/verify-setup/Cargo.toml",
];
/// Files that are nice to have
pub const OPTIONAL_FILES: [&str; 2] = [".env", "demos/sample_queries.md"];
/// Hosts probed on port 443
pub const NETWORK_HOSTS: [(&str, &str); 4] = [
    ("finance.yahoo.com", "Yahoo Finance"),
    ("ollama.com", "Ollama"),
    ("github.com", "GitHub"),
    ("crates.io", "crates.io"),
];

const COMMAND_TIMEOUT: Duration = Duration::from_secs(10);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);
const SERVICE_TIMEOUT_SECS: u64 = 10;
const RECOMMENDED_RAM_GB: f64 = 8.0;
const RECOMMENDED_AVAILABLE_GB: f64 = 4.0;

/// Inputs shared by every check
#[derive(Debug, Clone)]
pub struct CheckContext {
    /// Repository root for the files check
    pub root: PathBuf,
    /// Ollama host and the model under test
    pub ollama: OllamaSettings,
    pub skip_network: bool,
}

/// Severity of a single finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Ok,
    Warn,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub status: Mark,
    pub message: String,
}

/// Findings collected while a check runs
#[derive(Debug, Default)]
pub struct Findings(Vec<Finding>);

impl Findings {
    pub fn ok(&mut self, message: impl Into<String>) {
        self.push(Mark::Ok, message);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(Mark::Warn, message);
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.push(Mark::Fail, message);
    }

    fn push(&mut self, status: Mark, message: impl Into<String>) {
        self.0.push(Finding {
            status,
            message: message.into(),
        });
    }

    pub fn into_vec(self) -> Vec<Finding> {
        self.0
    }
}

/// Outcome of one check as printed and persisted
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    #[serde(skip)]
    pub name: &'static str,
    pub passed: bool,
    pub critical: bool,
    pub details: Vec<Finding>,
}

#[async_trait]
pub trait Check: Send + Sync {
    /// Key in the persisted report
    fn name(&self) -> &'static str;

    /// Heading printed before the findings
    fn title(&self) -> &'static str;

    /// Critical checks decide the exit status
    fn critical(&self) -> bool {
        false
    }

    /// Run the check, appending findings to `out`; returns whether it passed
    async fn run(&self, ctx: &CheckContext, out: &mut Findings) -> anyhow::Result<bool>;
}

/// Every check in the order they run
pub fn all_checks() -> Vec<Arc<dyn Check>> {
    vec![
        Arc::new(ToolchainCheck),
        Arc::new(DependenciesCheck),
        Arc::new(OllamaCheck),
        Arc::new(YahooFinanceCheck),
        Arc::new(ModelCheck),
        Arc::new(FilesCheck),
        Arc::new(NetworkCheck),
        Arc::new(ResourcesCheck),
        Arc::new(IntegrationCheck),
    ]
}

/// Run `check` on its own task
///
/// An `Err` keeps the findings gathered so far and adds the error; a panic
/// loses them and records the panic instead.
pub async fn run_check(check: Arc<dyn Check>, ctx: Arc<CheckContext>) -> CheckResult {
    let name = check.name();
    let critical = check.critical();

    let task = tokio::spawn(async move {
        let mut out = Findings::default();
        let passed = check.run(&ctx, &mut out).await;
        (passed, out)
    });

    let (passed, details) = match task.await {
        Ok((Ok(passed), out)) => (passed, out.into_vec()),
        Ok((Err(e), mut out)) => {
            debug!(check = name, error = %e, "Check returned an error");
            out.fail(format!("{e:#}"));
            (false, out.into_vec())
        }
        Err(e) => {
            let mut out = Findings::default();
            out.fail(format!("Check aborted: {e}"));
            (false, out.into_vec())
        }
    };

    CheckResult {
        name,
        passed,
        critical,
        details,
    }
}

/// Run a program and return its trimmed stdout
async fn command_output(program: &str, args: &[&str]) -> anyhow::Result<String> {
    let output = tokio::time::timeout(
        COMMAND_TIMEOUT,
        Command::new(program).args(args).kill_on_drop(true).output(),
    )
    .await
    .with_context(|| format!("{program} timed out"))?
    .with_context(|| format!("{program} could not be started"))?;

    if !output.status.success() {
        bail!(
            "{program} exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// `(major, minor, patch)` from `rustc --version` output
pub fn parse_rustc_version(output: &str) -> Option<(u32, u32, u32)> {
    let pattern = Regex::new(r"rustc (\d+)\.(\d+)\.(\d+)").ok()?;
    let caps = pattern.captures(output)?;
    Some((
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
    ))
}

pub fn meets_minimum(version: (u32, u32, u32)) -> bool {
    (version.0, version.1) >= MIN_RUST_VERSION
}

pub struct ToolchainCheck;

#[async_trait]
impl Check for ToolchainCheck {
    fn name(&self) -> &'static str {
        "toolchain"
    }

    fn title(&self) -> &'static str {
        "Rust Toolchain Check"
    }

    fn critical(&self) -> bool {
        true
    }

    async fn run(&self, _ctx: &CheckContext, out: &mut Findings) -> anyhow::Result<bool> {
        let output = command_output("rustc", &["--version"]).await?;
        let Some(version) = parse_rustc_version(&output) else {
            out.fail(format!("Unrecognized rustc version: {output}"));
            return Ok(false);
        };

        let (major, minor) = MIN_RUST_VERSION;
        let text = format!("{}.{}.{}", version.0, version.1, version.2);
        if meets_minimum(version) {
            out.ok(format!("rustc version: {text}"));
            Ok(true)
        } else {
            out.fail(format!("rustc version: {text} (requires {major}.{minor}+)"));
            Ok(false)
        }
    }
}

pub struct DependenciesCheck;

#[async_trait]
impl Check for DependenciesCheck {
    fn name(&self) -> &'static str {
        "dependencies"
    }

    fn title(&self) -> &'static str {
        "Required Programs Check"
    }

    fn critical(&self) -> bool {
        true
    }

    async fn run(&self, _ctx: &CheckContext, out: &mut Findings) -> anyhow::Result<bool> {
        let mut all_found = true;
        for program in ["cargo", "ollama"] {
            match which::which(program) {
                Ok(path) => out.ok(format!("{program}: {}", path.display())),
                Err(_) => {
                    out.fail(format!("{program}: not found on PATH"));
                    all_found = false;
                }
            }
        }
        Ok(all_found)
    }
}

fn service_provider(settings: &OllamaSettings) -> anyhow::Result<OllamaProvider> {
    let config = OllamaConfig::new(&settings.host).with_timeout(SERVICE_TIMEOUT_SECS);
    Ok(OllamaProvider::with_config(config)?)
}

/// Whether `model` appears in the service's model list
///
/// Ollama lists `name:tag`; a bare name matches any tag.
pub fn model_is_pulled(models: &[String], model: &str) -> bool {
    models
        .iter()
        .any(|m| m == model || m.split_once(':').is_some_and(|(name, _)| name == model))
}

/// Ask the service for its models and version, and note whether `model` is
/// among the models
pub async fn probe_service(
    provider: &OllamaProvider,
    model: &str,
    out: &mut Findings,
) -> bool {
    let host = &provider.config().host;
    let models = match provider.list_models().await {
        Ok(models) => models,
        Err(e) => {
            out.fail(format!("Ollama service not reachable at {host}: {e}"));
            return false;
        }
    };

    match provider.version().await {
        Ok(version) => out.ok(format!("Ollama service: running at {host} (server {version})")),
        Err(e) => {
            debug!(error = %e, "Ollama version unavailable");
            out.ok(format!("Ollama service: running at {host}"));
        }
    }
    if models.is_empty() {
        out.warn("Available models: none downloaded");
    } else {
        out.ok(format!("Available models: {}", models.join(", ")));
        if !model_is_pulled(&models, model) {
            out.warn(format!("Model '{model}' is not pulled yet"));
        }
    }
    true
}

pub struct OllamaCheck;

#[async_trait]
impl Check for OllamaCheck {
    fn name(&self) -> &'static str {
        "ollama"
    }

    fn title(&self) -> &'static str {
        "Ollama Service Check"
    }

    fn critical(&self) -> bool {
        true
    }

    async fn run(&self, ctx: &CheckContext, out: &mut Findings) -> anyhow::Result<bool> {
        match command_output("ollama", &["--version"]).await {
            Ok(version) => out.ok(format!("Ollama installed: {version}")),
            Err(e) => {
                out.fail(format!("Ollama CLI: {e:#}"));
                return Ok(false);
            }
        }

        let provider = service_provider(&ctx.ollama)?;
        Ok(probe_service(&provider, &ctx.ollama.model, out).await)
    }
}

pub struct YahooFinanceCheck;

#[async_trait]
impl Check for YahooFinanceCheck {
    fn name(&self) -> &'static str {
        "yahoo_finance"
    }

    fn title(&self) -> &'static str {
        "Yahoo Finance Connectivity"
    }

    async fn run(&self, _ctx: &CheckContext, out: &mut Findings) -> anyhow::Result<bool> {
        let bars = YahooFinanceClient::new()
            .daily_bars("AAPL", HistoryRange::FiveDays)
            .await?;

        match bars.last() {
            Some(bar) => {
                out.ok("Yahoo Finance: connected");
                out.ok(format!("AAPL price: ${:.2}", bar.close));
                Ok(true)
            }
            None => {
                out.fail("Yahoo Finance: no data received");
                Ok(false)
            }
        }
    }
}

/// One "Hello" completion against `model`, timed
pub async fn smoke_test(
    provider: &dyn LLMProvider,
    model: &str,
    out: &mut Findings,
) -> anyhow::Result<bool> {
    let request = CompletionRequest::builder(model)
        .add_message(Message::user("Hello"))
        .temperature(0.0)
        .build();

    let started = Instant::now();
    let response = provider
        .complete(request)
        .await
        .with_context(|| format!("Model {model} failed"))?;
    let elapsed = started.elapsed().as_secs_f64();

    let reply = response.message.text().unwrap_or_default().trim();
    if reply.is_empty() {
        out.fail(format!("Model {model}: empty response ({elapsed:.1}s)"));
        return Ok(false);
    }

    out.ok(format!("Model {model}: working ({elapsed:.1}s)"));
    let preview: String = reply.chars().take(100).collect();
    out.ok(format!("Response: {preview}"));
    Ok(true)
}

pub struct ModelCheck;

#[async_trait]
impl Check for ModelCheck {
    fn name(&self) -> &'static str {
        "model"
    }

    fn title(&self) -> &'static str {
        "Ollama Model Test"
    }

    fn critical(&self) -> bool {
        true
    }

    async fn run(&self, ctx: &CheckContext, out: &mut Findings) -> anyhow::Result<bool> {
        let provider = ollama_provider(&ctx.ollama)?;
        smoke_test(provider.as_ref(), &ctx.ollama.model, out).await
    }
}

pub struct FilesCheck;

#[async_trait]
impl Check for FilesCheck {
    fn name(&self) -> &'static str {
        "files"
    }

    fn title(&self) -> &'static str {
        "Project Files Check"
    }

    fn critical(&self) -> bool {
        true
    }

    async fn run(&self, ctx: &CheckContext, out: &mut Findings) -> anyhow::Result<bool> {
        let mut all_found = true;
        for file in REQUIRED_FILES {
            if ctx.root.join(file).is_file() {
                out.ok(format!("{file}: found"));
            } else {
                out.fail(format!("{file}: missing"));
                all_found = false;
            }
        }

        let mut optional_found = 0;
        for file in OPTIONAL_FILES {
            if ctx.root.join(file).is_file() {
                out.ok(format!("{file}: found"));
                optional_found += 1;
            } else {
                out.warn(format!("{file}: optional (missing)"));
            }
        }
        out.ok(format!(
            "Optional files found: {optional_found}/{}",
            OPTIONAL_FILES.len()
        ));

        Ok(all_found)
    }
}

pub struct NetworkCheck;

#[async_trait]
impl Check for NetworkCheck {
    fn name(&self) -> &'static str {
        "network"
    }

    fn title(&self) -> &'static str {
        "Network Connectivity Check"
    }

    async fn run(&self, ctx: &CheckContext, out: &mut Findings) -> anyhow::Result<bool> {
        if ctx.skip_network {
            out.warn("Skipped (--skip-network)");
            return Ok(true);
        }

        let mut reachable = true;
        for (host, service) in NETWORK_HOSTS {
            match tokio::time::timeout(CONNECT_TIMEOUT, TcpStream::connect((host, 443))).await {
                Ok(Ok(_)) => out.ok(format!("{service}: reachable")),
                Ok(Err(e)) => {
                    out.fail(format!("{service}: unreachable ({e})"));
                    reachable = false;
                }
                Err(_) => {
                    out.fail(format!("{service}: timeout"));
                    reachable = false;
                }
            }
        }
        Ok(reachable)
    }
}

/// Total and available memory in kB
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemInfo {
    pub total_kb: u64,
    pub available_kb: u64,
}

/// Parse the `MemTotal` and `MemAvailable` lines of `/proc/meminfo`
pub fn parse_meminfo(content: &str) -> Option<MemInfo> {
    let field = |key: &str| -> Option<u64> {
        content
            .lines()
            .find_map(|line| line.strip_prefix(key))?
            .trim_start_matches(':')
            .split_whitespace()
            .next()?
            .parse()
            .ok()
    };
    Some(MemInfo {
        total_kb: field("MemTotal")?,
        available_kb: field("MemAvailable")?,
    })
}

fn kb_to_gb(kb: u64) -> f64 {
    kb as f64 / (1024.0 * 1024.0)
}

pub struct ResourcesCheck;

#[async_trait]
impl Check for ResourcesCheck {
    fn name(&self) -> &'static str {
        "resources"
    }

    fn title(&self) -> &'static str {
        "System Resources Check"
    }

    async fn run(&self, _ctx: &CheckContext, out: &mut Findings) -> anyhow::Result<bool> {
        let meminfo = tokio::fs::read_to_string("/proc/meminfo")
            .await
            .ok()
            .and_then(|content| parse_meminfo(&content));

        match meminfo {
            Some(mem) => {
                let total = kb_to_gb(mem.total_kb);
                let available = kb_to_gb(mem.available_kb);
                if total >= RECOMMENDED_RAM_GB {
                    out.ok(format!("Total RAM: {total:.1} GB"));
                } else {
                    out.warn(format!(
                        "Total RAM: {total:.1} GB ({RECOMMENDED_RAM_GB:.0}GB+ recommended)"
                    ));
                }
                if available >= RECOMMENDED_AVAILABLE_GB {
                    out.ok(format!("Available RAM: {available:.1} GB"));
                } else {
                    out.warn(format!("Available RAM: {available:.1} GB"));
                }
            }
            None => out.warn("Memory information unavailable on this platform"),
        }

        match std::thread::available_parallelism() {
            Ok(cores) => out.ok(format!("CPU cores: {cores}")),
            Err(e) => out.warn(format!("CPU cores: unknown ({e})")),
        }

        Ok(true)
    }
}

pub struct IntegrationCheck;

#[async_trait]
impl Check for IntegrationCheck {
    fn name(&self) -> &'static str {
        "integration"
    }

    fn title(&self) -> &'static str {
        "Integration Test"
    }

    async fn run(&self, ctx: &CheckContext, out: &mut Findings) -> anyhow::Result<bool> {
        let sources = DataSources::new(Arc::new(YahooFinanceClient::new()), None);

        let price = StockPriceTool::new(sources.clone())
            .execute(json!({"symbol": "AAPL"}))
            .await?;
        if price.get("current_price").is_some() {
            out.ok("Stock price tool: working");
        } else {
            let reason = price["error"].as_str().unwrap_or("no current_price field");
            out.fail(format!("Stock price tool: {reason}"));
            return Ok(false);
        }

        let provider = ollama_provider(&ctx.ollama)?;
        let agent = create_research_agent(provider, &sources, ModelProfile::from_settings(&ctx.ollama))?;
        out.ok(format!(
            "Agent creation: working ({})",
            agent.tool_names().join(", ")
        ));
        out.warn("LLM run skipped: the model check covers it");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn context(root: PathBuf) -> Arc<CheckContext> {
        Arc::new(CheckContext {
            root,
            ollama: OllamaSettings::default(),
            skip_network: true,
        })
    }

    struct Exploding;

    #[async_trait]
    impl Check for Exploding {
        fn name(&self) -> &'static str {
            "exploding"
        }

        fn title(&self) -> &'static str {
            "Exploding"
        }

        async fn run(&self, _ctx: &CheckContext, _out: &mut Findings) -> anyhow::Result<bool> {
            panic!("boom");
        }
    }

    struct Failing;

    #[async_trait]
    impl Check for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn title(&self) -> &'static str {
            "Failing"
        }

        fn critical(&self) -> bool {
            true
        }

        async fn run(&self, _ctx: &CheckContext, out: &mut Findings) -> anyhow::Result<bool> {
            out.ok("first step");
            bail!("second step broke")
        }
    }

    #[test]
    fn test_parse_rustc_version() {
        assert_eq!(
            parse_rustc_version("rustc 1.85.0 (4d91de4e4 2025-02-17)"),
            Some((1, 85, 0))
        );
        assert_eq!(parse_rustc_version("rustc 1.90.0-nightly"), Some((1, 90, 0)));
        assert_eq!(parse_rustc_version("cargo 1.85.0"), None);
    }

    #[test]
    fn test_minimum_version() {
        assert!(meets_minimum((1, 85, 0)));
        assert!(meets_minimum((2, 0, 0)));
        assert!(!meets_minimum((1, 84, 1)));
    }

    #[test]
    fn test_parse_meminfo() {
        let content = "MemTotal:       16318480 kB\nMemFree:         1034212 kB\nMemAvailable:    8123456 kB\n";
        assert_eq!(
            parse_meminfo(content),
            Some(MemInfo {
                total_kb: 16_318_480,
                available_kb: 8_123_456
            })
        );
        assert_eq!(parse_meminfo("MemTotal: 100 kB\n"), None);
    }

    #[test]
    fn test_model_is_pulled() {
        let models = vec!["gpt-oss:latest".to_string(), "mistral:7b".to_string()];
        assert!(model_is_pulled(&models, "gpt-oss"));
        assert!(model_is_pulled(&models, "mistral:7b"));
        assert!(!model_is_pulled(&models, "llama2"));
    }

    #[test]
    fn test_check_order() {
        let names: Vec<&str> = all_checks().iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec![
                "toolchain",
                "dependencies",
                "ollama",
                "yahoo_finance",
                "model",
                "files",
                "network",
                "resources",
                "integration"
            ]
        );
        let critical: Vec<&str> = all_checks()
            .iter()
            .filter(|c| c.critical())
            .map(|c| c.name())
            .collect();
        assert_eq!(
            critical,
            vec!["toolchain", "dependencies", "ollama", "model", "files"]
        );
    }

    #[tokio::test]
    async fn test_panic_fails_only_that_check() {
        let ctx = context(PathBuf::from("."));
        let result = run_check(Arc::new(Exploding), Arc::clone(&ctx)).await;
        assert!(!result.passed);
        assert_eq!(result.details.len(), 1);
        assert_eq!(result.details[0].status, Mark::Fail);

        let after = run_check(Arc::new(NetworkCheck), ctx).await;
        assert!(after.passed);
    }

    #[tokio::test]
    async fn test_error_keeps_earlier_findings() {
        let result = run_check(Arc::new(Failing), context(PathBuf::from("."))).await;
        assert!(!result.passed);
        assert!(result.critical);
        assert_eq!(result.details[0].message, "first step");
        assert_eq!(result.details[1].status, Mark::Fail);
        assert!(result.details[1].message.contains("second step broke"));
    }

    #[tokio::test]
    async fn test_files_check() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path().to_path_buf());

        let missing = run_check(Arc::new(FilesCheck), Arc::clone(&ctx)).await;
        assert!(!missing.passed);

        std::fs::create_dir_all(dir.path().join("crates/stock-research")).unwrap();
        std::fs::create_dir_all(dir.path().join("crates/verify-setup")).unwrap();
        for file in REQUIRED_FILES {
            std::fs::write(dir.path().join(file), "").unwrap();
        }

        let found = run_check(Arc::new(FilesCheck), ctx).await;
        assert!(found.passed);
        // Optional files only warn
        assert!(found.details.iter().any(|f| f.status == Mark::Warn));
        assert!(!found.details.iter().any(|f| f.status == Mark::Fail));
    }

    #[tokio::test]
    async fn test_skipped_network_passes() {
        let result = run_check(Arc::new(NetworkCheck), context(PathBuf::from("."))).await;
        assert!(result.passed);
        assert_eq!(result.details[0].status, Mark::Warn);
    }

    #[tokio::test]
    async fn test_resources_never_fail() {
        let result = run_check(Arc::new(ResourcesCheck), context(PathBuf::from("."))).await;
        assert!(result.passed);
        assert!(!result.details.iter().any(|f| f.status == Mark::Fail));
    }

    #[tokio::test]
    async fn test_probe_service_lists_models() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "models": [{"name": "mistral:latest"}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/version"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"version": "0.12.3"})))
            .mount(&server)
            .await;

        let provider = OllamaProvider::new(server.uri()).unwrap();
        let mut out = Findings::default();
        assert!(probe_service(&provider, "gpt-oss", &mut out).await);

        let findings = out.into_vec();
        assert!(findings[0].message.ends_with("(server 0.12.3)"));
        assert!(findings[1].message.contains("mistral:latest"));
        assert_eq!(findings[2].status, Mark::Warn);
        assert!(findings[2].message.contains("gpt-oss"));
    }

    #[tokio::test]
    async fn test_probe_service_without_version_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "models": [{"name": "gpt-oss:latest"}]
            })))
            .mount(&server)
            .await;

        let provider = OllamaProvider::new(server.uri()).unwrap();
        let mut out = Findings::default();
        assert!(probe_service(&provider, "gpt-oss", &mut out).await);

        let findings = out.into_vec();
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].status, Mark::Ok);
        assert!(!findings[0].message.contains("server"));
    }

    #[tokio::test]
    async fn test_probe_service_down() {
        // Nothing listens on port 9 of localhost
        let provider = OllamaProvider::new("http://127.0.0.1:9").unwrap();
        let mut out = Findings::default();
        assert!(!probe_service(&provider, "gpt-oss", &mut out).await);
        assert_eq!(out.into_vec()[0].status, Mark::Fail);
    }

    #[tokio::test]
    async fn test_smoke_test_times_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "gpt-oss",
                "message": {"role": "assistant", "content": "Hello! How can I help?"},
                "done": true,
                "done_reason": "stop"
            })))
            .mount(&server)
            .await;

        let provider = OllamaProvider::new(server.uri()).unwrap();
        let mut out = Findings::default();
        assert!(smoke_test(&provider, "gpt-oss", &mut out).await.unwrap());

        let findings = out.into_vec();
        assert!(findings[0].message.starts_with("Model gpt-oss: working ("));
        assert_eq!(findings[1].message, "Response: Hello! How can I help?");
    }

    #[tokio::test]
    async fn test_smoke_test_missing_model() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"error": "model not found"})),
            )
            .mount(&server)
            .await;

        let provider = OllamaProvider::new(server.uri()).unwrap();
        let mut out = Findings::default();
        assert!(smoke_test(&provider, "llama2", &mut out).await.is_err());
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn test_yahoo_finance_live() {
        let result = run_check(Arc::new(YahooFinanceCheck), context(PathBuf::from("."))).await;
        assert!(result.passed);
    }
}
