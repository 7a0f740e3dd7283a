//! Stock research agent CLI
//!
//! # Usage
//!
//! ```bash
//! # Start the web UI (default)
//! cargo run --bin research-agent
//!
//! # One report on stdout
//! cargo run --bin research-agent -- ask "Analyze Apple (AAPL)"
//!
//! # Enhanced or specialized agents
//! cargo run --bin research-agent -- enhanced "Analyze NVDA options flow" --agent-type options
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use stock_research::{ResearchConfig, ResearchService, ui};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "research-agent")]
#[command(about = "Stock research agent backed by a local Ollama model", long_about = None)]
#[command(version)]
struct Cli {
    /// Model to use instead of OLLAMA_MODEL
    #[arg(long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the research web UI
    Serve {
        /// Port instead of UI_PORT
        #[arg(long)]
        port: Option<u16>,

        /// Listen on all interfaces
        #[arg(long)]
        share: bool,
    },

    /// Run one research query and print the report
    Ask {
        /// Free-text research query
        query: String,
    },

    /// Run the enhanced agent or a specialized one
    Enhanced {
        /// Free-text research query
        query: String,

        /// enhanced, quantitative, esg, options or any other focus
        #[arg(long, default_value = "enhanced")]
        agent_type: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    agent_utils::load_dotenv();
    agent_utils::init_tracing("warn,stock_research=info,agent_runtime=info");

    let cli = Cli::parse();
    let mut config = ResearchConfig::from_env().context("Invalid configuration")?;
    if let Some(model) = cli.model {
        config.ollama.model = model;
    }

    let command = cli.command.unwrap_or(Commands::Serve {
        port: None,
        share: false,
    });
    if let Commands::Serve { port, share } = &command {
        if let Some(port) = port {
            config.ui.port = *port;
        }
        config.ui.share |= *share;
    }

    let service = ResearchService::from_config(&config).context("Failed to assemble agent")?;

    match command {
        Commands::Serve { .. } => {
            println!("📊 Stock Research Agent on http://{}", config.ui.bind_address());
            ui::serve(Arc::new(service), &config.ui).await?;
        }
        Commands::Ask { query } => {
            println!("{}", service.run_stock_research(&query).await);
        }
        Commands::Enhanced { query, agent_type } => {
            println!("{}", service.run_enhanced_analysis(&query, &agent_type).await);
        }
    }

    Ok(())
}
