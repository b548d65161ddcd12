//! # Tweet Ledger Node Runtime
//!
//! Runs the tweet program over an in-memory ledger and serves the
//! JSON-lines command protocol on stdin/stdout.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults + `TL_*` environment)
//! 2. Install logging (stderr; stdout carries responses only)
//! 3. Validate configuration
//! 4. Build the program container and fund the identity
//! 5. Serve commands until EOF or Ctrl+C

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use tl_node_runtime::{CommandHandler, NodeConfig, ProgramContainer};

/// The node runtime.
struct NodeRuntime {
    handler: CommandHandler,
}

impl NodeRuntime {
    /// Create a new node runtime with configuration.
    fn new(config: NodeConfig) -> Result<Self> {
        info!("Creating tweet ledger node runtime");
        let container =
            ProgramContainer::new(config).context("Failed to initialize program container")?;
        Ok(Self {
            handler: CommandHandler::new(Arc::new(container)),
        })
    }

    /// Serve stdin until EOF or Ctrl+C.
    async fn run(&self) -> Result<()> {
        info!("===========================================");
        info!("  Tweet Ledger Node Runtime v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        let input = BufReader::new(tokio::io::stdin());
        let output = tokio::io::stdout();

        tokio::select! {
            served = self.handler.serve(input, output) => served?,
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for Ctrl+C")?;
                info!("Shutdown signal received");
            }
        }

        info!("Shutdown complete");
        Ok(())
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
fn init_logging(config: &NodeConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .context("Invalid log filter")?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = NodeConfig::from_env().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config)?;

    config.validate()?;

    let runtime = NodeRuntime::new(config)?;
    runtime.run().await
}
