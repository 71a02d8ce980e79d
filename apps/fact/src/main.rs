//! # fact - a minimal persistent fact store
//!
//! The command-line binary around `fact-core`.
//!
//! ## Usage
//!
//! ```bash
//! # Store and query facts in ./fact.redb
//! fact add cat name meow
//! fact what cat -p name
//! fact who-has name meow
//!
//! # Computed facts need no predicate
//! fact what now
//!
//! # The built-in example, in memory
//! fact --memory demo
//! ```

mod cli;
mod config;

use clap::Parser;
use config::FactConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    let (config, config_error) = match FactConfig::load(cli.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (FactConfig::default(), Some(e)),
    };

    init_tracing(&config, cli.verbose);

    if let Some(e) = config_error {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }

    // Display startup banner
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli, &config) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing. Logs go to stderr so stdout stays parseable.
///
/// `FACT_LOG_FORMAT=json` (or `log_format = "json"`) enables JSON output.
fn init_tracing(config: &FactConfig, verbose: bool) {
    let default_filter = if verbose {
        "fact=debug,fact_core=debug".to_string()
    } else {
        config
            .log_filter
            .clone()
            .unwrap_or_else(|| "fact=info,fact_core=info".to_string())
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match config.log_format().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Print the startup banner.
fn print_banner() {
    println!("fact v{} - subject, predicate, object\n", env!("CARGO_PKG_VERSION"));
}
