//! # Fabrica - Staged Construction Toolkit
//!
//! The main binary for the Fabrica construction toolkit.
//!
//! This application provides:
//! - CLI interface for catalog, builder, factory, and cache operations
//! - Catalog bootstrap (TOML templates registered at startup)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                apps/fabrica (THE BINARY)                │
//! │                                                         │
//! │  ┌─────────────┐              ┌────────────────────┐   │
//! │  │   CLI       │              │  Catalog Bootstrap │   │
//! │  │  (clap)     │              │  (toml templates)  │   │
//! │  └──────┬──────┘              └─────────┬──────────┘   │
//! │         │                               │              │
//! │         └───────────────┬───────────────┘              │
//! │                         ▼                              │
//! │                ┌─────────────────┐                     │
//! │                │  fabrica-core   │                     │
//! │                │  (THE TOOLKIT)  │                     │
//! │                └─────────────────┘                     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # List the built-in catalog
//! fabrica catalog
//!
//! # Construct products
//! fabrica create --kind car --set color=red
//! fabrica build --kind laptop --set cpu=m4 --set ram_gb=32
//!
//! # Shared cache operations
//! fabrica cache set greeting hello
//! fabrica cache get greeting
//! ```

use clap::Parser;
use fabrica::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Initialize tracing — FABRICA_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("FABRICA_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fabrica=info".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Display startup banner
    if !cli.quiet {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Fabrica startup banner.
fn print_banner() {
    println!(
        r#"
  ███████╗ █████╗ ██████╗ ██████╗ ██╗ ██████╗ █████╗
  ██╔════╝██╔══██╗██╔══██╗██╔══██╗██║██╔════╝██╔══██╗
  █████╗  ███████║██████╔╝██████╔╝██║██║     ███████║
  ██╔══╝  ██╔══██║██╔══██╗██╔══██╗██║██║     ██╔══██║
  ██║     ██║  ██║██████╔╝██║  ██║██║╚██████╗██║  ██║
  ╚═╝     ╚═╝  ╚═╝╚═════╝ ╚═╝  ╚═╝╚═╝ ╚═════╝╚═╝  ╚═╝

  Staged Construction Toolkit v{}

  Declared • Registered • Singular
"#,
        env!("CARGO_PKG_VERSION")
    );
}
