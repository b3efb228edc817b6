//! Customer REST CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the customer table
//! crcli migrate
//!
//! # Insert 25 sample customers
//! crcli seed --count 25
//!
//! # Verify the database settings the server will use
//! crcli check
//! ```
//!
//! Database settings come from the same `DB_*` / `SSL_CERT*` variables as the
//! server.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "crcli")]
#[command(author, version, about = "Customer REST API CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Insert sample customers
    Seed {
        /// Number of customers to insert
        #[arg(short, long, default_value_t = 10)]
        count: usize,
    },
    /// Check that the database is reachable
    Check,
}

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Install rustls crypto provider (must be done before any TLS operations)
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        tracing::warn!("rustls crypto provider already installed");
    }

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Seed { count } => commands::seed::run(count).await,
        Commands::Check => commands::check::run().await,
    }
}
