//! CLI administration tool for slug-shortener.
//!
//! Inspects the durable store directly, without going through the HTTP API
//! or the cache.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Show the record behind an identifier
//! cargo run --bin admin -- url show AwMDAwMA
//!
//! # Count stored records
//! cargo run --bin admin -- url count
//! ```
//!
//! # Environment Variables
//!
//! Reads the same configuration as the server (`DATABASE_URL` or the
//! `DB_*` components, `STORE_TIMEOUT_SECONDS`).

use slug_shortener::config::load_from_env;
use slug_shortener::domain::repositories::UrlRepository;
use slug_shortener::infrastructure::persistence::PgUrlRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for inspecting slug-shortener storage.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Inspect stored short URLs
    Url {
        #[command(subcommand)]
        action: UrlAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[derive(Subcommand)]
enum UrlAction {
    /// Show the record for an identifier
    Show {
        /// Eight-character identifier
        identifier: String,
    },

    /// Count stored records
    Count,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_from_env()?;

    let pool = PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    let repo = PgUrlRepository::new(Arc::new(pool), config.store_timeout());

    match cli.command {
        Commands::Db { action } => handle_db_action(action, &repo).await?,
        Commands::Url { action } => handle_url_action(action, &repo).await?,
    }

    Ok(())
}

async fn handle_db_action(action: DbAction, repo: &PgUrlRepository) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            if !repo.health_check().await {
                anyhow::bail!("Database is unreachable");
            }

            let total = repo
                .count()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count records: {}", e))?;

            println!("{}", "Database connection OK".green().bold());
            println!("  Records: {}", total.to_string().bright_white().bold());
        }
    }

    Ok(())
}

/// Dispatches record inspection commands.
async fn handle_url_action(action: UrlAction, repo: &PgUrlRepository) -> Result<()> {
    match action {
        UrlAction::Show { identifier } => {
            let record = repo
                .find_by_identifier(&identifier)
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

            let Some(record) = record else {
                println!("{} {}", "No record for".yellow(), identifier.cyan());
                return Ok(());
            };

            println!("  Identifier: {}", record.identifier.cyan());
            println!("  URL:        {}", record.original_url.bright_white());
            if let Some(created_at) = record.created_at {
                println!(
                    "  Created:    {}",
                    created_at
                        .format("%Y-%m-%d %H:%M:%S")
                        .to_string()
                        .bright_black()
                );
            }
        }
        UrlAction::Count => {
            let total = repo
                .count()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count records: {}", e))?;

            println!(
                "  Short URLs: {}",
                total.to_string().bright_green().bold()
            );
        }
    }

    Ok(())
}
