//! CLI administration tool for shrtn.
//!
//! Talks to the PostgreSQL store directly, so mappings can be created,
//! inspected, and the schema managed without the HTTP service running.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL (idempotent, same as POST /set)
//! cargo run --bin admin -- shorten https://example.com/some/long/path
//!
//! # Resolve a token back to its long URL
//! cargo run --bin admin -- lookup aZ3_k9Qx0b
//!
//! # Show mapping counts
//! cargo run --bin admin -- stats
//!
//! # Check database connection / apply migrations
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`

use shrtn::application::services::ShortenerService;
use shrtn::config::load_database_url;
use shrtn::domain::errors::ShortenError;
use shrtn::infrastructure::persistence::{MIGRATOR, PgMappingRepository};
use shrtn::utils::token_generator::RandomTokenGenerator;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::process::ExitCode;
use std::sync::Arc;

/// CLI tool for managing shrtn.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Shorten a long URL
    Shorten {
        /// Absolute URL to shorten
        url: String,
    },

    /// Resolve a short token
    Lookup {
        /// Short token to resolve
        token: String,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Shorten { url } => shorten(&pool, &url).await,
        Commands::Lookup { token } => lookup(&pool, &token).await,
        Commands::Stats => handle_stats(&pool).await.map(|_| ExitCode::SUCCESS),
        Commands::Db { action } => handle_db_action(action, &pool)
            .await
            .map(|_| ExitCode::SUCCESS),
    }
}

fn shortener(pool: &PgPool) -> ShortenerService {
    ShortenerService::new(
        Arc::new(PgMappingRepository::new(Arc::new(pool.clone()))),
        Arc::new(RandomTokenGenerator::new()),
    )
}

/// Shortens `url` and prints the resulting token.
///
/// Invalid URLs are reported and exit with status 1; storage failures
/// propagate as errors.
async fn shorten(pool: &PgPool, url: &str) -> Result<ExitCode> {
    match shortener(pool).shorten(url).await {
        Ok(mapping) => {
            println!("{}", "✅ Shortened".green().bold());
            println!("  Long URL: {}", mapping.long_url.cyan());
            println!("  Token:    {}", mapping.short_token.bright_yellow().bold());
            Ok(ExitCode::SUCCESS)
        }
        Err(e @ ShortenError::InvalidUrl { .. }) => {
            eprintln!("{} {}", "❌".red(), e.to_string().red());
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(anyhow::anyhow!("Failed to shorten: {}", e)),
    }
}

/// Prints the mapping for `token`, exiting with status 1 if there is none.
async fn lookup(pool: &PgPool, token: &str) -> Result<ExitCode> {
    match shortener(pool).lookup(token).await {
        Ok(mapping) => {
            println!("  Token:    {}", mapping.short_token.bright_yellow());
            println!("  Long URL: {}", mapping.long_url.cyan());
            println!(
                "  Created:  {}",
                mapping
                    .created_at
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
                    .bright_black()
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(ShortenError::UrlNotFound { .. }) => {
            eprintln!("{}", format!("No mapping for token '{token}'").yellow());
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(anyhow::anyhow!("Lookup failed: {}", e)),
    }
}

/// Displays mapping statistics.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let mappings_count = shortener(pool)
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count mappings: {}", e))?;

    let last_created: Option<chrono::DateTime<chrono::Utc>> =
        sqlx::query_scalar("SELECT MAX(created_at) FROM mappings")
            .fetch_one(pool)
            .await?;

    println!(
        "  Mappings:     {}",
        mappings_count.to_string().bright_green().bold()
    );
    println!(
        "  Last created: {}",
        last_created
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string())
            .bright_black()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
        DbAction::Migrate => {
            println!("{}", "🛠  Applying migrations...".bright_blue());

            MIGRATOR
                .run(pool)
                .await
                .context("Failed to run database migrations")?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
