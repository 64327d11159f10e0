//! CLI administration tool for bitlink.
//!
//! API keys are provisioned here, out-of-band; the HTTP API only reads them.
//!
//! # Usage
//!
//! ```bash
//! # Create a new API key (unlimited unless --daily-limit is given)
//! cargo run --bin admin -- key create --daily-limit 100
//!
//! # List all keys
//! cargo run --bin admin -- key list
//!
//! # Change a key's daily limit (0 = unlimited, negative = disabled)
//! cargo run --bin admin -- key limit <KEY> -1
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`, or `DB_HOST` / `DB_PORT` / `DB_USER` / `DB_PASSWORD` / `DB_NAME`

use bitlink::config::Config;
use bitlink::domain::entities::{API_KEY_LENGTH, ApiKey};
use bitlink::domain::repositories::ApiKeyRepository;
use bitlink::infrastructure::persistence::PgApiKeyRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing bitlink.
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
    /// Manage API keys
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// API key management subcommands.
#[derive(Subcommand)]
enum KeyAction {
    /// Create a new API key
    Create {
        /// Links per UTC day (0 = unlimited, negative = disabled)
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        daily_limit: i32,

        /// Custom key value (32 characters, auto-generated if not provided)
        #[arg(short, long)]
        key: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all keys
    List,

    /// Change the daily limit of a key
    Limit {
        /// The API key
        key: String,

        /// New limit (0 = unlimited, negative = disabled)
        #[arg(allow_negative_numbers = true)]
        daily_limit: i32,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Key { action } => handle_key_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches API key commands.
async fn handle_key_action(action: KeyAction, pool: &PgPool) -> Result<()> {
    let repo = PgApiKeyRepository::new(Arc::new(pool.clone()));

    match action {
        KeyAction::Create {
            daily_limit,
            key,
            yes,
        } => create_key(&repo, daily_limit, key, yes).await,
        KeyAction::List => list_keys(&repo).await,
        KeyAction::Limit { key, daily_limit } => set_limit(&repo, key, daily_limit).await,
    }
}

/// Creates a new API key after confirmation.
async fn create_key(
    repo: &PgApiKeyRepository,
    daily_limit: i32,
    key: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Create API key".bright_blue().bold());
    println!();

    let key_value = match key {
        Some(k) => {
            if k.chars().count() != API_KEY_LENGTH {
                anyhow::bail!("API keys must be exactly {} characters", API_KEY_LENGTH);
            }
            println!("{}", "Using provided key value".yellow());
            k
        }
        None => generate_key(),
    };

    let api_key = ApiKey::new(key_value, daily_limit);

    println!("  Key:   {}", api_key.key.bright_yellow().bold());
    println!("  Quota: {}", api_key.quota().to_string().cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this key?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let created = repo
        .create(api_key)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create key: {}", e))?;

    println!();
    println!("{}", "Key created".green().bold());
    println!();
    println!("{}", "Example:".bright_white());
    println!("  curl -X POST -H 'Content-Type: application/json' \\");
    println!(
        "    -d '{{\"url\": \"https://example.com\", \"key\": \"{}\"}}' \\",
        created.key.bright_yellow()
    );
    println!("    http://localhost:9002/api/v1/short");
    println!();

    Ok(())
}

/// Lists all API keys with their quota.
///
/// ```text
/// API keys
///
///   Key                              Quota
///   ──────────────────────────────────────────────────
///   Xk2...                           100/day
/// ```
async fn list_keys(repo: &PgApiKeyRepository) -> Result<()> {
    println!("{}", "API keys".bright_blue().bold());
    println!();

    let keys = repo
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list keys: {}", e))?;

    if keys.is_empty() {
        println!("{}", "  No keys found".yellow());
        println!();
        println!(
            "  Create one with: {} admin -- key create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<32} {}",
        "Key".bright_white().bold(),
        "Quota".bright_white().bold()
    );
    println!("  {}", "─".repeat(50).bright_black());

    for api_key in &keys {
        let quota = api_key.quota().to_string();
        let quota = if api_key.daily_limit < 0 {
            quota.red()
        } else {
            quota.green()
        };

        println!("  {:<32} {}", api_key.key.cyan(), quota);
    }

    println!();
    println!("  Total: {}", keys.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Replaces the daily limit of an existing key.
async fn set_limit(repo: &PgApiKeyRepository, key: String, daily_limit: i32) -> Result<()> {
    let updated = repo
        .set_daily_limit(&key, daily_limit)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to update key: {}", e))?;

    if !updated {
        anyhow::bail!("Key not found: {}", key);
    }

    let quota = ApiKey::new(key, daily_limit).quota();
    println!("{} {}", "Quota is now".green().bold(), quota.to_string().cyan());

    Ok(())
}

/// Displays system statistics.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await?;

    let custom_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE custom")
        .fetch_one(pool)
        .await?;

    let visits_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM stats")
        .fetch_one(pool)
        .await?;

    let keys_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM api WHERE daily_limit >= 0")
        .fetch_one(pool)
        .await?;

    println!(
        "  Links:       {} ({} custom)",
        links_count.to_string().bright_green().bold(),
        custom_count.to_string().bright_green()
    );
    println!(
        "  Visits:      {}",
        visits_count.to_string().bright_green().bold()
    );
    println!(
        "  Active keys: {}",
        keys_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
        DbAction::Migrate => {
            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Failed to run migrations")?;

            println!("{}", "Migrations applied".green().bold());
        }
    }

    Ok(())
}

/// Generates a random alphanumeric API key of [`API_KEY_LENGTH`] characters.
fn generate_key() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

    let mut rng = rand::rng();

    (0..API_KEY_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
