//! CLI administration tool for TinyLink.
//!
//! Lists, inspects and deletes links, shows totals and checks the database
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin admin -- links list
//! cargo run --bin admin -- links show abc123
//! cargo run --bin admin -- links delete abc123
//! cargo run --bin admin -- stats
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or the `DB_*` components): PostgreSQL connection

use tinylink::application::services::LinkService;
use tinylink::config::{Config, StorageBackend};
use tinylink::domain::entities::Link;
use tinylink::infrastructure::persistence::PgLinkRepository;
use tinylink::server::connect_pool;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing TinyLink.
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
    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show totals
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List all links, newest first
    List,

    /// Show one link with its counters
    Show {
        /// Short code
        code: String,
    },

    /// Delete a link
    Delete {
        /// Short code
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    if config.storage != StorageBackend::Postgres {
        return Err(anyhow!("The admin tool requires STORAGE=postgres"));
    }

    let pool = connect_pool(&config).await?;
    let service = LinkService::new(Arc::new(PgLinkRepository::new(Arc::new(pool.clone()))));

    match cli.command {
        Commands::Links { action } => handle_link_action(action, &service).await?,
        Commands::Stats => handle_stats(&service).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, service: &LinkService) -> Result<()> {
    match action {
        LinkAction::List => list_links(service).await,
        LinkAction::Show { code } => show_link(service, &code).await,
        LinkAction::Delete { code, yes } => delete_link(service, &code, yes).await,
    }
}

/// Prints all links as a table.
///
/// ```text
/// 🔗 Links
///
///   Code      Clicks  Created           URL
///   ──────────────────────────────────────────────────────────────
///   def456    3       2025-01-16 14:20  https://example.com/b
///   abc123    0       2025-01-15 10:30  https://example.com/a
/// ```
async fn list_links(service: &LinkService) -> Result<()> {
    println!("{}", "🔗 Links".bright_blue().bold());
    println!();

    let links = service
        .list_links()
        .await
        .map_err(|e| anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<9} {:<7} {:<17} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<9} {:<7} {:<17} {}",
            link.short_code.cyan(),
            link.clicks.to_string().bright_green(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            truncate(&link.original_url, 60)
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Prints one link in detail.
async fn show_link(service: &LinkService, code: &str) -> Result<()> {
    let link = service
        .get_link(code)
        .await
        .map_err(|e| anyhow!("{}", e))?;

    print_link(&link);

    Ok(())
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(service: &LinkService, code: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑  Delete Link".bright_blue().bold());
    println!();

    let link = service
        .get_link(code)
        .await
        .map_err(|e| anyhow!("{}", e))?;

    print_link(&link);

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_link(code)
        .await
        .map_err(|e| anyhow!("Failed to delete link: {}", e))?;

    println!();
    println!("{}", "✅ Link deleted".green().bold());
    println!();

    Ok(())
}

/// Displays link and click totals.
async fn handle_stats(service: &LinkService) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let totals = service
        .totals()
        .await
        .map_err(|e| anyhow!("Failed to load statistics: {}", e))?;

    println!(
        "  Links:  {}",
        totals.links.to_string().bright_green().bold()
    );
    println!(
        "  Clicks: {}",
        totals.clicks.to_string().bright_green().bold()
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

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}

fn print_link(link: &Link) {
    let last_clicked = link
        .last_clicked
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());

    println!("  Code:         {}", link.short_code.cyan().bold());
    println!("  URL:          {}", link.original_url);
    println!("  Clicks:       {}", link.clicks.to_string().bright_green());
    println!("  Last clicked: {}", last_clicked.bright_black());
    println!(
        "  Created:      {}",
        link.created_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .bright_black()
    );
    println!();
}

/// Shortens `s` to at most `max` characters, marking the cut with `…`.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }

    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
