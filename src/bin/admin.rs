//! CLI administration tool for library-backend.
//!
//! Provides commands for seeding data, browsing books, viewing URL
//! processing statistics and checking the database without going through
//! the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Insert the sample books into an empty database
//! cargo run --bin admin -- seed
//!
//! # List books, optionally filtered
//! cargo run --bin admin -- books list --author martin --limit 5
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Normalize a URL without touching the database
//! cargo run --bin admin -- normalize "https://BYFOOD.com/food-EXPeriences?query=abc/" all
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_USER`/`DB_PASSWORD`/`DB_NAME`: PostgreSQL connection
//!   (not needed for `normalize`)

use library_backend::application::services::{BookService, UrlService};
use library_backend::config::Config;
use library_backend::domain::query::BookFilter;
use library_backend::infrastructure::persistence::{
    MIGRATOR, PgBookRepository, PgUrlLogRepository, seed_sample_books,
};
use library_backend::server::connect_pool;
use library_backend::utils::url_normalizer::{UrlOperation, normalize};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing library-backend.
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
    /// Insert sample books into an empty database
    Seed {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Browse books
    Books {
        #[command(subcommand)]
        action: BooksAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Normalize a URL locally (nothing is recorded)
    Normalize {
        /// URL to normalize
        url: String,

        /// One of: canonical, redirection, all
        #[arg(default_value = "all")]
        operation: String,
    },
}

/// Book subcommands.
#[derive(Subcommand)]
enum BooksAction {
    /// List live books, newest first
    List {
        /// Title substring (case-insensitive)
        #[arg(long)]
        title: Option<String>,

        /// Author substring (case-insensitive)
        #[arg(long)]
        author: Option<String>,

        /// Exact publication year
        #[arg(long)]
        year: Option<i32>,

        /// Page size (1-100)
        #[arg(short, long, default_value_t = 10)]
        limit: i64,

        /// Items to skip
        #[arg(short, long, default_value_t = 0)]
        offset: i64,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info and migration status
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Seed { yes } => handle_seed(&connect().await?, yes).await?,
        Commands::Books { action } => handle_books_action(action, &connect().await?).await?,
        Commands::Stats => handle_stats(&connect().await?).await?,
        Commands::Db { action } => handle_db_action(action, &connect().await?).await?,
        Commands::Normalize { url, operation } => handle_normalize(&url, &operation)?,
    }

    Ok(())
}

/// Connects using the same settings and retry policy as the server.
async fn connect() -> Result<PgPool> {
    let config = Config::from_env()?;
    connect_pool(&config).await
}

fn book_service(pool: &PgPool) -> BookService<PgBookRepository> {
    BookService::new(Arc::new(PgBookRepository::new(Arc::new(pool.clone()))))
}

/// Applies migrations and inserts the sample books.
///
/// Does nothing when live books already exist.
async fn handle_seed(pool: &PgPool, skip_confirm: bool) -> Result<()> {
    println!("{}", "🌱 Seed Sample Data".bright_blue().bold());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Insert the sample books if the library is empty?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    MIGRATOR
        .run(pool)
        .await
        .context("Failed to run database migrations")?;

    let repo = PgBookRepository::new(Arc::new(pool.clone()));
    let inserted = seed_sample_books(&repo)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to seed books: {}", e))?;

    println!();
    if inserted == 0 {
        println!("{}", "⚠️  Books already present, nothing inserted".yellow());
    } else {
        println!(
            "{} {}",
            "✅ Inserted books:".green().bold(),
            inserted.to_string().bright_white().bold()
        );
    }
    println!();

    Ok(())
}

/// Dispatches book commands.
async fn handle_books_action(action: BooksAction, pool: &PgPool) -> Result<()> {
    match action {
        BooksAction::List {
            title,
            author,
            year,
            limit,
            offset,
        } => {
            let filter = BookFilter {
                title,
                author,
                year,
                limit: Some(limit),
                offset: Some(offset),
            };
            list_books(pool, filter).await?;
        }
    }

    Ok(())
}

/// Lists books in a table.
///
/// # Output Format
///
/// ```text
/// 📚 Books
///
///   ID   Title                          Author                Year  ISBN
///   ─────────────────────────────────────────────────────────────────────────────
///   4    Microservices Patterns         Chris Richardson      2018  -
///   3    Design Patterns                Gang of Four          1994  9780201633610
///
///   Showing 2 of 4 (page 1/1)
/// ```
async fn list_books(pool: &PgPool, filter: BookFilter) -> Result<()> {
    println!("{}", "📚 Books".bright_blue().bold());
    println!();

    let page = book_service(pool)
        .list(filter)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list books: {}", e))?;

    if page.books.is_empty() {
        println!("{}", "  No books found".yellow());
        println!();
        return Ok(());
    }

    println!(
        "  {:<4} {:<30} {:<21} {:<5} {:<13}",
        "ID".bright_white().bold(),
        "Title".bright_white().bold(),
        "Author".bright_white().bold(),
        "Year".bright_white().bold(),
        "ISBN".bright_white().bold()
    );
    println!("  {}", "─".repeat(77).bright_black());

    for book in &page.books {
        println!(
            "  {:<4} {:<30} {:<21} {:<5} {}",
            book.id.to_string().bright_black(),
            truncate(&book.title, 30).cyan(),
            truncate(&book.author, 21),
            book.year,
            book.isbn.as_deref().unwrap_or("-").bright_black()
        );
    }

    println!();
    println!(
        "  Showing {} of {} (page {}/{})",
        page.books.len().to_string().bright_white().bold(),
        page.total.to_string().bright_white().bold(),
        page.query.page(),
        page.query.total_pages(page.total).max(1)
    );
    println!();

    Ok(())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut short: String = text.chars().take(width.saturating_sub(1)).collect();
    short.push('…');
    short
}

/// Displays system statistics.
///
/// Shows:
/// - Number of live books
/// - URL normalizations, total and per operation
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let books_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE deleted_at IS NULL")
            .fetch_one(pool)
            .await?;

    let url_service = UrlService::new(Arc::new(PgUrlLogRepository::new(Arc::new(pool.clone()))));
    let stats = url_service
        .stats()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load URL statistics: {}", e))?;

    println!(
        "  Books:           {}",
        books_count.to_string().bright_green().bold()
    );
    println!(
        "  URLs processed:  {}",
        stats.total_requests.to_string().bright_green().bold()
    );
    for operation in UrlOperation::VARIANTS {
        let count = stats
            .by_operation
            .get(operation.as_str())
            .copied()
            .unwrap_or(0);
        println!(
            "    {:<14} {}",
            operation.as_str().cyan(),
            count.to_string().bright_white()
        );
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            book_service(pool)
                .ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let applied: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM _sqlx_migrations WHERE success",
            )
            .fetch_one(pool)
            .await
            .unwrap_or(0);
            let bundled = MIGRATOR.iter().count();

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  Migrations: {} applied / {} bundled",
                applied.to_string().bright_white(),
                bundled.to_string().bright_white()
            );
            println!();
        }
    }

    Ok(())
}

/// Normalizes a URL and prints the result.
fn handle_normalize(url: &str, operation: &str) -> Result<()> {
    let operation: UrlOperation = operation
        .parse()
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    let processed = normalize(url, operation).map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  Original:  {}", url.bright_black());
    println!("  Operation: {}", operation.as_str().cyan());
    println!("  Processed: {}", processed.bright_green().bold());

    Ok(())
}
