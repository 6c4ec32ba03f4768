//! CLI administration tool for adserver-rpc.
//!
//! Manages advertisers and publishers, loads statistics rows and checks the
//! database without going through the RPC endpoint.
//!
//! # Usage
//!
//! ```bash
//! # Create an advertiser
//! cargo run --bin admin -- advertiser add --name "Acme"
//!
//! # List advertisers
//! cargo run --bin admin -- advertiser list
//!
//! # Register a publisher
//! cargo run --bin admin -- publisher add --name "Daily News"
//!
//! # Load one hourly statistics row
//! cargo run --bin admin -- stats record --advertiser 1 --publisher 1 \
//!     --hour 2024-03-01T10:00:00Z --requests 100 --impressions 80 --clicks 3 --revenue 1.5
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use adserver_rpc::application::services::AdvertiserService;
use adserver_rpc::domain::entities::{NewAdvertiser, NewPublisher, NewStatsEntry};
use adserver_rpc::domain::repositories::{PublisherRepository, StatsRepository};
use adserver_rpc::infrastructure::persistence::{
    PgAdvertiserRepository, PgPublisherRepository, PgStatsRepository,
};

use anyhow::{Context, Result};
use chrono::{DateTime, Timelike, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing adserver-rpc.
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
    /// Manage advertisers
    Advertiser {
        #[command(subcommand)]
        action: AdvertiserAction,
    },

    /// Manage publishers
    Publisher {
        #[command(subcommand)]
        action: PublisherAction,
    },

    /// Load statistics
    Stats {
        #[command(subcommand)]
        action: StatsAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum AdvertiserAction {
    /// Create an advertiser
    Add {
        /// Advertiser name (prompted when omitted)
        #[arg(short, long)]
        name: Option<String>,

        #[arg(long)]
        contact: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        comments: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List live advertisers
    List,

    /// Soft-delete an advertiser
    Delete {
        id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum PublisherAction {
    /// Register a publisher
    Add {
        #[arg(short, long)]
        name: Option<String>,
    },

    /// List publishers
    List,
}

#[derive(Subcommand)]
enum StatsAction {
    /// Store one hourly row
    Record {
        #[arg(long)]
        advertiser: i64,

        #[arg(long)]
        publisher: i64,

        /// Start of the hour, RFC 3339 (e.g. 2024-03-01T10:00:00Z)
        #[arg(long)]
        hour: DateTime<Utc>,

        #[arg(long, default_value_t = 0)]
        requests: i64,

        #[arg(long, default_value_t = 0)]
        impressions: i64,

        #[arg(long, default_value_t = 0)]
        clicks: i64,

        #[arg(long, default_value_t = 0.0)]
        revenue: f64,
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

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Advertiser { action } => handle_advertiser_action(action, &pool).await?,
        Commands::Publisher { action } => handle_publisher_action(action, &pool).await?,
        Commands::Stats { action } => handle_stats_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_advertiser_action(action: AdvertiserAction, pool: &PgPool) -> Result<()> {
    let service = AdvertiserService::new(Arc::new(PgAdvertiserRepository::new(Arc::new(
        pool.clone(),
    ))));

    match action {
        AdvertiserAction::Add {
            name,
            contact,
            email,
            comments,
            yes,
        } => {
            add_advertiser(
                &service,
                NewAdvertiserArgs {
                    name,
                    contact,
                    email,
                    comments,
                },
                yes,
            )
            .await?
        }
        AdvertiserAction::List => list_advertisers(&service).await?,
        AdvertiserAction::Delete { id, yes } => delete_advertiser(&service, id, yes).await?,
    }

    Ok(())
}

struct NewAdvertiserArgs {
    name: Option<String>,
    contact: Option<String>,
    email: Option<String>,
    comments: Option<String>,
}

async fn add_advertiser(
    service: &AdvertiserService,
    args: NewAdvertiserArgs,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "📣 Create Advertiser".bright_blue().bold());
    println!();

    let name = match args.name {
        Some(n) => n,
        None => Input::new().with_prompt("Advertiser name").interact_text()?,
    };

    println!("  Name:    {}", name.cyan());
    if let Some(ref contact) = args.contact {
        println!("  Contact: {}", contact.cyan());
    }
    if let Some(ref email) = args.email {
        println!("  Email:   {}", email.cyan());
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this advertiser?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let created = service
        .add_advertiser(NewAdvertiser {
            name,
            contact_name: args.contact,
            email: args.email,
            comments: args.comments,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create advertiser: {}", e))?;

    println!();
    println!(
        "{} id {}",
        "✅ Advertiser created:".green().bold(),
        created.id.to_string().bright_yellow().bold()
    );
    println!();

    Ok(())
}

/// Lists live advertisers.
///
/// # Output Format
///
/// ```text
/// 📋 Advertisers
///
///   ID  Name                           Email                          Created
///   ───────────────────────────────────────────────────────────────────────────
///   1   Acme                           ads@acme.test                  2024-01-15 10:30
/// ```
async fn list_advertisers(service: &AdvertiserService) -> Result<()> {
    println!("{}", "📋 Advertisers".bright_blue().bold());
    println!();

    let advertisers = service
        .list_advertisers()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list advertisers: {}", e))?;

    if advertisers.is_empty() {
        println!("{}", "  No advertisers found".yellow());
        println!();
        println!(
            "  Create one with: {} admin advertiser add",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<30} {:<30} {:<16}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Email".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(82).bright_black());

    for advertiser in &advertisers {
        println!(
            "  {:<3} {:<30} {:<30} {}",
            advertiser.id.to_string().bright_black(),
            advertiser.name.cyan(),
            advertiser.email.as_deref().unwrap_or("-"),
            advertiser
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
        );
    }

    println!();
    println!(
        "  Total: {}",
        advertisers.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Soft-deletes an advertiser after confirmation (default: No).
async fn delete_advertiser(service: &AdvertiserService, id: i64, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑  Delete Advertiser".bright_blue().bold());
    println!();

    let advertiser = service
        .get_advertiser(id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  Advertiser: {}", advertiser.name.cyan());
    println!("  ID:         {}", advertiser.id.to_string().bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this advertiser?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_advertiser(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete advertiser: {}", e))?;

    println!("{}", "✅ Advertiser deleted".green().bold());
    println!();

    Ok(())
}

async fn handle_publisher_action(action: PublisherAction, pool: &PgPool) -> Result<()> {
    let repo = PgPublisherRepository::new(Arc::new(pool.clone()));

    match action {
        PublisherAction::Add { name } => {
            let name = match name {
                Some(n) => n,
                None => Input::new().with_prompt("Publisher name").interact_text()?,
            };

            let publisher = repo
                .create(NewPublisher { name })
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create publisher: {}", e))?;

            println!(
                "{} {} (id {})",
                "✅ Publisher created:".green().bold(),
                publisher.name.cyan(),
                publisher.id.to_string().bright_yellow()
            );
        }
        PublisherAction::List => {
            println!("{}", "📋 Publishers".bright_blue().bold());
            println!();

            let publishers = repo
                .list()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list publishers: {}", e))?;

            if publishers.is_empty() {
                println!("{}", "  No publishers found".yellow());
                return Ok(());
            }

            for publisher in &publishers {
                println!(
                    "  {:<5} {}",
                    publisher.id.to_string().bright_black(),
                    publisher.name.cyan()
                );
            }
            println!();
        }
    }

    Ok(())
}

async fn handle_stats_action(action: StatsAction, pool: &PgPool) -> Result<()> {
    let repo = PgStatsRepository::new(Arc::new(pool.clone()));

    match action {
        StatsAction::Record {
            advertiser,
            publisher,
            hour,
            requests,
            impressions,
            clicks,
            revenue,
        } => {
            let hour_start = hour
                .with_minute(0)
                .and_then(|h| h.with_second(0))
                .and_then(|h| h.with_nanosecond(0))
                .context("Invalid hour")?;

            repo.record(NewStatsEntry {
                advertiser_id: advertiser,
                publisher_id: publisher,
                hour_start,
                requests,
                impressions,
                clicks,
                revenue,
            })
            .await
            .map_err(|e| anyhow::anyhow!("Failed to record statistics: {}", e))?;

            println!(
                "{} advertiser {} / publisher {} at {}",
                "✅ Recorded".green().bold(),
                advertiser.to_string().cyan(),
                publisher.to_string().cyan(),
                hour_start.to_rfc3339().bright_black()
            );
        }
    }

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

            let advertisers: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM advertisers WHERE deleted_at IS NULL")
                    .fetch_one(pool)
                    .await?;
            let publishers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM publishers")
                .fetch_one(pool)
                .await?;
            let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM stats_hourly")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL:  {}", version.bright_white());
            println!(
                "  Advertisers: {}",
                advertisers.to_string().bright_green().bold()
            );
            println!(
                "  Publishers:  {}",
                publishers.to_string().bright_green().bold()
            );
            println!("  Stats rows:  {}", rows.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}
