//! Role seed import: applies a JSON file of role assignments to the roles
//! database.
//!
//! # Usage
//!
//! ```bash
//! DATABASE_URL=postgres://localhost/roles cargo run -p role-seed -- --file roles.json
//! ```
//!
//! Active entries go through the same assign path as `POST /roles`. Inactive
//! entries are never activated. Running a file twice leaves the same rows with
//! the same active flags.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sea_orm::Database;
use tracing::info;

use gymdash_core::tracing::init_tracing;
use gymdash_roles::infra::db::DbRoleRepository;

mod seed;

#[derive(Parser)]
#[command(about = "Import role assignments from a JSON file")]
struct Args {
    /// JSON array of `{ user_id, email?, role_type, is_active? }`
    #[arg(long)]
    file: PathBuf,

    /// PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("info");
    let args = Args::parse();

    let raw = std::fs::read_to_string(&args.file)
        .with_context(|| format!("cannot read {}", args.file.display()))?;
    let entries = seed::parse(&raw)?;

    let db = Database::connect(&args.database_url)
        .await
        .context("connect to database")?;
    let repo = DbRoleRepository { db };

    let summary = seed::apply(repo, entries).await?;
    info!(
        assigned = summary.assigned,
        deactivated = summary.deactivated,
        "role seed applied"
    );
    Ok(())
}
