//! Interactive command-line front end for the campus registry.
//!
//! # Responsibility
//! - Resolve configuration from flags, `CAMPUS_*` variables and `.env`.
//! - Open the database, optionally seed it, then hand over to the prompt.
//! - Only startup failures end the process; command errors are printed.

mod command;
mod repl;

use anyhow::Context;
use campus_core::{
    init_logging, open_pool, open_pool_in_memory, seed_registry, sqlite_registry, AppConfig,
    DbPool, LcgSequence, Repository, SeedPlan, SqliteRegistry,
};
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Level used for stderr logging when none is configured; keeps the prompt readable.
const QUIET_STDERR_LEVEL: &str = "warn";

#[derive(Debug, Parser)]
#[command(name = "campus", version, about = "Student, group and course registry")]
struct Args {
    /// SQLite database file; overrides CAMPUS_DATABASE_PATH. In-memory when unset.
    #[arg(long)]
    database: Option<PathBuf>,

    /// Fill an empty database with generated demo data.
    #[arg(long)]
    seed: bool,

    /// trace|debug|info|warn|error; overrides CAMPUS_LOG_LEVEL.
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = AppConfig::load().context("failed to load configuration")?;

    let level = match (args.log_level.as_deref(), config.log_dir.as_deref()) {
        (Some(level), _) => level,
        (None, Some(_)) => config.log_level_or_default(),
        (None, None) => config.log_level.as_deref().unwrap_or(QUIET_STDERR_LEVEL),
    };
    init_logging(level, config.log_dir.as_deref()).map_err(anyhow::Error::msg)?;

    let pool = open_database(&args, &config)?;
    let registry = sqlite_registry(&pool).context("database schema is incomplete")?;

    if args.seed || config.seed_demo_data_or_default() {
        seed_if_empty(&registry)?;
    }

    repl::run(&registry)
}

fn open_database(args: &Args, config: &AppConfig) -> anyhow::Result<DbPool> {
    let path = args
        .database
        .clone()
        .or_else(|| config.database_path.as_ref().map(PathBuf::from));

    match path {
        Some(path) => open_pool(&path, config.pool_max_size_or_default())
            .with_context(|| format!("failed to open database `{}`", path.display())),
        None => open_pool_in_memory().context("failed to open in-memory database"),
    }
}

fn seed_if_empty(registry: &SqliteRegistry) -> anyhow::Result<()> {
    if !registry.courses().find_all()?.is_empty() {
        info!("event=registry_seed module=cli status=skipped reason=not_empty");
        return Ok(());
    }

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default();
    let summary = seed_registry(
        registry.groups(),
        registry.courses(),
        registry.students(),
        &SeedPlan::default(),
        &mut LcgSequence::new(seed),
    )
    .context("failed to seed demo data")?;

    println!(
        "Seeded {} groups, {} courses, {} students and {} enrollments.",
        summary.groups, summary.courses, summary.students, summary.enrollments
    );
    Ok(())
}
