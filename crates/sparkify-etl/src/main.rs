//! sparkify-etl binary.
//!
//! Reads `sparkify.toml` (or the path given with `--config`) and `SPARKIFY_*`
//! environment variables, opens the SQLite warehouse, and loads the song
//! catalog followed by the event logs.
//!
//! ```sh
//! SPARKIFY_LOG_ROOT=data/log_data cargo run -p sparkify-etl -- --reset
//! ```

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use sparkify_core::warehouse::Warehouse;
use sparkify_etl::{EtlConfig, Inputs, Pipeline};
use sparkify_store_sqlite::SqliteWarehouse;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Load Sparkify song catalog and event logs into SQLite")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "sparkify.toml")]
  config: PathBuf,

  /// Drop and recreate every table before loading.
  #[arg(long)]
  reset: bool,
}

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let cfg = EtlConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;

  // Both roots are walked before the database is touched.
  let inputs = Inputs::discover(&cfg).context("failed to discover input files")?;

  let mut warehouse = SqliteWarehouse::open(&cfg.database)
    .with_context(|| format!("failed to open warehouse at {:?}", cfg.database))?;

  if cli.reset {
    warehouse.reset().context("failed to reset tables")?;
  }

  let report = Pipeline::new(&mut warehouse, cfg.batch_commit_size)
    .run(&inputs)
    .context("load aborted")?;

  let counts = warehouse.counts().context("failed to count rows")?;

  tracing::info!(
    catalog_files = report.catalog.files,
    log_files = report.events.files,
    plays = report.events.plays,
    resolved = report.events.resolved,
    unresolved = report.events.unresolved(),
    "load complete"
  );
  tracing::info!(
    songs = counts.songs,
    artists = counts.artists,
    users = counts.users,
    time = counts.time,
    songplays = counts.songplays,
    "table row counts"
  );

  Ok(())
}
