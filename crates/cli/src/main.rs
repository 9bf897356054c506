mod seed;
mod stats;

use anyhow::Result;
use bookstore_store::BookstoreDb;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bookstore", about = "Bookstore database admin tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database file and apply migrations
    Init {
        /// Database path (defaults to the platform data dir)
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Populate a fresh database with a small demo catalog
    Seed {
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Print row counts per table
    Stats {
        #[arg(long)]
        db: Option<PathBuf>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { db } => run_init(db),
        Commands::Seed { db } => seed::run_seed(db),
        Commands::Stats { db, json } => stats::run_stats(db, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run_init(db: Option<PathBuf>) -> Result<()> {
    let path = resolve_db_path(db)?;
    BookstoreDb::open_path(&path)?;
    println!("Database ready at {}", path.display());
    Ok(())
}

pub(crate) fn resolve_db_path(db: Option<PathBuf>) -> Result<PathBuf> {
    match db {
        Some(path) => Ok(path),
        None => Ok(bookstore_store::default_db_path()?),
    }
}

pub(crate) fn open_db(db: Option<PathBuf>) -> Result<BookstoreDb> {
    let path = resolve_db_path(db)?;
    Ok(BookstoreDb::open_path(&path)?)
}
