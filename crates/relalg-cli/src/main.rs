//! relalg CLI: run the movie database demo and inspect saved slots.

mod movies;

use std::error::Error;

use clap::{Parser, Subcommand};
use relalg_core::config::EngineConfig;
use relalg_core::prelude::{IndexKind, Key, Table, Tuple, Value};
use relalg_operators::{ExecContext, OpError, Relational};
use relalg_store::{Catalog, Codec};
use tracing::info;
use tracing_subscriber::EnvFilter;

use movies::MovieDb;

type CliResult<T> = Result<T, Box<dyn Error>>;

#[derive(Parser)]
#[command(name = "relalg")]
#[command(about = "In-memory relational algebra over typed tables", long_about = None)]
struct Cli {
    /// Snapshot directory (overrides RELALG_STORE_DIR)
    #[arg(long, global = true)]
    store: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the movie database, run every operator and print the results
    Demo {
        /// Key index backing: hash or btree (overrides RELALG_INDEX)
        #[arg(long)]
        index: Option<IndexKind>,

        /// Snapshot codec: none, zstd or lz4 (overrides RELALG_CODEC)
        #[arg(long)]
        codec: Option<String>,

        /// Save the base tables to the store directory
        #[arg(long)]
        save: bool,
    },

    /// Print a saved table
    Show {
        /// Slot name (table name)
        #[arg(short, long)]
        slot: String,

        /// Also print the key index
        #[arg(long)]
        index: bool,
    },

    /// List saved slots
    List,
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let mut config = EngineConfig::from_env();
    if let Some(dir) = cli.store {
        config.store_dir = dir;
    }

    let result = match cli.command {
        Commands::Demo { index, codec, save } => {
            if let Some(kind) = index {
                config.index_kind = kind;
            }
            if let Some(codec) = codec {
                config.snapshot_codec = codec;
            }
            run_demo(&config, save)
        }
        Commands::Show { slot, index } => show_slot(&config, &slot, index),
        Commands::List => list_slots(&config),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

fn run_demo(config: &EngineConfig, save: bool) -> CliResult<()> {
    let db = MovieDb::build(config.index_kind)?;
    let mut ctx = ExecContext::from_config(config);
    info!(index = %config.index_kind, suffix = ctx.rename_suffix(), "movie database ready");

    for table in db.tables() {
        println!("{table}");
    }

    let title_col = db.movie.col("title").ok_or("movie has no title")?;

    let queries: Vec<(&str, Result<Table, OpError>)> = vec![
        ("movie.project(title year)", db.movie.project("title year", &mut ctx)),
        (
            "movie.select(title == Star_Wars)",
            db.movie.select(
                |t: &Tuple| t[title_col] == Value::from("Star_Wars"),
                &mut ctx,
            ),
        ),
        ("movie.select_where(year < 1980)", db.movie.select_where("year < 1980", &mut ctx)),
        (
            "movieStar.select_key(Harrison_Ford)",
            db.movie_star.select_key(&Key::single("Harrison_Ford"), &mut ctx),
        ),
        ("movie.union(cinema)", db.movie.union(&db.cinema, &mut ctx)),
        ("movie.minus(cinema)", db.movie.minus(&db.cinema, &mut ctx)),
        ("movie.intersect(cinema)", db.movie.intersect(&db.cinema, &mut ctx)),
        (
            "movie.join(studioName, name, studio)",
            db.movie.join("studioName", "name", &db.studio, &mut ctx),
        ),
        (
            "movie.theta_join(producerNo > presNo, studio)",
            db.movie.theta_join("producerNo > presNo", &db.studio, &mut ctx),
        ),
        (
            "movie.index_join(title year, movieTitle movieYear, starsIn)",
            db.movie.index_join("title year", "movieTitle movieYear", &db.stars_in, &mut ctx),
        ),
        (
            "movieExec.join(address, address, movieStar)",
            db.movie_exec.join("address", "address", &db.movie_star, &mut ctx),
        ),
        ("movie.natural_join(cinema)", db.movie.natural_join(&db.cinema, &mut ctx)),
        (
            "movie.hash_join(studioName, name, studio)",
            db.movie.hash_join("studioName", "name", &db.studio, &mut ctx),
        ),
    ];

    for (label, result) in queries {
        println!("RA> {label}");
        match result {
            Ok(table) => println!("{table}"),
            Err(OpError::Unsupported(op)) => println!("  ({op} is not implemented)\n"),
            Err(e) => return Err(e.into()),
        }
    }

    if save {
        let catalog = Catalog::from_config(config)?;
        for table in db.tables() {
            let slot = catalog.save(table)?;
            println!("saved {} -> {}/{slot}", table.name(), config.store_dir);
        }
    }
    Ok(())
}

fn show_slot(config: &EngineConfig, slot: &str, index: bool) -> CliResult<()> {
    let catalog = open_catalog(config)?;
    let table = catalog.load(slot)?;
    println!("{table}");
    if index {
        println!("{}", table.index_listing());
    }
    Ok(())
}

fn list_slots(config: &EngineConfig) -> CliResult<()> {
    let catalog = open_catalog(config)?;
    for slot in catalog.slots()? {
        println!("{slot}");
    }
    Ok(())
}

/// Readers detect the codec from each snapshot header, so an unknown
/// `RELALG_CODEC` only matters when saving.
fn open_catalog(config: &EngineConfig) -> CliResult<Catalog> {
    let codec = Codec::from_name(&config.snapshot_codec).unwrap_or_default();
    Ok(Catalog::new(
        Box::new(relalg_store::FsStorage::new(&config.store_dir)),
        codec,
    ))
}
