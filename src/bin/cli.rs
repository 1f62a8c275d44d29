//! flatstore CLI
//!
//! Command-line interface for a flatstore data directory. Runs the
//! interactive menu when no subcommand is given.

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use flatstore::shell::{self, Shell};
use flatstore::{Config, Result, SyncStrategy, TableStore};
use tracing_subscriber::{fmt, EnvFilter};

/// flatstore CLI
#[derive(Parser, Debug)]
#[command(name = "flatstore-cli")]
#[command(about = "CLI for the flatstore flat-file record store")]
#[command(version)]
struct Args {
    /// Directory holding the table files
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    /// Table file extension
    #[arg(short, long, default_value = ".csv")]
    extension: String,

    /// Don't fsync after writes
    #[arg(long)]
    no_sync: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create (or replace) a table
    Create {
        /// Table name
        table: String,

        /// Columns as name:type,name:type,...
        columns: String,
    },

    /// Append a record
    Insert {
        /// Table name
        table: String,

        /// Record as name=value,name=value,...
        record: String,
    },

    /// Print records matching the criteria (all records if omitted)
    Query {
        /// Table name
        table: String,

        /// Criteria as name=value,name=value,...
        criteria: Option<String>,
    },

    /// Delete records matching all criteria
    Delete {
        /// Table name
        table: String,

        /// Criteria as name=value,name=value,...
        criteria: String,
    },

    /// List tables in the data directory
    Tables,

    /// Interactive menu (default)
    Shell,
}

fn main() {
    // Initialize tracing/logging (stderr, so query output stays clean)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let sync_strategy = if args.no_sync {
        SyncStrategy::OsBuffered
    } else {
        SyncStrategy::EveryWrite
    };

    let config = Config::builder()
        .data_dir(&args.data_dir)
        .file_extension(args.extension)
        .sync_strategy(sync_strategy)
        .build();

    let store = TableStore::open(config)?;

    match args.command.unwrap_or(Commands::Shell) {
        Commands::Create { table, columns } => {
            let columns = shell::parse_columns(&columns)?;
            store.create_table(&table, &columns)?;
            println!("Table '{}' created successfully!", table);
        }
        Commands::Insert { table, record } => {
            let pairs = shell::parse_assignments(&record)?;
            let schema = store.schema(&table)?;
            store.insert(&table, &shell::typed_record(&schema, &pairs))?;
            println!("Record inserted into '{}' successfully!", table);
        }
        Commands::Query { table, criteria } => {
            let pairs = shell::parse_assignments(criteria.as_deref().unwrap_or(""))?;
            let schema = store.schema(&table)?;
            let criteria = shell::typed_criteria(&schema, &pairs);
            for record in store.query(&table, Some(&criteria))? {
                println!("{}", record);
            }
        }
        Commands::Delete { table, criteria } => {
            let pairs = shell::parse_assignments(&criteria)?;
            let schema = store.schema(&table)?;
            let removed = store.delete(&table, &shell::typed_criteria(&schema, &pairs))?;
            println!("{} record(s) deleted from '{}'.", removed, table);
        }
        Commands::Tables => {
            for table in store.list_tables()? {
                println!("{}", table);
            }
        }
        Commands::Shell => {
            tracing::info!("flatstore v{}", flatstore::VERSION);
            let stdin = io::stdin();
            let stdout = io::stdout();
            Shell::new(&store, stdin.lock(), stdout.lock()).run()?;
        }
    }

    Ok(())
}
