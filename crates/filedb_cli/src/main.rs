//! filedb CLI
//!
//! Command-line tools for filedb database directories.
//!
//! # Commands
//!
//! - `tables` - List tables with record counts
//! - `create-table` / `drop-table` - Manage tables
//! - `add` / `get` / `update` / `delete` - Record CRUD
//! - `dump` - Print every record of a table
//! - `inspect` - Display database statistics

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// filedb command-line database tools.
#[derive(Parser)]
#[command(name = "filedb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the database directory
    #[arg(global = true, short, long)]
    path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List tables and their record counts
    Tables {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Create an empty table (creates the database directory if needed)
    CreateTable {
        /// Table name
        name: String,
    },

    /// Drop a table and delete its file
    DropTable {
        /// Table name
        name: String,
    },

    /// Append a record and print its assigned ID
    Add {
        /// Table name
        table: String,
        /// Record payload as JSON
        data: String,
        /// Store the payload as a plain string instead of parsing JSON
        #[arg(short, long)]
        string: bool,
    },

    /// Print one record
    Get {
        /// Table name
        table: String,
        /// Record ID
        id: u64,
    },

    /// Replace the payload of a record
    Update {
        /// Table name
        table: String,
        /// Record ID
        id: u64,
        /// New payload as JSON
        data: String,
        /// Store the payload as a plain string instead of parsing JSON
        #[arg(short, long)]
        string: bool,
    },

    /// Delete a record
    Delete {
        /// Table name
        table: String,
        /// Record ID
        id: u64,
    },

    /// Print every record of a table in order
    Dump {
        /// Table name
        table: String,
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Display database statistics
    Inspect {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Tables { format } => {
            let path = cli.path.ok_or("Database path required for tables")?;
            commands::tables::list(&path, &format)?;
        }
        Commands::CreateTable { name } => {
            let path = cli.path.ok_or("Database path required for create-table")?;
            commands::tables::create(&path, &name)?;
        }
        Commands::DropTable { name } => {
            let path = cli.path.ok_or("Database path required for drop-table")?;
            commands::tables::drop(&path, &name)?;
        }
        Commands::Add {
            table,
            data,
            string,
        } => {
            let path = cli.path.ok_or("Database path required for add")?;
            let data = commands::parse_payload(&data, string)?;
            let id = commands::records::add(&path, &table, data)?;
            println!("{}", id.as_u64());
        }
        Commands::Get { table, id } => {
            let path = cli.path.ok_or("Database path required for get")?;
            commands::records::get(&path, &table, id)?;
        }
        Commands::Update {
            table,
            id,
            data,
            string,
        } => {
            let path = cli.path.ok_or("Database path required for update")?;
            let data = commands::parse_payload(&data, string)?;
            commands::records::update(&path, &table, id, data)?;
        }
        Commands::Delete { table, id } => {
            let path = cli.path.ok_or("Database path required for delete")?;
            commands::records::delete(&path, &table, id)?;
        }
        Commands::Dump { table, format } => {
            let path = cli.path.ok_or("Database path required for dump")?;
            commands::records::dump(&path, &table, &format)?;
        }
        Commands::Inspect { format } => {
            let path = cli.path.ok_or("Database path required for inspect")?;
            commands::inspect::run(&path, &format)?;
        }
        Commands::Version => {
            println!("filedb CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("filedb Core v{}", filedb_core::VERSION);
        }
    }

    Ok(())
}
