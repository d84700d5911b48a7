use clap::{Parser as ClapParser, Subcommand};
use quill_sql::cli::{self, CheckOptions, CliError};
use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "quill")]
#[command(about = "Quill - run SELECT/JOIN/WHERE queries against in-memory JSON tables")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a query against a JSON database
    Query {
        /// The query to execute
        query: String,

        /// JSON database file (reads from stdin if not provided)
        #[arg(short, long)]
        db: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Parse a query and print its syntax tree
    Parse {
        /// The query to parse
        query: String,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// List the tables of a JSON database
    Tables {
        /// JSON database file (reads from stdin if not provided)
        #[arg(short, long)]
        db: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Query { query, db, pretty } => run_check(query, db, pretty, false),
        Commands::Parse { query, pretty } => run_check(query, None, pretty, true),
        Commands::Tables { db } => run_tables(db),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn read_database(path: Option<PathBuf>) -> Result<Option<String>, CliError> {
    match path {
        Some(path) => Ok(Some(fs::read_to_string(path)?)),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(Some(buffer))
        }
        None => Ok(None),
    }
}

fn run_check(
    query: String,
    db: Option<PathBuf>,
    pretty: bool,
    syntax_only: bool,
) -> Result<(), CliError> {
    let database = if syntax_only {
        None
    } else {
        read_database(db)?
    };

    let options = CheckOptions {
        query,
        database,
        syntax_only,
    };

    let result = cli::execute_check(&options)?;
    println!("{}", result.to_json(pretty)?);
    Ok(())
}

fn run_tables(db: Option<PathBuf>) -> Result<(), CliError> {
    let json = read_database(db)?.ok_or(CliError::NoDatabase)?;

    for table in cli::list_tables(&json)? {
        println!("{}\t{} rows\t{}", table.name, table.rows, table.columns.join(", "));
    }
    Ok(())
}
