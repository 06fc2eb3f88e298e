//! Knox CLI - command-line tools for the Knox front end.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

/// Knox - inspect tokens and syntax trees
#[derive(Parser)]
#[command(name = "knox")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tokenize a Knox file and show tokens
    Lex {
        /// Input file
        file: PathBuf,
    },

    /// List every node kind and the children it takes
    Kinds,

    /// Load a JSON syntax tree, check it, and print it
    Tree {
        /// JSON file holding the root node
        file: PathBuf,
        /// Character repeated once per nesting level
        #[arg(long, default_value_t = '>')]
        marker: char,
        /// Do not print symbol tables
        #[arg(long)]
        no_scopes: bool,
        /// Append source positions to each node
        #[arg(long)]
        positions: bool,
    },
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    // Set up logging; RUST_LOG wins over --verbose
    let default = if cli.verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    match cli.command {
        Commands::Lex { file } => commands::lex::run(&file),
        Commands::Kinds => commands::kinds::run(),
        Commands::Tree {
            file,
            marker,
            no_scopes,
            positions,
        } => {
            let options = knox_ast::PrintOptions {
                marker,
                show_scopes: !no_scopes,
                show_positions: positions,
            };
            commands::tree::run(&file, &options)
        }
    }
}
