//! Command-line interface for bookdesk.
//!
//! With no subcommand (or `shell`) runs the interactive menu. The remaining
//! subcommands are read-only views of a freshly seeded library.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::builder::FalseyValueParser;
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use crate::config::{self, ConfigOptions, ResolvedConfig};
use crate::core::Library;
use crate::domain::Book;

pub mod render;
pub mod shell;

pub use shell::{MenuChoice, Shell};

/// bookdesk - In-memory library catalog with checkout tracking
#[derive(Parser, Debug)]
#[command(name = "bookdesk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to .bookdesk/config.yaml in this or a parent directory)
    #[arg(long, global = true, env = "BOOKDESK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Start with an empty catalog and roster (env: any value but 0/false/no/off)
    #[arg(
        long,
        global = true,
        env = "BOOKDESK_NO_SEED",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub no_seed: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive menu (default)
    Shell,

    /// List all books
    Books {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all patrons
    Patrons {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find books by author (case-insensitive exact match)
    Search {
        /// Author name
        #[arg(short, long)]
        author: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let options = ConfigOptions {
            config_path: self.config,
            no_seed: self.no_seed,
        };
        let config = config::resolve(&options)?;

        match self.command.unwrap_or(Commands::Shell) {
            Commands::Shell => run_shell(&config),
            Commands::Books { json } => list_books(&config, json),
            Commands::Patrons { json } => list_patrons(&config, json),
            Commands::Search { author, json } => search_author(&config, &author, json),
            Commands::Config => show_config(&config),
        }
    }
}

fn open_library(config: &ResolvedConfig) -> Result<Library> {
    Library::seeded(&config.seed).context("Failed to seed library")
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Run the interactive menu on stdin/stdout
fn run_shell(config: &ResolvedConfig) -> Result<()> {
    let mut library = open_library(config)?;
    debug!("Starting interactive shell");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(stdin.lock(), stdout.lock(), config.shell.clone());
    shell.run(&mut library)
}

/// List all books in the seeded library
fn list_books(config: &ResolvedConfig, json: bool) -> Result<()> {
    let library = open_library(config)?;

    if json {
        return print_json(library.catalog().books());
    }
    render::books(&mut io::stdout().lock(), library.catalog())?;
    Ok(())
}

/// List all patrons in the seeded library
fn list_patrons(config: &ResolvedConfig, json: bool) -> Result<()> {
    let library = open_library(config)?;

    if json {
        return print_json(library.roster().patrons());
    }
    render::patrons(&mut io::stdout().lock(), library.roster())?;
    Ok(())
}

/// Search the seeded library by author
fn search_author(config: &ResolvedConfig, author: &str, json: bool) -> Result<()> {
    let library = open_library(config)?;
    let catalog = library.catalog();

    if json {
        let matches: Vec<&Book> = catalog
            .find_all_by_author(author)
            .map(|book| catalog.get(book))
            .collect();
        return print_json(&matches);
    }
    render::author_search(&mut io::stdout().lock(), catalog, author)?;
    Ok(())
}

/// Show resolved configuration
fn show_config(config: &ResolvedConfig) -> Result<()> {
    println!("bookdesk configuration");
    println!("======================\n");

    match &config.config_file {
        Some(path) => println!("Config file: {}", path.display()),
        None => println!("Config file: (none found, using defaults)"),
    }

    println!("\nShell:");
    println!("  Prompt:    {:?}", config.shell.prompt);
    println!("  Show menu: {}", config.shell.show_menu);

    println!("\nSeed:");
    println!("  Books:   {}", config.seed.books.len());
    for book in &config.seed.books {
        println!("    {} ({}, {})", book.title, book.author, book.year);
    }
    println!("  Patrons: {}", config.seed.patrons.len());
    for patron in &config.seed.patrons {
        println!("    {} [{}]", patron.name, patron.id);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_shell() {
        let cli = Cli::try_parse_from(["bookdesk"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_no_seed_env_values() {
        // Only this test touches BOOKDESK_NO_SEED
        let cases = [
            ("1", true),
            ("yes", true),
            ("true", true),
            ("0", false),
            ("false", false),
        ];
        for (value, expected) in cases {
            std::env::set_var("BOOKDESK_NO_SEED", value);
            let cli = Cli::try_parse_from(["bookdesk", "patrons"]).unwrap();
            assert_eq!(cli.no_seed, expected, "BOOKDESK_NO_SEED={}", value);
        }
        std::env::remove_var("BOOKDESK_NO_SEED");

        let cli = Cli::try_parse_from(["bookdesk", "--no-seed", "books"]).unwrap();
        assert!(cli.no_seed);
    }

    #[test]
    fn test_search_args() {
        let cli = Cli::try_parse_from(["bookdesk", "search", "--author", "Frank Herbert", "--json"])
            .unwrap();
        match cli.command {
            Some(Commands::Search { author, json }) => {
                assert_eq!(author, "Frank Herbert");
                assert!(json);
            }
            other => panic!("Expected search command, got {:?}", other),
        }
    }
}
