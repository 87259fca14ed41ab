// pdeck - turn a shared spreadsheet into a deck of link-preview cards

mod cards;
mod config;
mod exit_codes;
mod refresh;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::{EXIT_CONFIG, EXIT_ERROR, EXIT_STORE, EXIT_SUCCESS};

use config::{Config, ConfigError};
use previewdeck_store::{CardStore, StoreError};
use refresh::RefreshArgs;

#[derive(Parser)]
#[command(name = "pdeck")]
#[command(about = "Turn a shared spreadsheet into a deck of link-preview cards")]
#[command(version)]
struct Cli {
    /// Config file (default: ./pdeck.toml if present)
    #[arg(long, short = 'c', global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the sheet and create cards for every new row
    #[command(after_help = "\
Examples:
  pdeck refresh --sheet-url 'https://docs.google.com/spreadsheets/d/ID/edit#gid=0'
  PDECK_SHEET_URL='https://docs.google.com/spreadsheets/d/ID/edit' pdeck refresh
  pdeck refresh --dry-run
  pdeck refresh --json --no-metadata")]
    Refresh {
        /// Shareable spreadsheet link (overrides the config file)
        #[arg(long, env = "PDECK_SHEET_URL")]
        sheet_url: Option<String>,

        /// Plan the batch and print would-be card URLs without saving
        #[arg(long)]
        dry_run: bool,

        /// Print the run report as JSON to stdout
        #[arg(long)]
        json: bool,

        /// Skip page-metadata enrichment
        #[arg(long)]
        no_metadata: bool,

        /// Suppress warnings and the summary line
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Print the CSV-export URL for a shareable spreadsheet link
    #[command(after_help = "\
Examples:
  pdeck resolve 'https://docs.google.com/spreadsheets/d/ID/edit#gid=123456'")]
    Resolve {
        /// Shareable spreadsheet link
        url: String,
    },

    /// Parse delimited text into records and print them as JSON
    #[command(after_help = "\
Examples:
  pdeck parse export.csv
  curl -s \"$CSV_URL\" | pdeck parse")]
    Parse {
        /// Input file (omit to read from stdin)
        input: Option<PathBuf>,
    },

    /// Inspect or edit the saved cards
    Cards {
        #[command(subcommand)]
        command: CardCommands,
    },

    /// List the distinct category labels across saved cards
    Categories,

    /// Check the config file and print the effective settings
    Validate,
}

#[derive(Subcommand)]
enum CardCommands {
    /// List saved cards
    List {
        /// Full card data as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove the card with this canonical URL
    Remove {
        url: String,
    },
    /// Remove every saved card
    Clear {
        #[arg(long, short = 'q')]
        quiet: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let result = match cli.command {
        None => {
            eprintln!("Usage: pdeck <command> [options]");
            eprintln!("       pdeck --help for more information");
            Ok(())
        }
        Some(Commands::Refresh { sheet_url, dry_run, json, no_metadata, quiet }) => {
            refresh::cmd_refresh(RefreshArgs {
                config_path,
                sheet_url: sheet_url.as_deref(),
                dry_run,
                json,
                no_metadata,
                quiet,
            })
        }
        Some(Commands::Resolve { url }) => cards::cmd_resolve(&url),
        Some(Commands::Parse { input }) => cards::cmd_parse(input.as_deref()),
        Some(Commands::Cards { command }) => match command {
            CardCommands::List { json } => cards::cmd_cards_list(config_path, json),
            CardCommands::Remove { url } => cards::cmd_cards_remove(config_path, &url),
            CardCommands::Clear { quiet } => cards::cmd_cards_clear(config_path, quiet),
        },
        Some(Commands::Categories) => cards::cmd_categories(config_path),
        Some(Commands::Validate) => cards::cmd_validate(config_path),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, message: impl Into<String>) -> Self {
        Self { code, message: message.into(), hint: None }
    }

    pub fn config(err: ConfigError) -> Self {
        Self::new(EXIT_CONFIG, err.to_string())
    }

    pub fn store(err: StoreError) -> Self {
        Self::new(EXIT_STORE, err.to_string())
    }

    pub fn internal(err: impl std::fmt::Display) -> Self {
        Self::new(EXIT_ERROR, err.to_string())
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Open the card store at the configured path, else the platform default.
fn open_store(config: &Config) -> Result<CardStore, CliError> {
    match &config.store.path {
        Some(path) => CardStore::load(path).map_err(CliError::store),
        None => CardStore::open_default().map_err(CliError::store),
    }
}
