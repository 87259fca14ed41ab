//! Card-store subcommands plus the offline helpers (`resolve`, `parse`,
//! `validate`).

use std::io::Read;
use std::path::Path;

use previewdeck_sheet::{export_url, parse_csv};

use crate::config::Config;
use crate::exit_codes::{EXIT_ERROR, EXIT_INVALID_SOURCE, EXIT_USAGE};
use crate::{open_store, CliError};

pub fn cmd_cards_list(config_path: Option<&Path>, json: bool) -> Result<(), CliError> {
    let config = Config::load(config_path).map_err(CliError::config)?;
    let store = open_store(&config)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(store.cards()).map_err(CliError::internal)?
        );
        return Ok(());
    }

    if store.is_empty() {
        eprintln!("no cards saved ({})", store.path().display());
        return Ok(());
    }
    for card in store.cards() {
        match &card.category {
            Some(category) => println!("{}  [{}]  {}", card.url, category, card.title),
            None => println!("{}  {}", card.url, card.title),
        }
    }
    Ok(())
}

pub fn cmd_cards_remove(config_path: Option<&Path>, url: &str) -> Result<(), CliError> {
    let config = Config::load(config_path).map_err(CliError::config)?;
    let mut store = open_store(&config)?;

    if !store.remove(url) {
        return Err(CliError::new(EXIT_ERROR, format!("no card with URL {url}"))
            .with_hint("`pdeck cards list` shows the exact URLs"));
    }
    store.save().map_err(CliError::store)?;
    Ok(())
}

pub fn cmd_cards_clear(config_path: Option<&Path>, quiet: bool) -> Result<(), CliError> {
    let config = Config::load(config_path).map_err(CliError::config)?;
    let mut store = open_store(&config)?;

    let removed = store.len();
    store.clear();
    store.save().map_err(CliError::store)?;
    if !quiet {
        eprintln!("removed {removed} card(s)");
    }
    Ok(())
}

pub fn cmd_categories(config_path: Option<&Path>) -> Result<(), CliError> {
    let config = Config::load(config_path).map_err(CliError::config)?;
    let store = open_store(&config)?;
    for label in store.categories() {
        println!("{label}");
    }
    Ok(())
}

/// Print the CSV-export URL for a shareable spreadsheet link.
pub fn cmd_resolve(share_url: &str) -> Result<(), CliError> {
    let csv_url =
        export_url(share_url).map_err(|e| CliError::new(EXIT_INVALID_SOURCE, e.to_string()))?;
    println!("{csv_url}");
    Ok(())
}

/// Parse delimited text from a file (or stdin) into records, as JSON.
pub fn cmd_parse(input: Option<&Path>) -> Result<(), CliError> {
    let text = match input {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            CliError::new(EXIT_USAGE, format!("cannot read {}: {e}", path.display()))
        })?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| CliError::new(EXIT_ERROR, format!("cannot read stdin: {e}")))?;
            buf
        }
    };

    let records = parse_csv(&text);
    println!("{}", serde_json::to_string_pretty(&records).map_err(CliError::internal)?);
    Ok(())
}

/// Load and validate the config, reporting what will be used.
pub fn cmd_validate(config_path: Option<&Path>) -> Result<(), CliError> {
    let config = Config::load(config_path).map_err(CliError::config)?;
    eprintln!("config OK");
    match &config.sheet_url {
        Some(url) => eprintln!("  sheet_url: {url}"),
        None => eprintln!("  sheet_url: (unset; --sheet-url or PDECK_SHEET_URL required)"),
    }
    eprintln!("  url columns: {}", config.columns.url.join(", "));
    eprintln!("  title columns: {}", config.columns.title.join(", "));
    eprintln!("  category column: {}", config.columns.category);
    eprintln!(
        "  metadata: {} (proxy {}, timeout {}s)",
        if config.metadata.enabled { "enabled" } else { "disabled" },
        config.metadata.proxy_base,
        config.metadata.timeout_secs,
    );
    Ok(())
}
