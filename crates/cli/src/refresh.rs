//! `pdeck refresh` — the full ingestion run.
//!
//! Resolve the share link, download the CSV export, plan the batch against
//! the saved cards, then emit new cards sequentially with best-effort
//! metadata enrichment.

use std::path::Path;
use std::time::Duration;

use previewdeck_client::{ExportClient, MetadataClient};
use previewdeck_ingest::{plan, run, IngestPlan, MetadataSource, SkipReason};
use previewdeck_sheet::{export_url, parse_csv};
use previewdeck_store::CardStore;

use crate::config::Config;
use crate::exit_codes::{EXIT_FETCH, EXIT_INVALID_SOURCE, EXIT_USAGE};
use crate::{open_store, CliError};

const EXPORT_TIMEOUT_SECS: u64 = 30;

pub struct RefreshArgs<'a> {
    pub config_path: Option<&'a Path>,
    pub sheet_url: Option<&'a str>,
    pub dry_run: bool,
    pub json: bool,
    pub no_metadata: bool,
    pub quiet: bool,
}

pub fn cmd_refresh(args: RefreshArgs<'_>) -> Result<(), CliError> {
    let config = Config::load(args.config_path).map_err(CliError::config)?;

    let share_url = args
        .sheet_url
        .or(config.sheet_url.as_deref())
        .ok_or_else(|| {
            CliError::new(EXIT_USAGE, "no sheet URL given").with_hint(
                "pass --sheet-url, set PDECK_SHEET_URL, or set sheet_url in pdeck.toml",
            )
        })?;

    let csv_url = export_url(share_url)
        .map_err(|e| CliError::new(EXIT_INVALID_SOURCE, e.to_string()))?;

    let exporter = ExportClient::new(Duration::from_secs(EXPORT_TIMEOUT_SECS));
    let text = exporter.fetch_csv(&csv_url).map_err(|e| {
        CliError::new(EXIT_FETCH, format!("CSV export download failed: {e}"))
            .with_hint("the sheet must be shared as \"anyone with the link can view\"")
    })?;

    let records = parse_csv(&text);
    let mut store = open_store(&config)?;

    let rules = config.column_rules();
    let batch = plan(&records, &store, &rules);

    print_skips(&batch, args.quiet);

    if args.dry_run {
        if args.json {
            let urls: Vec<&str> = batch.cards.iter().map(|c| c.url.as_str()).collect();
            println!("{}", serde_json::to_string_pretty(&urls).map_err(CliError::internal)?);
        } else {
            for card in &batch.cards {
                println!("{}", card.url);
            }
            if !args.quiet {
                eprintln!("would create {} card(s); nothing saved", batch.cards.len());
            }
        }
        return Ok(());
    }

    let metadata_client;
    let metadata: Option<&dyn MetadataSource> =
        if args.no_metadata || !config.metadata.enabled {
            None
        } else {
            metadata_client = MetadataClient::new(
                &config.metadata.proxy_base,
                Duration::from_secs(config.metadata.timeout_secs),
            );
            Some(&metadata_client)
        };

    let report = run(&batch, &rules, metadata, &mut store);
    store.save().map_err(CliError::store)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report).map_err(CliError::internal)?);
    } else if !args.quiet {
        let skipped = report.skipped;
        eprintln!(
            "created {} card(s) ({} duplicate, {} invalid URL, {} without URL, {} metadata lookup(s) failed)",
            report.created,
            skipped.duplicate,
            skipped.invalid_url,
            skipped.no_url,
            report.metadata_failures,
        );
    }
    Ok(())
}

/// Invalid URLs warn, missing URLs get a note, duplicates stay silent.
fn print_skips(batch: &IngestPlan, quiet: bool) {
    if quiet {
        return;
    }
    for skip in &batch.skips {
        match skip.reason {
            SkipReason::InvalidUrl => {
                eprintln!("warning: row {}: invalid URL {:?}", skip.row, skip.detail);
            }
            SkipReason::NoUrl => {
                eprintln!("note: row {}: no URL column matched", skip.row);
            }
            SkipReason::Duplicate => {}
        }
    }
}
