//! `previewdeck-sheet` — published-spreadsheet ingestion primitives.
//!
//! Leaf crate: share-link → CSV-export-URL resolution and the lenient
//! delimited-text parser. No IO, no HTTP.

pub mod error;
pub mod parse;
pub mod record;
pub mod resolve;

pub use error::SheetError;
pub use parse::parse_csv;
pub use record::SheetRecord;
pub use resolve::export_url;
