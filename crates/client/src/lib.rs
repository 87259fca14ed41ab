//! `previewdeck-client` — HTTP collaborators.
//!
//! Blocking reqwest clients (no Tokio runtime required): the CSV-export
//! fetch that feeds a batch, and the relay-proxy page-metadata scrape
//! that enriches individual cards.

pub mod error;
pub mod export;
pub mod metadata;

pub use error::ClientError;
pub use export::ExportClient;
pub use metadata::MetadataClient;
