//! `previewdeck-ingest` — record reconciliation engine.
//!
//! Pure engine crate: receives parsed sheet records, decides which become
//! new cards, and drives emission through injected collaborators. No CLI,
//! IO, or HTTP dependencies.
//!
//! Two phases: [`plan`] is a pure function of (records, existing index,
//! column rules) producing an ordered list of emission commands; [`run`]
//! walks that list strictly sequentially, enriching each card with
//! best-effort page metadata before handing it to the sink.

pub mod error;
pub mod model;
pub mod plan;
pub mod run;

pub use error::MetadataError;
pub use model::{
    CardEmission, CardIndex, CardSink, ColumnRules, IngestPlan, IngestReport, MetadataSource,
    PageMetadata, PlannedCard, RowSkip, SkipCounts, SkipReason,
};
pub use plan::plan;
pub use run::run;
