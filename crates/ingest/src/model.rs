use serde::Serialize;

use previewdeck_sheet::SheetRecord;

use crate::error::MetadataError;

// ---------------------------------------------------------------------------
// Column rules
// ---------------------------------------------------------------------------

/// Which sheet columns carry the URL, title, and category, plus the label
/// used when nothing else yields a title.
///
/// Candidate lists are priority-ordered; matching against actual headers is
/// case-insensitive and exact.
#[derive(Debug, Clone)]
pub struct ColumnRules {
    pub url_columns: Vec<String>,
    pub title_columns: Vec<String>,
    pub category_column: String,
    pub default_title: String,
}

impl Default for ColumnRules {
    fn default() -> Self {
        Self {
            url_columns: ["preview link", "url", "link", "previewlink", "preview_link"]
                .map(String::from)
                .to_vec(),
            title_columns: ["product", "title", "name", "funnel name", "funnelname", "funnel_name"]
                .map(String::from)
                .to_vec(),
            category_column: "Page".into(),
            default_title: "Test funnel".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

/// Membership test over already-materialized cards.
pub trait CardIndex {
    fn contains(&self, url: &str) -> bool;
}

/// Page-metadata lookup for one canonical URL. May fail; the engine
/// catches and degrades.
pub trait MetadataSource {
    fn fetch(&self, url: &str) -> Result<PageMetadata, MetadataError>;
}

/// Receives finished cards. Responsible for rendering/persisting; the
/// engine consumes no return value.
pub trait CardSink {
    fn emit(&mut self, card: &CardEmission);
}

/// Title/description pair scraped from the target page.
#[derive(Debug, Clone)]
pub struct PageMetadata {
    pub title: String,
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

/// One record that survived field resolution, normalization, and de-dup.
#[derive(Debug, Clone)]
pub struct PlannedCard {
    /// Canonical absolute URL (scheme always present).
    pub url: String,
    pub domain: String,
    /// Title taken from the sheet, when a title column matched.
    pub title: Option<String>,
    /// Category label from the designated category column, if present.
    pub category: Option<String>,
    /// The originating record, kept as card annotation data.
    pub record: SheetRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No candidate URL column matched. Diagnostic only.
    NoUrl,
    /// Neither the raw nor the `https://`-prefixed form parsed. Warning.
    InvalidUrl,
    /// Canonical URL already materialized (or planned earlier in the
    /// batch). Silent.
    Duplicate,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoUrl => write!(f, "no URL column matched"),
            Self::InvalidUrl => write!(f, "invalid URL"),
            Self::Duplicate => write!(f, "already have a card"),
        }
    }
}

/// A record the plan left out, with the source data row (1-based, header
/// excluded) and the offending value where there is one.
#[derive(Debug, Clone, Serialize)]
pub struct RowSkip {
    pub row: usize,
    pub reason: SkipReason,
    pub detail: String,
}

/// Ordered emission commands plus everything that was skipped.
#[derive(Debug, Clone)]
pub struct IngestPlan {
    pub cards: Vec<PlannedCard>,
    pub skips: Vec<RowSkip>,
}

impl IngestPlan {
    pub fn skip_counts(&self) -> SkipCounts {
        let mut counts = SkipCounts::default();
        for skip in &self.skips {
            match skip.reason {
                SkipReason::NoUrl => counts.no_url += 1,
                SkipReason::InvalidUrl => counts.invalid_url += 1,
                SkipReason::Duplicate => counts.duplicate += 1,
            }
        }
        counts
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SkipCounts {
    pub no_url: usize,
    pub invalid_url: usize,
    pub duplicate: usize,
}

// ---------------------------------------------------------------------------
// Emission + report
// ---------------------------------------------------------------------------

/// Finished card handed to the sink.
#[derive(Debug, Clone, Serialize)]
pub struct CardEmission {
    pub url: String,
    pub title: String,
    pub description: Option<String>,
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub annotation: SheetRecord,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestMeta {
    pub engine_version: String,
    pub run_at: String,
}

/// Diagnostic summary of one batch. Counts only; consumers act on the
/// sink's side effects, not on this.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub meta: IngestMeta,
    pub created: usize,
    pub skipped: SkipCounts,
    pub metadata_failures: usize,
}
