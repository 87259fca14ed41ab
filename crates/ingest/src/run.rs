//! Phase two: sequential enrichment and emission.

use crate::model::{
    CardEmission, CardSink, ColumnRules, IngestMeta, IngestPlan, IngestReport, MetadataSource,
};

/// Emit every planned card, in plan order.
///
/// Strictly sequential: each card's metadata fetch completes (or fails)
/// before the next card starts, so sink order matches source row order.
/// Metadata failures degrade the card, they never abort the batch. Pass
/// `None` for `metadata` to skip enrichment entirely.
pub fn run(
    plan: &IngestPlan,
    rules: &ColumnRules,
    metadata: Option<&dyn MetadataSource>,
    sink: &mut dyn CardSink,
) -> IngestReport {
    let mut created = 0;
    let mut metadata_failures = 0;

    for card in &plan.cards {
        let fetched = match metadata {
            Some(source) => match source.fetch(&card.url) {
                Ok(meta) => Some(meta),
                Err(_) => {
                    metadata_failures += 1;
                    None
                }
            },
            None => None,
        };

        // Title priority: explicit sheet title > fetched page title >
        // domain > default label.
        let title = card
            .title
            .clone()
            .or_else(|| {
                fetched
                    .as_ref()
                    .map(|m| m.title.trim().to_string())
                    .filter(|t| !t.is_empty())
            })
            .or_else(|| Some(card.domain.clone()).filter(|d| !d.is_empty()))
            .unwrap_or_else(|| rules.default_title.clone());

        let description = fetched.and_then(|m| m.description);

        sink.emit(&CardEmission {
            url: card.url.clone(),
            title,
            description,
            domain: card.domain.clone(),
            category: card.category.clone(),
            annotation: card.record.clone(),
        });
        created += 1;
    }

    IngestReport {
        meta: IngestMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        created,
        skipped: plan.skip_counts(),
        metadata_failures,
    }
}
