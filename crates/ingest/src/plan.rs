//! Phase one: pure planning — field resolution, URL normalization, de-dup.

use std::collections::HashSet;

use url::Url;

use previewdeck_sheet::SheetRecord;

use crate::model::{CardIndex, ColumnRules, IngestPlan, PlannedCard, RowSkip, SkipReason};

/// Decide which records become new cards.
///
/// Pure function of its inputs: walks records in source order, resolves
/// the URL and title columns, normalizes the URL, and drops anything the
/// index already holds. In-batch duplicates are dropped too, so the plan
/// never emits the same canonical URL twice.
pub fn plan(records: &[SheetRecord], index: &dyn CardIndex, rules: &ColumnRules) -> IngestPlan {
    let mut cards = Vec::new();
    let mut skips = Vec::new();
    let mut planned: HashSet<String> = HashSet::new();

    for (i, record) in records.iter().enumerate() {
        let row = i + 1;

        let Some(raw_url) = resolve_field(record, &rules.url_columns) else {
            skips.push(RowSkip {
                row,
                reason: SkipReason::NoUrl,
                detail: String::new(),
            });
            continue;
        };

        let title = resolve_field(record, &rules.title_columns).map(str::to_string);

        let Some(url) = normalize_url(raw_url) else {
            skips.push(RowSkip {
                row,
                reason: SkipReason::InvalidUrl,
                detail: raw_url.to_string(),
            });
            continue;
        };
        let canonical = url.to_string();

        if index.contains(&canonical) || planned.contains(&canonical) {
            skips.push(RowSkip {
                row,
                reason: SkipReason::Duplicate,
                detail: canonical,
            });
            continue;
        }

        let domain = domain_of(&url);
        let category = record
            .get(&rules.category_column)
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        planned.insert(canonical.clone());
        cards.push(PlannedCard {
            url: canonical,
            domain,
            title,
            category,
            record: record.clone(),
        });
    }

    IngestPlan { cards, skips }
}

/// First non-empty value for the first candidate header that matches.
///
/// Candidates are tried in priority order; each candidate matches the
/// first header (in record order) equal to it ignoring ASCII case. A
/// matched-but-empty value fails that candidate, not the whole scan.
fn resolve_field<'a>(record: &'a SheetRecord, candidates: &[String]) -> Option<&'a str> {
    for candidate in candidates {
        let found = record
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(candidate))
            .map(|(_, value)| value.trim());
        if let Some(value) = found {
            if !value.is_empty() {
                return Some(value);
            }
        }
    }
    None
}

/// Parse as an absolute URL, retrying with an `https://` prefix.
fn normalize_url(raw: &str) -> Option<Url> {
    match Url::parse(raw) {
        Ok(url) => Some(url),
        Err(_) => Url::parse(&format!("https://{raw}")).ok(),
    }
}

/// Display domain: host without a leading `www.`, or the whole canonical
/// URL when there is no host.
fn domain_of(url: &Url) -> String {
    match url.host_str() {
        Some(host) => host.strip_prefix("www.").unwrap_or(host).to_string(),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedIndex(HashSet<String>);

    impl FixedIndex {
        fn empty() -> Self {
            Self(HashSet::new())
        }

        fn with(urls: &[&str]) -> Self {
            Self(urls.iter().map(|u| u.to_string()).collect())
        }
    }

    impl CardIndex for FixedIndex {
        fn contains(&self, url: &str) -> bool {
            self.0.contains(url)
        }
    }

    fn record(pairs: &[(&str, &str)]) -> SheetRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn url_column_matches_case_insensitively() {
        let records = vec![record(&[("Preview Link", "https://a.com/x")])];
        let plan = plan(&records, &FixedIndex::empty(), &ColumnRules::default());
        assert_eq!(plan.cards.len(), 1);
        assert_eq!(plan.cards[0].url, "https://a.com/x");
    }

    #[test]
    fn url_candidates_tried_in_priority_order() {
        // "preview link" outranks "url" even though "url" comes first in
        // the record.
        let records = vec![record(&[
            ("URL", "https://second.com"),
            ("Preview Link", "https://first.com"),
        ])];
        let plan = plan(&records, &FixedIndex::empty(), &ColumnRules::default());
        assert_eq!(plan.cards[0].url, "https://first.com/");
    }

    #[test]
    fn case_duplicate_headers_first_in_record_order_wins() {
        // Both "URL" and "url" present: the first header in record order
        // is the one the candidate scan sees.
        let records = vec![record(&[("URL", "https://upper.com"), ("url", "https://lower.com")])];
        let plan = plan(&records, &FixedIndex::empty(), &ColumnRules::default());
        assert_eq!(plan.cards[0].url, "https://upper.com/");
    }

    #[test]
    fn matched_but_empty_column_falls_through_to_next_candidate() {
        let records = vec![record(&[("Preview Link", "  "), ("url", "https://a.com")])];
        let plan = plan(&records, &FixedIndex::empty(), &ColumnRules::default());
        assert_eq!(plan.cards.len(), 1);
        assert_eq!(plan.cards[0].url, "https://a.com/");
    }

    #[test]
    fn schemeless_url_gets_https_prefix() {
        let records = vec![record(&[("url", "example.com")])];
        let plan = plan(&records, &FixedIndex::empty(), &ColumnRules::default());
        assert_eq!(plan.cards[0].url, "https://example.com/");
        assert_eq!(plan.cards[0].domain, "example.com");
    }

    #[test]
    fn www_prefix_stripped_from_domain() {
        let records = vec![record(&[("url", "https://www.example.com/page")])];
        let plan = plan(&records, &FixedIndex::empty(), &ColumnRules::default());
        assert_eq!(plan.cards[0].domain, "example.com");
    }

    #[test]
    fn row_without_url_column_is_skipped() {
        let records = vec![record(&[("product", "Alpha"), ("Page", "Home")])];
        let plan = plan(&records, &FixedIndex::empty(), &ColumnRules::default());
        assert!(plan.cards.is_empty());
        assert_eq!(plan.skip_counts().no_url, 1);
    }

    #[test]
    fn invalid_url_skips_row_but_not_siblings() {
        let records = vec![
            record(&[("url", "a.com")]),
            record(&[("url", "not valid ::::")]),
            record(&[("url", "b.com")]),
        ];
        let plan = plan(&records, &FixedIndex::empty(), &ColumnRules::default());
        assert_eq!(plan.cards.len(), 2);
        assert_eq!(plan.cards[0].url, "https://a.com/");
        assert_eq!(plan.cards[1].url, "https://b.com/");
        let counts = plan.skip_counts();
        assert_eq!(counts.invalid_url, 1);
        assert_eq!(plan.skips[0].row, 2);
        assert_eq!(plan.skips[0].detail, "not valid ::::");
    }

    #[test]
    fn existing_card_is_not_replanned() {
        let records = vec![record(&[("url", "https://foo.com")])];
        let index = FixedIndex::with(&["https://foo.com/"]);
        let plan = plan(&records, &index, &ColumnRules::default());
        assert!(plan.cards.is_empty());
        assert_eq!(plan.skip_counts().duplicate, 1);
    }

    #[test]
    fn in_batch_duplicates_collapse_to_one_card() {
        let records = vec![
            record(&[("url", "https://foo.com")]),
            record(&[("url", "foo.com")]),
        ];
        let plan = plan(&records, &FixedIndex::empty(), &ColumnRules::default());
        assert_eq!(plan.cards.len(), 1);
        assert_eq!(plan.skip_counts().duplicate, 1);
    }

    #[test]
    fn title_and_category_are_captured() {
        let records = vec![record(&[
            ("url", "https://a.com"),
            ("Product", "Alpha funnel"),
            ("Page", " Checkout "),
        ])];
        let plan = plan(&records, &FixedIndex::empty(), &ColumnRules::default());
        assert_eq!(plan.cards[0].title.as_deref(), Some("Alpha funnel"));
        assert_eq!(plan.cards[0].category.as_deref(), Some("Checkout"));
    }

    #[test]
    fn missing_title_stays_none() {
        let records = vec![record(&[("url", "https://a.com")])];
        let plan = plan(&records, &FixedIndex::empty(), &ColumnRules::default());
        assert_eq!(plan.cards[0].title, None);
        assert_eq!(plan.cards[0].category, None);
    }

    #[test]
    fn empty_record_list_plans_nothing() {
        let plan = plan(&[], &FixedIndex::empty(), &ColumnRules::default());
        assert!(plan.cards.is_empty());
        assert!(plan.skips.is_empty());
    }
}
