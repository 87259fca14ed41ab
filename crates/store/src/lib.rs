//! `previewdeck-store` — the persistent card list.
//!
//! One JSON file holding every saved card, loaded whole and saved whole
//! (the browser-storage model this replaces worked the same way). The
//! store doubles as the engine's membership index and emission sink.

pub mod error;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use previewdeck_ingest::{CardEmission, CardIndex, CardSink};
use previewdeck_sheet::SheetRecord;

pub use error::StoreError;

/// One materialized preview card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedCard {
    pub url: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<SheetRecord>,
    /// RFC 3339 creation timestamp.
    pub saved_at: String,
}

/// In-memory card list bound to its backing file.
#[derive(Debug)]
pub struct CardStore {
    path: PathBuf,
    cards: Vec<SavedCard>,
}

impl CardStore {
    /// Open the store at the platform data directory.
    pub fn open_default() -> Result<Self, StoreError> {
        let base = dirs::data_dir()
            .ok_or_else(|| StoreError::Io("cannot determine data directory".into()))?;
        Self::load(base.join("previewdeck").join("cards.json"))
    }

    /// Load from `path`. A missing file is an empty store, not an error.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let cards = match std::fs::read_to_string(&path) {
            Ok(text) => {
                serde_json::from_str(&text).map_err(|e| StoreError::Parse(e.to_string()))?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };
        Ok(Self { path, cards })
    }

    /// Write the whole card list back, atomically (temp file + rename).
    pub fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
            }
        }

        let json = serde_json::to_string_pretty(&self.cards)
            .map_err(|e| StoreError::Parse(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| StoreError::Io(e.to_string()))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn cards(&self) -> &[SavedCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn add(&mut self, card: SavedCard) {
        self.cards.push(card);
    }

    /// Remove the card with this canonical URL. Returns whether one existed.
    pub fn remove(&mut self, url: &str) -> bool {
        let before = self.cards.len();
        self.cards.retain(|c| c.url != url);
        self.cards.len() != before
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Sorted distinct category labels across saved cards.
    pub fn categories(&self) -> Vec<String> {
        let mut labels: Vec<String> = self
            .cards
            .iter()
            .filter_map(|c| c.category.as_deref())
            .map(str::to_string)
            .collect();
        labels.sort();
        labels.dedup();
        labels
    }
}

impl CardIndex for CardStore {
    fn contains(&self, url: &str) -> bool {
        self.cards.iter().any(|c| c.url == url)
    }
}

impl CardSink for CardStore {
    fn emit(&mut self, card: &CardEmission) {
        let annotation = if card.annotation.is_empty() {
            None
        } else {
            Some(card.annotation.clone())
        };
        self.add(SavedCard {
            url: card.url.clone(),
            title: card.title.clone(),
            description: card.description.clone(),
            domain: card.domain.clone(),
            category: card.category.clone(),
            annotation,
            saved_at: chrono::Utc::now().to_rfc3339(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(url: &str, category: Option<&str>) -> SavedCard {
        SavedCard {
            url: url.to_string(),
            title: "t".into(),
            description: None,
            domain: "example.com".into(),
            category: category.map(String::from),
            annotation: None,
            saved_at: "2026-01-01T00:00:00Z".into(),
        }
    }

    #[test]
    fn missing_file_is_an_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = CardStore::load(dir.path().join("cards.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cards.json");

        let mut store = CardStore::load(&path).unwrap();
        let mut with_annotation = card("https://a.com/", Some("Home"));
        with_annotation.annotation = Some(
            [("Page".to_string(), "Home".to_string())]
                .into_iter()
                .collect(),
        );
        store.add(with_annotation);
        store.add(card("https://b.com/", None));
        store.save().unwrap();

        let reloaded = CardStore::load(&path).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.cards()[0].url, "https://a.com/");
        assert_eq!(
            reloaded.cards()[0]
                .annotation
                .as_ref()
                .unwrap()
                .get("Page"),
            Some("Home")
        );
    }

    #[test]
    fn corrupt_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cards.json");
        std::fs::write(&path, "not json").unwrap();
        let err = CardStore::load(&path).unwrap_err();
        assert!(matches!(err, StoreError::Parse(_)));
    }

    #[test]
    fn contains_is_exact_url_membership() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = CardStore::load(dir.path().join("cards.json")).unwrap();
        store.add(card("https://a.com/", None));
        assert!(store.contains("https://a.com/"));
        assert!(!store.contains("https://a.com"));
    }

    #[test]
    fn remove_reports_whether_a_card_existed() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = CardStore::load(dir.path().join("cards.json")).unwrap();
        store.add(card("https://a.com/", None));
        assert!(store.remove("https://a.com/"));
        assert!(!store.remove("https://a.com/"));
        assert!(store.is_empty());
    }

    #[test]
    fn categories_are_sorted_and_distinct() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = CardStore::load(dir.path().join("cards.json")).unwrap();
        store.add(card("https://a.com/", Some("Home")));
        store.add(card("https://b.com/", Some("Checkout")));
        store.add(card("https://c.com/", Some("Home")));
        store.add(card("https://d.com/", None));
        assert_eq!(store.categories(), vec!["Checkout", "Home"]);
    }

    #[test]
    fn sink_emission_becomes_a_saved_card() {
        use previewdeck_ingest::CardEmission;

        let dir = tempfile::tempdir().unwrap();
        let mut store = CardStore::load(dir.path().join("cards.json")).unwrap();

        let annotation: SheetRecord = [("url".to_string(), "https://a.com".to_string())]
            .into_iter()
            .collect();
        store.emit(&CardEmission {
            url: "https://a.com/".into(),
            title: "Alpha".into(),
            description: Some("desc".into()),
            domain: "a.com".into(),
            category: Some("Home".into()),
            annotation,
        });

        assert_eq!(store.len(), 1);
        let saved = &store.cards()[0];
        assert_eq!(saved.title, "Alpha");
        assert_eq!(saved.category.as_deref(), Some("Home"));
        assert!(saved.annotation.is_some());
        assert!(!saved.saved_at.is_empty());
    }
}
