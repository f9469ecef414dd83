//! Ground-truth store: in-memory index over verified entries.
//!
//! The store is a versioned snapshot: cloning it is an `Arc` bump, and `add`
//! is copy-on-write. A clone taken before an append never sees that append,
//! so callers can release the shared lock and iterate their snapshot freely.
//!
//! CRITICAL: append-only. Entries are never edited or removed here; a newer
//! entry for the same headword supersedes older ones for `current` lookups
//! but every version stays reachable through `history`.

use std::sync::Arc;

use tracing::debug;

use crate::models::VerifiedEntry;
use crate::morphology::{PartOfSpeech, TemplateId};

#[derive(Debug, Clone, Default)]
pub struct GroundTruthStore {
    entries: Arc<Vec<VerifiedEntry>>,
    version: u64,
}

impl GroundTruthStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from entries in insertion order (oldest first).
    pub fn from_entries(entries: Vec<VerifiedEntry>) -> Self {
        let version = entries.len() as u64;
        Self {
            entries: Arc::new(entries),
            version,
        }
    }

    /// Appends an entry and returns the new store version.
    pub fn add(&mut self, entry: VerifiedEntry) -> u64 {
        debug!(
            "Appending verified entry '{}' ({}, {}) at version {}",
            entry.headword,
            entry.part_of_speech,
            entry.template_label(),
            self.version + 1
        );
        Arc::make_mut(&mut self.entries).push(entry);
        self.version += 1;
        self.version
    }

    /// Cheap read-only copy of the current state.
    pub fn snapshot(&self) -> GroundTruthStore {
        self.clone()
    }

    /// All entries with the given part of speech, oldest first.
    ///
    /// The iterator is lazy and `Clone`, so it can be restarted.
    pub fn find_by_part_of_speech(
        &self,
        part_of_speech: PartOfSpeech,
    ) -> impl DoubleEndedIterator<Item = &VerifiedEntry> + Clone + '_ {
        self.entries
            .iter()
            .filter(move |e| e.part_of_speech == part_of_speech)
    }

    /// All entries with the given template, oldest first.
    pub fn find_by_template(
        &self,
        template_id: TemplateId,
    ) -> impl DoubleEndedIterator<Item = &VerifiedEntry> + Clone + '_ {
        self.entries
            .iter()
            .filter(move |e| e.template_id == Some(template_id))
    }

    /// The most recently added entry for a headword (last write wins).
    pub fn current(&self, headword: &str) -> Option<&VerifiedEntry> {
        self.entries.iter().rev().find(|e| e.headword == headword)
    }

    /// Every entry ever recorded for a headword, oldest first.
    pub fn history(&self, headword: &str) -> Vec<&VerifiedEntry> {
        self.entries
            .iter()
            .filter(|e| e.headword == headword)
            .collect()
    }

    pub fn entries(&self) -> &[VerifiedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(headword: &str, pos: PartOfSpeech, template: TemplateId) -> VerifiedEntry {
        VerifiedEntry::new(headword, pos, template, format!("==Kannada==\n{headword}"))
    }

    #[test]
    fn test_added_entry_is_found_by_both_indexes() {
        let mut store = GroundTruthStore::new();
        store.add(entry("ಊರು", PartOfSpeech::Noun, TemplateId::DeclU));

        let by_pos: Vec<_> = store.find_by_part_of_speech(PartOfSpeech::Noun).collect();
        let by_template: Vec<_> = store.find_by_template(TemplateId::DeclU).collect();

        assert_eq!(by_pos.len(), 1);
        assert_eq!(by_template.len(), 1);
        assert_eq!(by_pos[0], by_template[0]);
        assert_eq!(by_pos[0].headword, "ಊರು");
        assert_eq!(by_pos[0].template_id, Some(TemplateId::DeclU));
        assert_eq!(by_pos[0].part_of_speech, PartOfSpeech::Noun);
    }

    #[test]
    fn test_queries_preserve_insertion_order_and_filter() {
        let mut store = GroundTruthStore::new();
        store.add(entry("ಮನೆ", PartOfSpeech::Noun, TemplateId::DeclEIAi));
        store.add(entry("ಮಾಡು", PartOfSpeech::Verb, TemplateId::ConjU));
        store.add(entry("ಕುರಿ", PartOfSpeech::Noun, TemplateId::DeclEIAi));

        let nouns: Vec<_> = store
            .find_by_part_of_speech(PartOfSpeech::Noun)
            .map(|e| e.headword.as_str())
            .collect();
        assert_eq!(nouns, vec!["ಮನೆ", "ಕುರಿ"]);

        assert_eq!(store.find_by_template(TemplateId::ConjU).count(), 1);
        assert_eq!(store.find_by_template(TemplateId::DeclA).count(), 0);
    }

    #[test]
    fn test_query_iterator_is_restartable() {
        let mut store = GroundTruthStore::new();
        store.add(entry("ಮಾಡು", PartOfSpeech::Verb, TemplateId::ConjU));
        store.add(entry("ಓಡು", PartOfSpeech::Verb, TemplateId::ConjU));

        let iter = store.find_by_template(TemplateId::ConjU);
        let first: Vec<_> = iter.clone().collect();
        let second: Vec<_> = iter.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_snapshot_does_not_observe_later_appends() {
        let mut store = GroundTruthStore::new();
        store.add(entry("ಮರ", PartOfSpeech::Noun, TemplateId::DeclA));

        let snapshot = store.snapshot();
        store.add(entry("ನಗರ", PartOfSpeech::Noun, TemplateId::DeclA));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.version(), 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.version(), 2);
        assert_eq!(snapshot.find_by_template(TemplateId::DeclA).count(), 1);
    }

    #[test]
    fn test_current_is_last_write_and_history_keeps_all() {
        let mut store = GroundTruthStore::new();
        store.add(entry("ಊರು", PartOfSpeech::Noun, TemplateId::DeclU));
        store.add(entry("ಮರ", PartOfSpeech::Noun, TemplateId::DeclA));
        let newer = entry("ಊರು", PartOfSpeech::Noun, TemplateId::DeclU).with_provenance("manual");
        store.add(newer.clone());

        assert_eq!(store.current("ಊರು"), Some(&newer));
        assert_eq!(store.history("ಊರು").len(), 2);
        assert!(store.current("ಮನೆ").is_none());
    }

    #[test]
    fn test_duplicate_headwords_are_distinct_entries() {
        let mut store = GroundTruthStore::new();
        store.add(entry("ಕಲಿ", PartOfSpeech::Verb, TemplateId::ConjEIAi));
        store.add(entry("ಕಲಿ", PartOfSpeech::Noun, TemplateId::DeclEIAi));

        assert_eq!(store.len(), 2);
        assert_eq!(store.find_by_part_of_speech(PartOfSpeech::Verb).count(), 1);
        assert_eq!(store.find_by_part_of_speech(PartOfSpeech::Noun).count(), 1);
    }

    #[test]
    fn test_untemplated_entries_are_only_found_by_part_of_speech() {
        let mut store = GroundTruthStore::new();
        store.add(VerifiedEntry::new("ದೊಡ್ಡ", PartOfSpeech::Adjective, None, "==Kannada=="));

        assert_eq!(store.find_by_part_of_speech(PartOfSpeech::Adjective).count(), 1);
        assert!(TemplateId::ALL
            .into_iter()
            .all(|t| store.find_by_template(t).next().is_none()));
    }

    #[test]
    fn test_from_entries_sets_version() {
        let store = GroundTruthStore::from_entries(vec![
            entry("ಮರ", PartOfSpeech::Noun, TemplateId::DeclA),
            entry("ಮನೆ", PartOfSpeech::Noun, TemplateId::DeclEIAi),
        ]);
        assert_eq!(store.version(), 2);
        assert!(!store.is_empty());
        assert!(GroundTruthStore::new().is_empty());
    }
}
