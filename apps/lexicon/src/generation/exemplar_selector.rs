//! Exemplar Selector: picks verified entries to show the model as few-shot context.
//!
//! Pure: reads a store snapshot, no LLM calls, no I/O. An empty store yields an
//! empty set and generation proceeds without examples (cold start).
//!
//! Ordering:
//! 1. Entries with the exact template of the new word, newest first
//! 2. If still short, entries with the same part of speech, newest first
//! Within both tiers only the newest entry per headword is kept. The first
//! exemplar is the canonical format reference for the generation call.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::ground_truth::GroundTruthStore;
use crate::models::VerifiedEntry;
use crate::morphology::{ClassificationResult, PartOfSpeech, TemplateId};

/// Default number of exemplars per generation request.
pub const DEFAULT_MAX_EXEMPLARS: usize = 3;

/// Why an entry was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExemplarSource {
    Template,
    PartOfSpeech,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exemplar {
    pub entry: VerifiedEntry,
    pub source: ExemplarSource,
}

/// Ordered, bounded, duplicate-free (by headword) exemplars for one request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExemplarSet {
    pub exemplars: Vec<Exemplar>,
}

impl ExemplarSet {
    /// The single entry that acts as the canonical format reference.
    pub fn canonical(&self) -> Option<&VerifiedEntry> {
        self.exemplars.first().map(|e| &e.entry)
    }

    pub fn entries(&self) -> impl Iterator<Item = &VerifiedEntry> {
        self.exemplars.iter().map(|e| &e.entry)
    }

    pub fn headwords(&self) -> Vec<&str> {
        self.entries().map(|e| e.headword.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.exemplars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exemplars.is_empty()
    }
}

/// Selects up to `max_count` exemplars for a classified headword.
///
/// The headword itself is never its own exemplar.
pub fn select_exemplars(
    store: &GroundTruthStore,
    classification: &ClassificationResult,
    max_count: usize,
) -> ExemplarSet {
    select(
        store,
        &classification.headword,
        classification.part_of_speech,
        Some(classification.template_id),
        max_count,
    )
}

/// Same selection for a word without an inflection template: only the
/// part-of-speech tier applies.
pub fn select_exemplars_by_part_of_speech(
    store: &GroundTruthStore,
    headword: &str,
    part_of_speech: PartOfSpeech,
    max_count: usize,
) -> ExemplarSet {
    select(store, headword, part_of_speech, None, max_count)
}

fn select(
    store: &GroundTruthStore,
    headword: &str,
    part_of_speech: PartOfSpeech,
    template_id: Option<TemplateId>,
    max_count: usize,
) -> ExemplarSet {
    let mut seen: HashSet<&str> = HashSet::from([headword]);
    let mut exemplars = Vec::with_capacity(max_count);

    let template_tier: Vec<&VerifiedEntry> = match template_id {
        Some(template) => store.find_by_template(template).rev().collect(),
        None => Vec::new(),
    };
    let tiers = [
        (ExemplarSource::Template, template_tier),
        (
            ExemplarSource::PartOfSpeech,
            store
                .find_by_part_of_speech(part_of_speech)
                .rev()
                .collect::<Vec<_>>(),
        ),
    ];

    'tiers: for (source, candidates) in tiers {
        for entry in candidates {
            if exemplars.len() >= max_count {
                break 'tiers;
            }
            if seen.insert(entry.headword.as_str()) {
                exemplars.push(Exemplar {
                    entry: entry.clone(),
                    source,
                });
            }
        }
    }

    ExemplarSet { exemplars }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::classify;

    fn entry(headword: &str, pos: PartOfSpeech, template: TemplateId) -> VerifiedEntry {
        VerifiedEntry::new(headword, pos, template, format!("==Kannada==\n'''{headword}'''"))
    }

    fn noun_store() -> GroundTruthStore {
        let mut store = GroundTruthStore::new();
        store.add(entry("ಊರು", PartOfSpeech::Noun, TemplateId::DeclU));
        store.add(entry("ಮನೆ", PartOfSpeech::Noun, TemplateId::DeclEIAi));
        store.add(entry("ರೈಲು", PartOfSpeech::Noun, TemplateId::DeclU));
        store.add(entry("ಮರ", PartOfSpeech::Noun, TemplateId::DeclA));
        store.add(entry("ಮಾಡು", PartOfSpeech::Verb, TemplateId::ConjU));
        store
    }

    #[test]
    fn test_empty_store_yields_empty_set() {
        let store = GroundTruthStore::new();
        let classification = classify("ಮಂಜು", PartOfSpeech::Noun).unwrap();
        assert_eq!(classification.template_id, TemplateId::DeclU);

        let set = select_exemplars(&store, &classification, DEFAULT_MAX_EXEMPLARS);
        assert!(set.is_empty());
        assert!(set.canonical().is_none());
    }

    #[test]
    fn test_template_matches_come_first_newest_first() {
        let classification = classify("ಮಂಜು", PartOfSpeech::Noun).unwrap();
        let set = select_exemplars(&noun_store(), &classification, 3);

        assert_eq!(set.headwords(), vec!["ರೈಲು", "ಊರು", "ಮರ"]);
        assert_eq!(set.exemplars[0].source, ExemplarSource::Template);
        assert_eq!(set.exemplars[1].source, ExemplarSource::Template);
        assert_eq!(set.exemplars[2].source, ExemplarSource::PartOfSpeech);
        assert_eq!(set.canonical().map(|e| e.headword.as_str()), Some("ರೈಲು"));
    }

    #[test]
    fn test_never_exceeds_max_count() {
        let classification = classify("ಮಂಜು", PartOfSpeech::Noun).unwrap();
        for max in 0..6 {
            let set = select_exemplars(&noun_store(), &classification, max);
            assert!(set.len() <= max, "max={max} got {}", set.len());
        }
        // Only four nouns exist, so widening stops there.
        assert_eq!(select_exemplars(&noun_store(), &classification, 10).len(), 4);
    }

    #[test]
    fn test_never_returns_duplicate_headwords() {
        let mut store = noun_store();
        store.add(entry("ರೈಲು", PartOfSpeech::Noun, TemplateId::DeclU));
        store.add(entry("ಮರ", PartOfSpeech::Noun, TemplateId::DeclA));

        let classification = classify("ಮಂಜು", PartOfSpeech::Noun).unwrap();
        let set = select_exemplars(&store, &classification, 10);

        let headwords = set.headwords();
        let unique: HashSet<_> = headwords.iter().collect();
        assert_eq!(headwords.len(), unique.len());
        assert_eq!(headwords, vec!["ರೈಲು", "ಊರು", "ಮರ", "ಮನೆ"]);
    }

    #[test]
    fn test_headword_is_not_its_own_exemplar() {
        let classification = classify("ಊರು", PartOfSpeech::Noun).unwrap();
        let set = select_exemplars(&noun_store(), &classification, 3);
        assert!(!set.headwords().contains(&"ಊರು"));
    }

    #[test]
    fn test_other_parts_of_speech_are_never_used() {
        let classification = classify("ಓಡು", PartOfSpeech::Verb).unwrap();
        let set = select_exemplars(&noun_store(), &classification, 3);
        assert_eq!(set.headwords(), vec!["ಮಾಡು"]);
    }

    #[test]
    fn test_reflexive_scenario_template_entry_ordered_first() {
        let mut store = GroundTruthStore::new();
        store.add(entry("ಮಾಡಿಕೊಳ್ಳು", PartOfSpeech::Verb, TemplateId::ConjReflexive));
        store.add(entry("ಮಾಡು", PartOfSpeech::Verb, TemplateId::ConjU));

        let classification = classify("ತೊಳೆದುಕೊಳ್ಳು", PartOfSpeech::Verb).unwrap();
        assert_eq!(classification.template_id, TemplateId::ConjReflexive);

        let set = select_exemplars(&store, &classification, 2);
        assert_eq!(set.headwords(), vec!["ಮಾಡಿಕೊಳ್ಳು", "ಮಾಡು"]);
        assert_eq!(set.exemplars[0].source, ExemplarSource::Template);
        assert_eq!(set.exemplars[1].source, ExemplarSource::PartOfSpeech);
    }

    #[test]
    fn test_untemplated_word_uses_part_of_speech_tier_only() {
        let mut store = noun_store();
        store.add(VerifiedEntry::new("ದೊಡ್ಡ", PartOfSpeech::Adjective, None, "==Kannada=="));
        store.add(VerifiedEntry::new("ಸಣ್ಣ", PartOfSpeech::Adjective, None, "==Kannada=="));

        let set = select_exemplars_by_part_of_speech(&store, "ಹೊಸ", PartOfSpeech::Adjective, 3);
        assert_eq!(set.headwords(), vec!["ಸಣ್ಣ", "ದೊಡ್ಡ"]);
        assert!(set
            .exemplars
            .iter()
            .all(|e| e.source == ExemplarSource::PartOfSpeech));

        let set = select_exemplars_by_part_of_speech(&store, "ದೊಡ್ಡ", PartOfSpeech::Adjective, 3);
        assert_eq!(set.headwords(), vec!["ಸಣ್ಣ"]);
    }
}
