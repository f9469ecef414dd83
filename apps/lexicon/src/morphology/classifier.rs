//! Morphology classifier: maps a headword's final characters to a template.
//!
//! Rules live in ordered tables and are evaluated top to bottom; the first
//! predicate that matches decides the template. Endings overlap (every
//! reflexive and causative verb also ends in the u-class vowel sign), so the
//! table order IS the grammar. Do not reorder without updating the tests.
//!
//! Matching is exact suffix comparison on the raw `char` sequence. Callers
//! that need Unicode normalization must do it before classifying.

use tracing::debug;

use crate::morphology::{ClassificationResult, ClassifyError, PartOfSpeech, TemplateId};

// ────────────────────────────────────────────────────────────────────────────
// Character classes and suffixes
// ────────────────────────────────────────────────────────────────────────────

/// Vowel sign U (ು).
pub const U_CLASS: &[char] = &['\u{0CC1}'];

/// Vowel signs I (ಿ), E (ೆ) and AI (ೈ).
pub const E_I_AI_CLASS: &[char] = &['\u{0CBF}', '\u{0CC6}', '\u{0CC8}'];

/// ಕೊಳ್ಳು, "for oneself".
pub const REFLEXIVE_SUFFIX: &str = "ಕೊಳ್ಳು";

/// ಿಸು after a consonant, ಇಸು after a vowel: "cause to do".
pub const CAUSATIVE_SUFFIXES: &[&str] = &["ಿಸು", "ಇಸು"];

/// Length in chars of the shortest verb suffix pattern (the causatives).
/// Shorter verbs skip the table and take the a-class default.
pub const SHORTEST_VERB_SUFFIX_CHARS: usize = 3;

/// Native verbs whose past participle is irregular (geminate or suppletive):
/// ನಗು → ನಕ್ಕು, ಕೊಡು → ಕೊಟ್ಟು, ಬರು → ಬಂದು, ...
pub const IRREGULAR_STEMS: &[&str] = &[
    "ನಗು", "ಕೊಡು", "ಬಿಡು", "ಇಡು", "ಸುಡು", "ಅಳು", "ಬರು", "ತರು", "ಕೊಲ್ಲು", "ಬೀಳು", "ಏಳು",
    "ಕೀಳು", "ಹೋಗು", "ಆಗು",
];

// ────────────────────────────────────────────────────────────────────────────
// Rule tables
// ────────────────────────────────────────────────────────────────────────────

/// A single (predicate, template) pair.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub explanation: &'static str,
    pub matches: fn(&str) -> bool,
    pub template: TemplateId,
}

/// An ordered rule list plus the template used when nothing matches.
#[derive(Clone, Copy)]
pub struct RuleTable {
    pub rules: &'static [Rule],
    pub fallback: Rule,
    /// Words with fewer chars than this go straight to the fallback.
    pub min_chars: usize,
}

impl RuleTable {
    /// Returns the first rule whose predicate accepts `word`, else the fallback.
    pub fn evaluate(&self, word: &str) -> &Rule {
        if word.chars().count() < self.min_chars {
            return &self.fallback;
        }
        self.rules
            .iter()
            .find(|rule| (rule.matches)(word))
            .unwrap_or(&self.fallback)
    }
}

pub const NOUN_RULES: RuleTable = RuleTable {
    rules: &[
        Rule {
            name: "noun/u-class",
            explanation: "final vowel sign ು (u-class)",
            matches: ends_in_u_class,
            template: TemplateId::DeclU,
        },
        Rule {
            name: "noun/e-i-ai-class",
            explanation: "final vowel sign ಿ, ೆ or ೈ (e/i/ai-class)",
            matches: ends_in_e_i_ai_class,
            template: TemplateId::DeclEIAi,
        },
    ],
    fallback: Rule {
        name: "noun/a-class",
        explanation: "inherent -a or other ending (a-class default)",
        matches: always,
        template: TemplateId::DeclA,
    },
    min_chars: 0,
};

pub const VERB_RULES: RuleTable = RuleTable {
    rules: &[
        Rule {
            name: "verb/reflexive",
            explanation: "reflexive suffix ಕೊಳ್ಳು",
            matches: ends_with_reflexive,
            template: TemplateId::ConjReflexive,
        },
        Rule {
            name: "verb/causative",
            explanation: "causative suffix ಿಸು / ಇಸು",
            matches: ends_with_causative,
            template: TemplateId::ConjCausative,
        },
        Rule {
            name: "verb/irregular",
            explanation: "known irregular stem",
            matches: ends_with_irregular_stem,
            template: TemplateId::ConjIrregular,
        },
        Rule {
            name: "verb/regular-u-class",
            explanation: "regular verb, final vowel sign ು (u-class)",
            matches: ends_in_u_class,
            template: TemplateId::ConjU,
        },
        Rule {
            name: "verb/regular-e-i-ai-class",
            explanation: "regular verb, final vowel sign ಿ, ೆ or ೈ (e/i/ai-class)",
            matches: ends_in_e_i_ai_class,
            template: TemplateId::ConjEIAi,
        },
    ],
    fallback: Rule {
        name: "verb/regular-a-class",
        explanation: "regular verb, inherent -a or other ending (a-class default)",
        matches: always,
        template: TemplateId::ConjA,
    },
    min_chars: SHORTEST_VERB_SUFFIX_CHARS,
};

// ────────────────────────────────────────────────────────────────────────────
// Predicates
// ────────────────────────────────────────────────────────────────────────────

fn ends_in_u_class(word: &str) -> bool {
    word.chars().last().is_some_and(|c| U_CLASS.contains(&c))
}

fn ends_in_e_i_ai_class(word: &str) -> bool {
    word.chars().last().is_some_and(|c| E_I_AI_CLASS.contains(&c))
}

/// The suffix alone is a word in its own right, not an inflected form.
fn has_proper_suffix(word: &str, suffix: &str) -> bool {
    word.len() > suffix.len() && word.ends_with(suffix)
}

fn ends_with_reflexive(word: &str) -> bool {
    has_proper_suffix(word, REFLEXIVE_SUFFIX)
}

fn ends_with_causative(word: &str) -> bool {
    CAUSATIVE_SUFFIXES
        .iter()
        .any(|suffix| has_proper_suffix(word, suffix))
}

fn ends_with_irregular_stem(word: &str) -> bool {
    IRREGULAR_STEMS.iter().any(|stem| word.ends_with(stem))
}

fn always(_: &str) -> bool {
    true
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry point
// ────────────────────────────────────────────────────────────────────────────

/// Returns the rule table for a part of speech, or an error if the part of
/// speech has no inflection templates.
pub fn rules_for(part_of_speech: PartOfSpeech) -> Result<&'static RuleTable, ClassifyError> {
    match part_of_speech {
        PartOfSpeech::Noun => Ok(&NOUN_RULES),
        PartOfSpeech::Verb => Ok(&VERB_RULES),
        other => Err(ClassifyError::UnsupportedPartOfSpeech(other)),
    }
}

/// Classifies a headword. Pure and deterministic: the same
/// (headword, part of speech) always yields the same result.
///
/// Empty words, and verbs shorter than [`SHORTEST_VERB_SUFFIX_CHARS`], never
/// fail; they fall through to the a-class default of their table.
pub fn classify(
    headword: &str,
    part_of_speech: PartOfSpeech,
) -> Result<ClassificationResult, ClassifyError> {
    let table = rules_for(part_of_speech)?;
    let rule = table.evaluate(headword);

    debug!(
        "Classified '{}' ({}) as {} via {}",
        headword, part_of_speech, rule.template, rule.name
    );

    Ok(ClassificationResult {
        headword: headword.to_string(),
        part_of_speech,
        template_id: rule.template,
        matched_rule: rule.name.to_string(),
        explanation: rule.explanation.to_string(),
    })
}

/// Classifies when the part of speech has inflection templates; adjectives
/// and adverbs yield `None` rather than an error.
pub fn classify_if_inflected(
    headword: &str,
    part_of_speech: PartOfSpeech,
) -> Result<Option<ClassificationResult>, ClassifyError> {
    if !part_of_speech.has_inflection_templates() {
        debug!("'{}' ({}) has no inflection template", headword, part_of_speech);
        return Ok(None);
    }
    classify(headword, part_of_speech).map(Some)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
