// Morphology: deterministic mapping from a headword's surface ending to its
// declension/conjugation template. No LLM calls, no I/O.

pub mod classifier;
pub mod directive;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use classifier::{classify, classify_if_inflected};

/// Grammatical category selected by the reviewer for a headword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl PartOfSpeech {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "NOUN",
            PartOfSpeech::Verb => "VERB",
            PartOfSpeech::Adjective => "ADJECTIVE",
            PartOfSpeech::Adverb => "ADVERB",
        }
    }

    /// Only nouns and verbs have declension or conjugation templates.
    pub fn has_inflection_templates(&self) -> bool {
        matches!(self, PartOfSpeech::Noun | PartOfSpeech::Verb)
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartOfSpeech {
    type Err = ClassifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NOUN" => Ok(PartOfSpeech::Noun),
            "VERB" => Ok(PartOfSpeech::Verb),
            "ADJECTIVE" => Ok(PartOfSpeech::Adjective),
            "ADVERB" => Ok(PartOfSpeech::Adverb),
            other => Err(ClassifyError::UnknownPartOfSpeech(other.to_string())),
        }
    }
}

/// Declension and conjugation templates the classifier can emit.
///
/// Serialized as the template name used on the wiki, e.g. `kn-decl-u`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateId {
    #[serde(rename = "kn-decl-u")]
    DeclU,
    #[serde(rename = "kn-decl-e-i-ai")]
    DeclEIAi,
    #[serde(rename = "kn-decl-a")]
    DeclA,
    #[serde(rename = "kn-conj-reflexive")]
    ConjReflexive,
    #[serde(rename = "kn-conj-causative")]
    ConjCausative,
    #[serde(rename = "kn-conj-u-irreg")]
    ConjIrregular,
    #[serde(rename = "kn-conj-u")]
    ConjU,
    #[serde(rename = "kn-conj-e-i-ai")]
    ConjEIAi,
    #[serde(rename = "kn-conj-a")]
    ConjA,
}

impl TemplateId {
    pub const ALL: [TemplateId; 9] = [
        TemplateId::DeclU,
        TemplateId::DeclEIAi,
        TemplateId::DeclA,
        TemplateId::ConjReflexive,
        TemplateId::ConjCausative,
        TemplateId::ConjIrregular,
        TemplateId::ConjU,
        TemplateId::ConjEIAi,
        TemplateId::ConjA,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::DeclU => "kn-decl-u",
            TemplateId::DeclEIAi => "kn-decl-e-i-ai",
            TemplateId::DeclA => "kn-decl-a",
            TemplateId::ConjReflexive => "kn-conj-reflexive",
            TemplateId::ConjCausative => "kn-conj-causative",
            TemplateId::ConjIrregular => "kn-conj-u-irreg",
            TemplateId::ConjU => "kn-conj-u",
            TemplateId::ConjEIAi => "kn-conj-e-i-ai",
            TemplateId::ConjA => "kn-conj-a",
        }
    }

    /// The part of speech this template belongs to.
    pub fn part_of_speech(&self) -> PartOfSpeech {
        match self {
            TemplateId::DeclU | TemplateId::DeclEIAi | TemplateId::DeclA => PartOfSpeech::Noun,
            _ => PartOfSpeech::Verb,
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = ClassifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateId::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| ClassifyError::UnknownTemplate(s.to_string()))
    }
}

/// A headword as submitted for classification. Immutable input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word {
    pub headword: String,
    pub part_of_speech: PartOfSpeech,
    #[serde(default)]
    pub root: Option<String>,
    #[serde(default)]
    pub translation: Option<String>,
}

impl Word {
    pub fn new(headword: impl Into<String>, part_of_speech: PartOfSpeech) -> Self {
        Self {
            headword: headword.into(),
            part_of_speech,
            root: None,
            translation: None,
        }
    }

    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translation = Some(translation.into());
        self
    }
}

/// Output of [`classify`]. Exactly one template per word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub headword: String,
    pub part_of_speech: PartOfSpeech,
    pub template_id: TemplateId,
    /// Name of the rule that fired, e.g. `noun/u-class`.
    pub matched_rule: String,
    /// Human-readable description of the ending that matched.
    pub explanation: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("Unsupported part of speech for classification: {0}")]
    UnsupportedPartOfSpeech(PartOfSpeech),

    #[error("Unknown part of speech: '{0}'")]
    UnknownPartOfSpeech(String),

    #[error("Unknown template identifier: '{0}'")]
    UnknownTemplate(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_of_speech_parses_case_insensitively() {
        assert_eq!("Noun".parse::<PartOfSpeech>(), Ok(PartOfSpeech::Noun));
        assert_eq!(" verb ".parse::<PartOfSpeech>(), Ok(PartOfSpeech::Verb));
        assert!("pronoun".parse::<PartOfSpeech>().is_err());
    }

    #[test]
    fn test_template_id_string_forms_match_serde() {
        for template in TemplateId::ALL {
            let json = serde_json::to_string(&template).unwrap();
            assert_eq!(json, format!("\"{}\"", template.as_str()));
            assert_eq!(template.as_str().parse::<TemplateId>(), Ok(template));
        }
    }

    #[test]
    fn test_only_nouns_and_verbs_inflect() {
        assert!(PartOfSpeech::Noun.has_inflection_templates());
        assert!(PartOfSpeech::Verb.has_inflection_templates());
        assert!(!PartOfSpeech::Adjective.has_inflection_templates());
        assert!(!PartOfSpeech::Adverb.has_inflection_templates());
    }

    #[test]
    fn test_template_part_of_speech() {
        assert_eq!(TemplateId::DeclEIAi.part_of_speech(), PartOfSpeech::Noun);
        assert_eq!(TemplateId::ConjCausative.part_of_speech(), PartOfSpeech::Verb);
    }
}
