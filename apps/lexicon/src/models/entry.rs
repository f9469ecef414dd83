#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::morphology::{PartOfSpeech, TemplateId};

/// A human-approved dictionary entry. Append-only: never edited in place,
/// superseded by a newer entry for the same headword instead.
///
/// Stored as `{headword, partOfSpeech, templateId, wikitext, ...}`. Documents
/// written with snake_case keys still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedEntry {
    #[serde(default = "Uuid::new_v4", alias = "entry_id")]
    pub entry_id: Uuid,
    pub headword: String,
    #[serde(alias = "part_of_speech")]
    pub part_of_speech: PartOfSpeech,
    /// `None` for parts of speech without an inflection template.
    #[serde(default, alias = "template_id")]
    pub template_id: Option<TemplateId>,
    pub wikitext: String,
    #[serde(default)]
    pub translation: Option<String>,
    #[serde(default = "Utc::now", alias = "approved_at")]
    pub approved_at: DateTime<Utc>,
    /// Where the draft came from, e.g. the model name or "manual".
    #[serde(default)]
    pub provenance: Option<String>,
}

impl VerifiedEntry {
    pub fn new(
        headword: impl Into<String>,
        part_of_speech: PartOfSpeech,
        template_id: impl Into<Option<TemplateId>>,
        wikitext: impl Into<String>,
    ) -> Self {
        Self {
            entry_id: Uuid::new_v4(),
            headword: headword.into(),
            part_of_speech,
            template_id: template_id.into(),
            wikitext: wikitext.into(),
            translation: None,
            approved_at: Utc::now(),
            provenance: None,
        }
    }

    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translation = Some(translation.into());
        self
    }

    pub fn with_provenance(mut self, provenance: impl Into<String>) -> Self {
        self.provenance = Some(provenance.into());
        self
    }

    /// Template name for logs and prompts.
    pub fn template_label(&self) -> &'static str {
        self.template_id.map_or("none", |t| t.as_str())
    }
}
