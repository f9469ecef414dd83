//! Entry Generation: orchestrates one drafting call.
//!
//! Flow: classify → select_exemplars (store snapshot) → template directive →
//!       build prompt → generation service → draft.
//!
//! Adjectives and adverbs have no template: they skip classification, draw
//! exemplars from their part of speech only and get a no-template directive.
//!
//! Drafts are NOT verified entries. They only reach the store when a reviewer
//! approves them through the entries endpoint. Collaborator failures are
//! returned as-is: no retry here, no fallback text.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::exemplar_selector::{
    select_exemplars, select_exemplars_by_part_of_speech, ExemplarSet,
};
use crate::generation::prompts::{
    ENTRY_PROMPT_TEMPLATE, ENTRY_SYSTEM_TEMPLATE, EXAMPLES_HEADER, NO_EXAMPLES_NOTE,
    SANDBOX_SYSTEM,
};
use crate::generation::sandbox::{
    build_sandbox_prompt, extract_usage_examples, generate_sandbox_requests, SentenceRequest,
};
use crate::ground_truth::GroundTruthStore;
use crate::llm_client::prompts::{RAW_WIKITEXT_INSTRUCTION, SCRIPT_INSTRUCTION};
use crate::llm_client::GenerationService;
use crate::morphology::directive::directive_for;
use crate::morphology::{classify_if_inflected, ClassificationResult, PartOfSpeech, Word};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// An unreviewed entry produced by the generation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryDraft {
    pub headword: String,
    pub part_of_speech: PartOfSpeech,
    /// `None` for parts of speech without an inflection template.
    pub classification: Option<ClassificationResult>,
    pub template_directive: String,
    pub exemplars: ExemplarSet,
    pub wikitext: String,
    pub model: String,
}

/// Sandbox requests plus whatever the service wrote for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SandboxResult {
    pub requests: Vec<SentenceRequest>,
    pub raw_text: String,
    pub usage_examples: Vec<String>,
    pub model: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipelines
// ────────────────────────────────────────────────────────────────────────────

/// Drafts a dictionary entry for `word` using exemplars from `store`.
pub async fn generate_entry(
    llm: &dyn GenerationService,
    store: &GroundTruthStore,
    word: &Word,
    max_exemplars: usize,
) -> Result<EntryDraft, AppError> {
    let classification = classify_if_inflected(&word.headword, word.part_of_speech)?;
    let exemplars = match &classification {
        Some(c) => select_exemplars(store, c, max_exemplars),
        None => select_exemplars_by_part_of_speech(
            store,
            &word.headword,
            word.part_of_speech,
            max_exemplars,
        ),
    };
    let directive = directive_for(word.part_of_speech, classification.as_ref());

    info!(
        "Generating '{}' ({}, template {}) with {} exemplar(s) from store v{} (canonical: {:?})",
        word.headword,
        word.part_of_speech,
        classification
            .as_ref()
            .map_or("none", |c| c.template_id.as_str()),
        exemplars.len(),
        store.version(),
        exemplars.canonical().map(|e| e.headword.as_str())
    );

    let prompt = build_entry_prompt(word, classification.as_ref(), &directive, &exemplars);
    let completion = llm.complete(&entry_system_prompt(), &prompt).await?;

    Ok(EntryDraft {
        headword: word.headword.clone(),
        part_of_speech: word.part_of_speech,
        classification,
        template_directive: directive,
        exemplars,
        wikitext: completion.text,
        model: completion.model,
    })
}

/// Asks the service for the three sandbox sentences in one call.
pub async fn generate_sandbox(
    llm: &dyn GenerationService,
    word: &Word,
) -> Result<SandboxResult, AppError> {
    let classification = classify_if_inflected(&word.headword, word.part_of_speech)?;
    let requests = generate_sandbox_requests(word, classification.as_ref());
    let prompt = build_sandbox_prompt(&requests);

    info!("Generating sandbox sentences for '{}'", word.headword);

    let completion = llm.complete(SANDBOX_SYSTEM, &prompt).await?;
    let usage_examples = extract_usage_examples(&completion.text);

    Ok(SandboxResult {
        requests: requests.to_vec(),
        raw_text: completion.text,
        usage_examples,
        model: completion.model,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Prompt assembly
// ────────────────────────────────────────────────────────────────────────────

pub fn entry_system_prompt() -> String {
    ENTRY_SYSTEM_TEMPLATE
        .replace("{script_instruction}", SCRIPT_INSTRUCTION)
        .replace("{raw_wikitext_instruction}", RAW_WIKITEXT_INSTRUCTION)
}

/// Fills the entry prompt. Exactly one exemplar (the first) is labelled as
/// the canonical format reference.
pub fn build_entry_prompt(
    word: &Word,
    classification: Option<&ClassificationResult>,
    directive: &str,
    exemplars: &ExemplarSet,
) -> String {
    ENTRY_PROMPT_TEMPLATE
        .replace("{examples_block}", &render_examples_block(exemplars))
        .replace("{headword}", &word.headword)
        .replace(
            "{translation}",
            word.translation.as_deref().unwrap_or("(not provided)"),
        )
        .replace("{part_of_speech}", word.part_of_speech.as_str())
        .replace(
            "{template_id}",
            classification.map_or("none", |c| c.template_id.as_str()),
        )
        .replace("{template_directive}", directive)
}

fn render_examples_block(exemplars: &ExemplarSet) -> String {
    if exemplars.is_empty() {
        return NO_EXAMPLES_NOTE.to_string();
    }

    let mut block = format!("{EXAMPLES_HEADER}\n");
    for (i, entry) in exemplars.entries().enumerate() {
        let label = if i == 0 {
            " (canonical format reference)"
        } else {
            ""
        };
        block.push_str(&format!(
            "\nExample {}{}:\nWord: {}\nTemplate: {}\nOutput:\n{}\n---\n",
            i + 1,
            label,
            entry.headword,
            entry.template_label(),
            entry.wikitext.trim()
        ));
    }
    block
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::{Completion, LlmError};
    use crate::models::VerifiedEntry;
    use crate::morphology::{PartOfSpeech, TemplateId};

    /// Records prompts and replies with canned text.
    struct StubService {
        reply: Result<String, u16>,
        prompts: Mutex<Vec<(String, String)>>,
    }

    impl StubService {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GenerationService for StubService {
        async fn complete(&self, system: &str, prompt: &str) -> Result<Completion, LlmError> {
            self.prompts
                .lock()
                .unwrap()
                .push((system.to_string(), prompt.to_string()));
            match &self.reply {
                Ok(text) => Ok(Completion {
                    text: text.clone(),
                    model: "stub".to_string(),
                }),
                Err(status) => Err(LlmError::Api {
                    status: *status,
                    message: "model not found".to_string(),
                }),
            }
        }
    }

    fn store_with_reflexive_and_regular() -> GroundTruthStore {
        let mut store = GroundTruthStore::new();
        store.add(VerifiedEntry::new(
            "ಮಾಡಿಕೊಳ್ಳು",
            PartOfSpeech::Verb,
            TemplateId::ConjReflexive,
            "==Kannada==\n===Verb===\n{{kn-conj-reflexive|...}}",
        ));
        store.add(VerifiedEntry::new(
            "ಮಾಡು",
            PartOfSpeech::Verb,
            TemplateId::ConjU,
            "==Kannada==\n===Verb===\n{{kn-conj-u|...}}",
        ));
        store
    }

    #[tokio::test]
    async fn test_generate_entry_on_empty_store() {
        let llm = StubService::replying("==Kannada==");
        let word = Word::new("ಮಂಜು", PartOfSpeech::Noun).with_translation("fog");

        let draft = generate_entry(&llm, &GroundTruthStore::new(), &word, 3)
            .await
            .unwrap();

        assert_eq!(
            draft.classification.as_ref().map(|c| c.template_id),
            Some(TemplateId::DeclU)
        );
        assert!(draft.exemplars.is_empty());
        assert_eq!(draft.wikitext, "==Kannada==");
        assert_eq!(draft.template_directive, "Use {{kn-decl-u|ಮಂಜು|ಮಂಜ}}");

        let prompts = llm.prompts.lock().unwrap();
        let (system, prompt) = &prompts[0];
        assert!(system.contains("Kannada lexicographer"));
        assert!(!system.contains("{script_instruction}"));
        assert!(prompt.contains(NO_EXAMPLES_NOTE));
        assert!(prompt.contains("'fog'"));
        assert!(prompt.contains("TEMPLATE DIRECTIVE: Use {{kn-decl-u|ಮಂಜು|ಮಂಜ}}"));
    }

    #[tokio::test]
    async fn test_generate_entry_marks_one_canonical_reference() {
        let llm = StubService::replying("==Kannada==");
        let word = Word::new("ತೊಳೆದುಕೊಳ್ಳು", PartOfSpeech::Verb);
        let store = store_with_reflexive_and_regular();

        let draft = generate_entry(&llm, &store, &word, 2).await.unwrap();
        assert_eq!(draft.exemplars.headwords(), vec!["ಮಾಡಿಕೊಳ್ಳು", "ಮಾಡು"]);

        let prompts = llm.prompts.lock().unwrap();
        let prompt = &prompts[0].1;
        assert_eq!(prompt.matches("canonical format reference").count(), 1);
        assert!(prompt.contains("Example 1 (canonical format reference):\nWord: ಮಾಡಿಕೊಳ್ಳು"));
        assert!(prompt.contains("Example 2:\nWord: ಮಾಡು"));
        assert!(prompt.contains("(not provided)"));
    }

    #[tokio::test]
    async fn test_generate_entry_for_adjective_has_no_template() {
        let llm = StubService::replying("==Kannada==\n===Adjective===");
        let mut store = store_with_reflexive_and_regular();
        store.add(VerifiedEntry::new(
            "ಸಣ್ಣ",
            PartOfSpeech::Adjective,
            None,
            "==Kannada==\n===Adjective===\n'''ಸಣ್ಣ'''",
        ));
        let word = Word::new("ದೊಡ್ಡ", PartOfSpeech::Adjective).with_translation("big");

        let draft = generate_entry(&llm, &store, &word, 3).await.unwrap();

        assert!(draft.classification.is_none());
        assert_eq!(draft.part_of_speech, PartOfSpeech::Adjective);
        assert_eq!(draft.exemplars.headwords(), vec!["ಸಣ್ಣ"]);
        assert!(draft.template_directive.starts_with("No inflection template"));

        let prompts = llm.prompts.lock().unwrap();
        let prompt = &prompts[0].1;
        assert!(prompt.contains("Part of speech: ADJECTIVE."));
        assert!(prompt.contains("Inflection template: none."));
        assert!(prompt.contains("Template: none"));
    }

    #[tokio::test]
    async fn test_generation_failure_propagates_unmodified() {
        let llm = StubService::failing(404);
        let word = Word::new("ಮರ", PartOfSpeech::Noun);

        let err = generate_entry(&llm, &GroundTruthStore::new(), &word, 3)
            .await
            .unwrap_err();

        match err {
            AppError::GenerationUnavailable(LlmError::Api { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "model not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(llm.prompts.lock().unwrap().len(), 1, "no retry in the core");
    }

    #[tokio::test]
    async fn test_generate_sandbox_extracts_usage_examples() {
        let llm = StubService::replying(
            "1. {{ux|kn|ರೈಲು ಬಂತು.|t=The train came.}}\n\
             2. {{ux|kn|ನಾನು ರೈಲು ನೋಡಿದೆ.|t=I saw the train.}}\n\
             3. {{ux|kn|ರೈಲಿನಲ್ಲಿ ಜನ ಇದ್ದಾರೆ.|t=There are people in the train.}}",
        );
        let word = Word::new("ರೈಲು", PartOfSpeech::Noun).with_translation("train");

        let result = generate_sandbox(&llm, &word).await.unwrap();
        assert_eq!(result.requests[0].template_id, Some(TemplateId::DeclU));

        assert_eq!(result.requests.len(), 3);
        assert_eq!(result.usage_examples.len(), 3);
        assert_eq!(result.model, "stub");

        let prompts = llm.prompts.lock().unwrap();
        assert_eq!(prompts[0].0, SANDBOX_SYSTEM);
        assert!(prompts[0].1.contains("Meaning: train"));
    }

    #[tokio::test]
    async fn test_generate_sandbox_for_adverb() {
        let llm = StubService::replying("1. {{ux|kn|ಅವನು ಬೇಗ ಬಂದ.|t=He came early.}}");
        let word = Word::new("ಬೇಗ", PartOfSpeech::Adverb).with_translation("early");

        let result = generate_sandbox(&llm, &word).await.unwrap();

        assert_eq!(result.requests.len(), 3);
        assert!(result.requests.iter().all(|r| r.template_id.is_none()));
        assert_eq!(result.usage_examples.len(), 1);
    }
}
