//! Sentence Sandbox: structured requests for trial usage examples.
//!
//! Issues no completion calls itself. It produces exactly three SOV sentence
//! requests per word (a fixed constant, not a per-call option) and the markup
//! helpers that wrap accepted sentences in `{{ux|kn|...}}`.

use serde::{Deserialize, Serialize};

use crate::generation::prompts::SANDBOX_PROMPT_TEMPLATE;
use crate::llm_client::prompts::SCRIPT_INSTRUCTION;
use crate::morphology::{ClassificationResult, PartOfSpeech, TemplateId, Word};

/// Sentences requested per word.
pub const SANDBOX_SENTENCE_COUNT: usize = 3;

/// Upper bound on words per generated sentence.
pub const MAX_SENTENCE_WORDS: usize = 8;

const LANGUAGE_CODE: &str = "kn";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WordOrder {
    #[serde(rename = "SOV")]
    SubjectObjectVerb,
}

/// One usage-example request handed to the generation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceRequest {
    /// 1-based position within the batch.
    pub ordinal: usize,
    pub headword: String,
    pub translation: Option<String>,
    pub part_of_speech: PartOfSpeech,
    /// Agreement hint; absent for adjectives and adverbs.
    pub template_id: Option<TemplateId>,
    pub word_order: WordOrder,
    pub max_words: usize,
    /// Grammatical role or tense the sentence should exercise.
    pub focus: String,
}

/// Builds the three sandbox requests for a word, whatever its word class.
///
/// Nouns rotate through subject, object and locative use; verbs through
/// present, past and imperative. Other parts of speech get three free
/// sentences and no template hint.
pub fn generate_sandbox_requests(
    word: &Word,
    classification: Option<&ClassificationResult>,
) -> [SentenceRequest; SANDBOX_SENTENCE_COUNT] {
    let focuses = focus_for(word.part_of_speech);
    std::array::from_fn(|i| SentenceRequest {
        ordinal: i + 1,
        headword: word.headword.clone(),
        translation: word.translation.clone(),
        part_of_speech: word.part_of_speech,
        template_id: classification.map(|c| c.template_id),
        word_order: WordOrder::SubjectObjectVerb,
        max_words: MAX_SENTENCE_WORDS,
        focus: focuses[i].to_string(),
    })
}

fn focus_for(part_of_speech: PartOfSpeech) -> [&'static str; SANDBOX_SENTENCE_COUNT] {
    match part_of_speech {
        PartOfSpeech::Noun => [
            "the word as the subject (nominative)",
            "the word as the object (accusative or dative)",
            "the word in a locative phrase (-alli)",
        ],
        PartOfSpeech::Verb => [
            "the verb in the present-future tense",
            "the verb in the past tense",
            "the verb as an imperative or request",
        ],
        _ => [
            "a simple everyday statement",
            "a simple question",
            "a simple description",
        ],
    }
}

/// Wraps accepted sentence text in the usage-example template.
pub fn render_usage_template(sentence_text: &str) -> String {
    format!("{{{{ux|{LANGUAGE_CODE}|{}}}}}", sentence_text.trim())
}

/// Same as [`render_usage_template`] with an English gloss.
pub fn render_usage_template_with_translation(sentence_text: &str, translation: &str) -> String {
    format!(
        "{{{{ux|{LANGUAGE_CODE}|{}|t={}}}}}",
        sentence_text.trim(),
        translation.trim()
    )
}

/// Builds the single prompt that asks for all sandbox sentences at once.
pub fn build_sandbox_prompt(requests: &[SentenceRequest]) -> String {
    let Some(first) = requests.first() else {
        return String::new();
    };

    let requests_block = requests
        .iter()
        .map(|r| format!("{}. SOV sentence featuring {}.", r.ordinal, r.focus))
        .collect::<Vec<_>>()
        .join("\n");

    SANDBOX_PROMPT_TEMPLATE
        .replace("{headword}", &first.headword)
        .replace(
            "{translation}",
            first.translation.as_deref().unwrap_or("(not provided)"),
        )
        .replace("{grammar_line}", &grammar_line(first))
        .replace("{sentence_count}", &requests.len().to_string())
        .replace("{requests_block}", &requests_block)
        .replace("{max_words}", &first.max_words.to_string())
        .replace("{script_instruction}", SCRIPT_INSTRUCTION)
}

fn grammar_line(request: &SentenceRequest) -> String {
    match request.template_id {
        Some(template) => format!(
            "Inflection template: {template} (inflect the word so it agrees with this pattern)"
        ),
        None => format!(
            "Part of speech: {} (no inflection template)",
            request.part_of_speech
        ),
    }
}

/// Pulls the `{{ux|kn|...}}` calls out of free-form model output.
pub fn extract_usage_examples(text: &str) -> Vec<String> {
    let open = format!("{{{{ux|{LANGUAGE_CODE}|");
    text.lines()
        .filter_map(|line| {
            let start = line.find(&open)?;
            let end = line[start..].find("}}")? + start + 2;
            Some(line[start..end].to_string())
        })
        .collect()
}
