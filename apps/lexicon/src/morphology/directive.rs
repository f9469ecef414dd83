// Template directives: the exact inflection-template call the model must emit
// for a classified headword. Injected verbatim into the generation prompt.

use crate::morphology::{ClassificationResult, PartOfSpeech, TemplateId};

const VERB_ARGS: &str = "PresentStem|PastParticiple|PastStem";

/// Renders the template instruction for a classification.
///
/// Nouns get a fully-filled call (`{{kn-decl-u|ಊರು|ಊರ}}`); verbs get a call
/// skeleton whose stems the model fills in. Regular u-class verbs also carry
/// the geminate check, since irregular past participles cannot be detected
/// from the headword alone.
pub fn template_directive(classification: &ClassificationResult) -> String {
    let word = classification.headword.as_str();
    let template = classification.template_id;

    match template {
        TemplateId::DeclU => {
            let stem = u_stem(word);
            format!("Use {{{{{template}|{word}|{stem}}}}}")
        }
        TemplateId::DeclEIAi => format!("Use {{{{{template}|{word}|{word}}}}}"),
        TemplateId::DeclA => format!("Use {{{{{template}|{word}}}}}"),
        TemplateId::ConjU => format!(
            "If the past participle has a double consonant (geminate), use \
            {{{{{irregular}|{VERB_ARGS}}}}}. Otherwise use {{{{{template}|{VERB_ARGS}}}}}.",
            irregular = TemplateId::ConjIrregular
        ),
        _ => format!("Use {{{{{template}|{VERB_ARGS}}}}}"),
    }
}

/// Directive for any word: the template call when there is a classification,
/// otherwise an instruction to leave the inflection table out.
pub fn directive_for(
    part_of_speech: PartOfSpeech,
    classification: Option<&ClassificationResult>,
) -> String {
    match classification {
        Some(c) => template_directive(c),
        None => format!(
            "No inflection template applies to {part_of_speech} words. \
            Do not add a declension or conjugation table."
        ),
    }
}

/// Drops the final vowel sign ು: ಊರು → ಊರ. The template re-adds the
/// inherent vowel when declining.
fn u_stem(word: &str) -> &str {
    word.strip_suffix('\u{0CC1}').unwrap_or(word)
}
