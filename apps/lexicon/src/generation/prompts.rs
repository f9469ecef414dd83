// All LLM prompt constants for the Generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for dictionary entry generation.
/// Replace: {script_instruction}, {raw_wikitext_instruction}
pub const ENTRY_SYSTEM_TEMPLATE: &str = r#"You are a Kannada lexicographer specializing in Wiktionary formatting.

I. SCRIPT:
{script_instruction}

II. NOUN TEMPLATES:
For nouns ending in -u, use {{kn-decl-u|FullWord|Stem}} (e.g. {{kn-decl-u|ಊರು|ಊರ}}).
For nouns ending in -i, -e or -ai, use {{kn-decl-e-i-ai|FullWord|FullWord}}.
For all other nouns, use {{kn-decl-a|FullWord}}.

III. VERB TEMPLATES:
Reflexive verbs (ending in ಕೊಳ್ಳು) use {{kn-conj-reflexive|PresentStem|PastParticiple|PastStem}}.
Causative verbs (ending in -isu) use {{kn-conj-causative|PresentStem|PastParticiple|PastStem}}.
If a native verb is IRREGULAR (past participle ends in a double consonant like ನಕ್ಕು, ಕೊಟ್ಟು, ಬಿಟ್ಟು), use {{kn-conj-u-irreg|PresentStem|PastParticiple|PastStem}}.
For all other regular verbs ending in -u, use {{kn-conj-u|PresentStem|PastParticiple|PastStem}}.

IV. ETYMOLOGY:
If a word starts with ಪ್ರ- (pra-), ವಿ- (vi-) or ಸಂ- (sam-), it is likely a Sanskrit loan. Use {{bor|kn|sa|SanskritWord}}.
Do NOT invent Proto-Dravidian roots. If unsure, cite the components of the compound using {{compound|kn|Part1|Part2}}.

V. GENDER:
Inanimate objects and abstract concepts are ALWAYS neuter (g=n).

VI. EXAMPLE SENTENCES:
1. Keep sentences SHORT and SIMPLE (maximum 6 words).
2. Use Subject-Object-Verb (SOV) order.
3. Avoid passive voice. Use common everyday contexts.

VII. OUTPUT:
{raw_wikitext_instruction}"#;

/// Entry generation prompt.
/// Replace: {examples_block}, {headword}, {translation}, {part_of_speech},
///          {template_id}, {template_directive}
pub const ENTRY_PROMPT_TEMPLATE: &str = r#"{examples_block}

CRITICAL CONSTRAINTS:
- The word is '{headword}'.
- Its English translation is '{translation}'.
- Part of speech: {part_of_speech}.
- Inflection template: {template_id}.
- TEMPLATE DIRECTIVE: {template_directive}

Now, generate a Wiktionary entry for the word: {headword}"#;

/// Header used when the store has at least one verified entry.
pub const EXAMPLES_HEADER: &str = "Use these verified entries as a formatting guide. \
    Example 1 is the CANONICAL FORMAT REFERENCE: match its section order, headings and \
    template usage exactly. Later examples only illustrate content.";

/// Used instead of the examples block on a cold-start store.
pub const NO_EXAMPLES_NOTE: &str =
    "No verified entries are available yet. Follow the formatting rules exactly.";

/// System prompt for the sentence sandbox.
pub const SANDBOX_SYSTEM: &str = "You are a helpful Kannada linguistic assistant.";

/// Sandbox prompt. Replace: {headword}, {translation}, {grammar_line},
/// {sentence_count}, {requests_block}, {max_words}, {script_instruction}
pub const SANDBOX_PROMPT_TEMPLATE: &str = r#"Word: {headword}
Meaning: {translation}
{grammar_line}

Task: Write {sentence_count} short, simple, everyday Kannada sentences using the word accurately.
{requests_block}

Formatting: one sentence per line as {{ux|kn|Kannada|t=English}}

Examples:
1. {{ux|kn|ರೈಲು ನಿಲ್ದಾಣ ಎಲ್ಲಿದೆ?|t=Where is the train station?}}
2. {{ux|kn|ನಾನು ರೈಲಿನಲ್ಲಿ ಪ್ರಯಾಣಿಸುತ್ತೇನೆ.|t=I travel by train.}}

Rules:
- Maximum {max_words} words per sentence.
- Strictly use Subject-Object-Verb order.
- {script_instruction}
- No archaic language."#;
