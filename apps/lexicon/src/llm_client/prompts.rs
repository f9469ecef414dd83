// Shared prompt fragments.
// Each service that needs completions defines its own prompts.rs alongside it;
// this file holds the rules every Kannada prompt must carry.

/// Script rule appended to every prompt that asks for Kannada text.
pub const SCRIPT_INSTRUCTION: &str = "\
    Use ONLY Kannada script for Kannada words. NEVER use Devanagari or \
    transliteration. Do not mix scripts within a sentence.";

/// Output-format rule for prompts whose reply is pasted into the wiki.
pub const RAW_WIKITEXT_INSTRUCTION: &str = "\
    Output raw Wikitext ONLY. No introductory remarks, no explanations, \
    no markdown code fences.";
