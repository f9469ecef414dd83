// Generation: exemplar retrieval, prompt assembly and the sentence sandbox.
// All model calls go through llm_client; nothing here talks to Ollama directly.

pub mod exemplar_selector;
pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod sandbox;
