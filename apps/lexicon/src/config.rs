use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::generation::exemplar_selector::DEFAULT_MAX_EXEMPLARS;
use crate::llm_client::DEFAULT_MODEL;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub ground_truth_path: PathBuf,
    pub ollama_url: String,
    pub ollama_model: String,
    pub max_exemplars: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            ground_truth_path: env_or("GROUND_TRUTH_PATH", "verified_kannada_entries.json").into(),
            ollama_url: env_or("OLLAMA_URL", "http://localhost:11434"),
            ollama_model: env_or("OLLAMA_MODEL", DEFAULT_MODEL),
            max_exemplars: env_or("MAX_EXEMPLARS", &DEFAULT_MAX_EXEMPLARS.to_string())
                .parse::<usize>()
                .context("MAX_EXEMPLARS must be a non-negative integer")?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
