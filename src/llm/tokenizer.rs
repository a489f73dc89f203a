//! Per-backend token counters
//!
//! Counting is the only tokenizer operation the planner needs: given text,
//! return how many tokens the target backend would see. Counters are pure
//! functions of their input and are resolved once when a planner is built,
//! so per-call work is a single `count`.

use crate::types::{PipelineError, Result};
use tiktoken_rs::{cl100k_base, CoreBPE};

/// Counts tokens the way a specific backend's tokenizer would.
///
/// Implementations must be pure: same text, same count, no side effects.
pub trait TokenCounter: Send + Sync {
    fn count(&self, text: &str) -> usize;
}

/// Token counter for OpenAI-family models.
///
/// Uses the `cl100k_base` BPE, loaded once at construction.
pub struct OpenAiTokenCounter {
    bpe: CoreBPE,
}

impl OpenAiTokenCounter {
    pub fn new() -> Result<Self> {
        let bpe = cl100k_base().map_err(|e| PipelineError::Tokenizer(e.to_string()))?;
        Ok(Self { bpe })
    }
}

impl TokenCounter for OpenAiTokenCounter {
    fn count(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }
}

/// Token counter for Mistral-family models.
///
/// Mistral's own tokenizer is not redistributed as a Rust crate, so counts
/// are approximated with `cl100k_base`. The resolved model name is kept for
/// diagnostics and future per-model vocabularies.
pub struct MistralTokenCounter {
    model: String,
    bpe: CoreBPE,
}

impl MistralTokenCounter {
    pub fn new(model: impl Into<String>) -> Result<Self> {
        let bpe = cl100k_base().map_err(|e| PipelineError::Tokenizer(e.to_string()))?;
        Ok(Self {
            model: model.into(),
            bpe,
        })
    }

    /// The model name this counter was resolved for.
    pub fn model(&self) -> &str {
        &self.model
    }
}

impl TokenCounter for MistralTokenCounter {
    fn count(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }
}
