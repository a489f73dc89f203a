//! Chunk planning against a backend's context budget
//!
//! The planner turns a document into an ordered sequence of chunks, each
//! sized to fit under the target backend's effective context window. All
//! configuration work (window parsing, budget math, tokenizer loading)
//! happens once in the constructor; [`ChunkPlanner::plan`] is then a pure,
//! synchronous string operation.

use crate::chunking::splitter::split_by_words;
use crate::llm::backend::{Backend, BackendKind};
use crate::llm::tokenizer::{MistralTokenCounter, OpenAiTokenCounter, TokenCounter};
use crate::types::{Document, PipelineError, Result};

/// Default byte-size budget for the generic word-splitting path.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Fraction of the context window available for document content; the
/// remaining 10% is reserved for prompt and response overhead.
pub const CONTEXT_HEADROOM: f64 = 0.9;

/// Flat reservation subtracted from `chunk_size` on the generic path.
pub const WORD_RESERVE: usize = 500;

/// Tunable planner parameters.
///
/// The defaults match production behavior; tests and embedding applications
/// may inject their own values.
#[derive(Debug, Clone)]
pub struct PlannerOptions {
    /// Byte-size budget for the generic fallback path.
    pub chunk_size: usize,
    /// Fraction of the context window usable for content.
    pub headroom: f64,
    /// Flat word reservation on the generic path.
    pub word_reserve: usize,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            headroom: CONTEXT_HEADROOM,
            word_reserve: WORD_RESERVE,
        }
    }
}

/// Anything the planner can read text out of.
///
/// Lets callers pass either a [`Document`] or raw text without wrapping.
pub trait TextSource {
    fn text(&self) -> &str;
}

impl TextSource for Document {
    fn text(&self) -> &str {
        &self.page_content
    }
}

impl TextSource for str {
    fn text(&self) -> &str {
        self
    }
}

impl TextSource for String {
    fn text(&self) -> &str {
        self
    }
}

/// Partitioning strategy, resolved once from the backend kind.
enum Strategy {
    /// Count tokens, then cut budget-wide character slices (OpenAI, Mistral).
    TokenWindow {
        counter: Box<dyn TokenCounter>,
        budget: usize,
    },
    /// Group whitespace-delimited words under a word budget (generic).
    WordWindow { max_words: usize },
    /// Token counting not implemented for this backend (Ollama).
    Unsupported,
}

impl std::fmt::Debug for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::TokenWindow { budget, .. } => f
                .debug_struct("TokenWindow")
                .field("budget", budget)
                .finish_non_exhaustive(),
            Strategy::WordWindow { max_words } => f
                .debug_struct("WordWindow")
                .field("max_words", max_words)
                .finish(),
            Strategy::Unsupported => f.write_str("Unsupported"),
        }
    }
}

/// Plans how a document is partitioned for a specific backend.
#[derive(Debug)]
pub struct ChunkPlanner {
    kind: BackendKind,
    backend_name: String,
    strategy: Strategy,
}

impl ChunkPlanner {
    /// Build a planner for `backend` with default [`PlannerOptions`].
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Configuration`] when the backend name is
    /// malformed or the derived budget is zero, and
    /// [`PipelineError::Tokenizer`] when tokenizer data fails to load.
    /// Configuration defects surface here, before any chunking attempt.
    pub fn new(backend: &Backend) -> Result<Self> {
        Self::build(backend, PlannerOptions::default(), None)
    }

    /// Build a planner with explicit options.
    pub fn with_options(backend: &Backend, options: PlannerOptions) -> Result<Self> {
        Self::build(backend, options, None)
    }

    /// Build a planner with an injected token counter.
    ///
    /// Only meaningful for token-counted kinds; the counter is ignored on
    /// the generic and Ollama paths.
    pub fn with_counter(
        backend: &Backend,
        options: PlannerOptions,
        counter: Box<dyn TokenCounter>,
    ) -> Result<Self> {
        Self::build(backend, options, Some(counter))
    }

    fn build(
        backend: &Backend,
        options: PlannerOptions,
        counter_override: Option<Box<dyn TokenCounter>>,
    ) -> Result<Self> {
        // The window segment is validated for every kind, including the two
        // that never read the parsed value: a descriptor that cannot name
        // its window is a configuration defect regardless of backend.
        let window = backend.context_window()?;

        let strategy = match backend.kind {
            BackendKind::OpenAi => {
                let counter: Box<dyn TokenCounter> = match counter_override {
                    Some(counter) => counter,
                    None => Box::new(OpenAiTokenCounter::new()?),
                };
                Strategy::TokenWindow {
                    counter,
                    budget: token_budget(backend, window, options.headroom)?,
                }
            }
            BackendKind::Mistral => {
                let counter: Box<dyn TokenCounter> = match counter_override {
                    Some(counter) => counter,
                    None => Box::new(MistralTokenCounter::new(backend.model_name()?)?),
                };
                Strategy::TokenWindow {
                    counter,
                    budget: token_budget(backend, window, options.headroom)?,
                }
            }
            BackendKind::Ollama => Strategy::Unsupported,
            BackendKind::Generic => {
                let max_words = options
                    .chunk_size
                    .saturating_sub(options.word_reserve)
                    .min((options.chunk_size as f64 * options.headroom) as usize);
                Strategy::WordWindow { max_words }
            }
        };

        Ok(Self {
            kind: backend.kind,
            backend_name: backend.name.clone(),
            strategy,
        })
    }

    /// Partition `source` into ordered, non-empty chunks.
    ///
    /// On the token-counted paths the chunk count is
    /// `ceil(total_tokens / budget)` and each chunk is a budget-wide
    /// *character* slice of the original text: numeric offsets sized by the
    /// token budget, not token-aligned boundaries. This approximation is
    /// kept for compatibility with existing pipelines: slices past the text
    /// length vanish, and text past the final slice is not emitted.
    ///
    /// Empty input yields no chunks. An unsupported backend (Ollama) logs a
    /// warning and yields no chunks instead of failing; configuration
    /// defects, by contrast, already failed at construction.
    pub fn plan<S: TextSource + ?Sized>(&self, source: &S) -> Vec<String> {
        let text = source.text();
        if text.is_empty() {
            return Vec::new();
        }

        match &self.strategy {
            Strategy::TokenWindow { counter, budget } => {
                let total_tokens = counter.count(text);
                let num_chunks = total_tokens.div_ceil(*budget);
                tracing::debug!(
                    backend = %self.backend_name,
                    total_tokens,
                    budget,
                    num_chunks,
                    "planned token-window chunks"
                );
                window_slices(text, *budget, num_chunks)
            }
            Strategy::WordWindow { max_words } => split_by_words(text, *max_words),
            Strategy::Unsupported => {
                tracing::warn!(
                    "token counting for {} backend '{}' is not implemented, producing no chunks",
                    self.kind.name(),
                    self.backend_name
                );
                Vec::new()
            }
        }
    }

    /// The backend kind this planner was configured for.
    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    /// Per-chunk budget: tokens on the counted paths, words on the generic
    /// path, none for unsupported backends.
    pub fn budget(&self) -> Option<usize> {
        match &self.strategy {
            Strategy::TokenWindow { budget, .. } => Some(*budget),
            Strategy::WordWindow { max_words } => Some(*max_words),
            Strategy::Unsupported => None,
        }
    }
}

fn token_budget(backend: &Backend, window: usize, headroom: f64) -> Result<usize> {
    let budget = (window as f64 * headroom) as usize;
    if budget == 0 {
        return Err(PipelineError::Configuration(format!(
            "backend '{}' context window of {} tokens leaves no room for content",
            backend.name, window
        )));
    }
    Ok(budget)
}

/// Cut `num_chunks` slices of `width` characters each, dropping empty ones.
///
/// Boundaries land on `char` boundaries so every slice is valid UTF-8, but
/// they are character counts, not token counts: when the text holds more
/// than `num_chunks * width` characters the tail past the final slice is
/// not emitted, and when it holds fewer the trailing slices vanish.
fn window_slices(text: &str, width: usize, num_chunks: usize) -> Vec<String> {
    let mut bounds = vec![0usize];
    for (seen, (offset, _)) in text.char_indices().enumerate() {
        if seen > 0 && seen % width == 0 {
            bounds.push(offset);
        }
    }
    bounds.push(text.len());

    (0..num_chunks)
        .filter_map(|i| {
            let start = *bounds.get(i)?;
            let end = *bounds.get(i + 1)?;
            (start < end).then(|| text[start..end].to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_slices_exact_cover() {
        let chunks = window_slices("abcdef", 2, 3);
        assert_eq!(chunks, vec!["ab", "cd", "ef"]);
    }

    #[test]
    fn test_window_slices_drops_trailing_empties() {
        let chunks = window_slices("abc", 2, 4);
        assert_eq!(chunks, vec!["ab", "c"]);
    }

    #[test]
    fn test_window_slices_truncates_past_last_slice() {
        // 6 chars but only 2 slices of width 2 requested
        let chunks = window_slices("abcdef", 2, 2);
        assert_eq!(chunks, vec!["ab", "cd"]);
    }

    #[test]
    fn test_window_slices_respect_char_boundaries() {
        let chunks = window_slices("héllo wörld", 4, 3);
        assert_eq!(chunks.concat(), "héllo wörld");
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 4);
        }
    }

    #[test]
    fn test_budget_accessor() {
        let backend = Backend::new(BackendKind::Generic, "local/4096");
        let planner = ChunkPlanner::new(&backend).unwrap();
        // min(4096 - 500, 4096 * 0.9)
        assert_eq!(planner.budget(), Some(3596));
        assert_eq!(planner.kind(), BackendKind::Generic);
    }

    #[test]
    fn test_zero_effective_budget_rejected() {
        let backend = Backend::new(BackendKind::OpenAi, "openai/1");
        let err = ChunkPlanner::new(&backend).unwrap_err();
        assert!(matches!(err, PipelineError::Configuration(_)));
    }
}
