//! Integration tests for the chunk planner
//!
//! These tests verify budget derivation, per-backend partitioning, and the
//! failure conditions of planner construction.

use chunkflow::chunking::{ChunkPlanner, PlannerOptions};
use chunkflow::llm::{Backend, BackendKind, TokenCounter};
use chunkflow::types::PipelineError;
use rstest::rstest;

/// Counter fake reporting a fixed total regardless of input.
struct FixedCounter(usize);

impl TokenCounter for FixedCounter {
    fn count(&self, _text: &str) -> usize {
        self.0
    }
}

fn counted_planner(kind: BackendKind, name: &str, total_tokens: usize) -> ChunkPlanner {
    ChunkPlanner::with_counter(
        &Backend::new(kind, name),
        PlannerOptions::default(),
        Box::new(FixedCounter(total_tokens)),
    )
    .unwrap()
}

#[test]
fn test_openai_chunk_count_matches_example() {
    // window 100 -> budget 90; 250 counted tokens -> ceil(250/90) = 3 chunks
    let planner = counted_planner(BackendKind::OpenAi, "openai/100", 250);
    let text = "x".repeat(250);

    let chunks = planner.plan(text.as_str());
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks.concat(), text);
}

#[rstest]
#[case(90, 1)]
#[case(91, 2)]
#[case(180, 2)]
#[case(181, 3)]
#[case(250, 3)]
fn test_chunk_count_is_ceiling_division(#[case] total_tokens: usize, #[case] expected: usize) {
    let planner = counted_planner(BackendKind::OpenAi, "openai/100", total_tokens);
    let text = "x".repeat(total_tokens);

    let chunks = planner.plan(text.as_str());
    assert_eq!(chunks.len(), expected);
}

#[test]
fn test_exact_divisibility_has_no_trailing_empty_chunk() {
    let planner = counted_planner(BackendKind::OpenAi, "openai/100", 180);
    let text = "x".repeat(180);

    let chunks = planner.plan(text.as_str());
    assert_eq!(chunks.len(), 2);
    assert!(chunks.iter().all(|c| !c.is_empty()));
}

#[test]
fn test_mistral_path_slices_like_openai() {
    let planner = counted_planner(BackendKind::Mistral, "mistral/100", 250);
    let text = "y".repeat(220);

    let chunks = planner.plan(text.as_str());
    // 3 slices requested, only ceil(220/90) = 3 are non-empty
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks.concat(), text);
}

#[test]
fn test_token_sliced_concatenation_preserves_unicode_text() {
    let text = "héllo wörld → ünïcode contént, över and över again";
    // One counted token per character keeps every 9-char slice populated,
    // so the slices cover the full text and boundaries stay on char edges.
    let planner = counted_planner(BackendKind::OpenAi, "openai/10", text.chars().count());

    let chunks = planner.plan(text);
    assert_eq!(chunks.concat(), text);
    assert!(chunks.iter().all(|c| !c.is_empty()));
}

#[test]
fn test_real_openai_counter_produces_prefix_slices() {
    // No injected counter: cl100k does the counting. Character slices sized
    // by a token budget cover at most num_chunks * budget characters, so the
    // concatenation is a prefix of the input.
    let backend = Backend::new(BackendKind::OpenAi, "openai/10");
    let planner = ChunkPlanner::new(&backend).unwrap();
    let text = "The quick brown fox jumps over the lazy dog. ".repeat(4);

    let chunks = planner.plan(text.as_str());
    assert!(!chunks.is_empty());
    assert!(chunks.iter().all(|c| !c.is_empty()));
    assert!(text.starts_with(&chunks.concat()));
}

#[rstest]
#[case(BackendKind::OpenAi, "openai/128000")]
#[case(BackendKind::Mistral, "mistral/32000")]
#[case(BackendKind::Ollama, "ollama/8192")]
#[case(BackendKind::Generic, "local/4096")]
fn test_empty_text_yields_no_chunks(#[case] kind: BackendKind, #[case] name: &str) {
    let planner = ChunkPlanner::new(&Backend::new(kind, name)).unwrap();
    assert!(planner.plan("").is_empty());
}

#[test]
fn test_ollama_yields_no_chunks_without_error() {
    let backend = Backend::new(BackendKind::Ollama, "ollama/8192");
    let planner = ChunkPlanner::new(&backend).unwrap();

    let large = "word ".repeat(50_000);
    assert!(planner.plan(large.as_str()).is_empty());
}

#[rstest]
#[case(BackendKind::OpenAi)]
#[case(BackendKind::Mistral)]
#[case(BackendKind::Ollama)]
#[case(BackendKind::Generic)]
fn test_name_without_separator_fails_construction(#[case] kind: BackendKind) {
    let err = ChunkPlanner::new(&Backend::new(kind, "gpt-4o")).unwrap_err();
    assert!(matches!(err, PipelineError::Configuration(_)));
}

#[rstest]
#[case(BackendKind::OpenAi)]
#[case(BackendKind::Generic)]
fn test_non_numeric_window_fails_construction(#[case] kind: BackendKind) {
    let err = ChunkPlanner::new(&Backend::new(kind, "openai/gpt-4o")).unwrap_err();
    assert!(matches!(err, PipelineError::Configuration(_)));
}

#[test]
fn test_generic_default_budget_keeps_thousand_words_together() {
    // min(4096 - 500, 4096 * 0.9) = 3596 words per chunk
    let backend = Backend::new(BackendKind::Generic, "local/4096");
    let planner = ChunkPlanner::new(&backend).unwrap();

    let text = (0..1000)
        .map(|i| format!("w{}", i))
        .collect::<Vec<_>>()
        .join(" ");
    let chunks = planner.plan(text.as_str());

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].split_whitespace().count(), 1000);
}

#[test]
fn test_generic_word_bound_and_ordering() {
    // chunk_size 510 -> budget min(10, 459) = 10 words per chunk
    let backend = Backend::new(BackendKind::Generic, "local/4096");
    let options = PlannerOptions {
        chunk_size: 510,
        ..PlannerOptions::default()
    };
    let planner = ChunkPlanner::with_options(&backend, options).unwrap();

    let words: Vec<String> = (0..25).map(|i| format!("w{}", i)).collect();
    let chunks = planner.plan(words.join(" ").as_str());

    assert_eq!(chunks.len(), 3);
    for chunk in &chunks {
        assert!(chunk.split_whitespace().count() <= 10);
    }

    // Non-overlapping and ordered: rejoining reproduces the word sequence
    let rejoined: Vec<&str> = chunks
        .iter()
        .flat_map(|c| c.split_whitespace())
        .collect();
    assert_eq!(rejoined, words.iter().map(String::as_str).collect::<Vec<_>>());
}

#[test]
fn test_injected_options_change_generic_budget() {
    let backend = Backend::new(BackendKind::Generic, "local/4096");
    let options = PlannerOptions {
        chunk_size: 1000,
        word_reserve: 100,
        headroom: 0.5,
    };
    let planner = ChunkPlanner::with_options(&backend, options).unwrap();

    // min(1000 - 100, 1000 * 0.5) = 500
    assert_eq!(planner.budget(), Some(500));
}
