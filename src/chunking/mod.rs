//! Document Chunking
//!
//! Partitions document text into an ordered sequence of chunks sized to fit
//! a backend's context budget.
//!
//! - [`chunking::planner`](crate::chunking::planner) - Backend-aware chunk planning
//! - [`chunking::splitter`](crate::chunking::splitter) - Word-based fallback splitting
//!
//! # Example
//!
//! ```
//! use chunkflow::chunking::ChunkPlanner;
//! use chunkflow::llm::{Backend, BackendKind};
//!
//! let backend = Backend::new(BackendKind::Generic, "local/4096");
//! let planner = ChunkPlanner::new(&backend)?;
//!
//! let chunks = planner.plan("some document text");
//! assert_eq!(chunks.len(), 1);
//! # Ok::<(), chunkflow::types::PipelineError>(())
//! ```

pub mod planner;
pub mod splitter;

pub use planner::{
    ChunkPlanner, PlannerOptions, TextSource, CONTEXT_HEADROOM, DEFAULT_CHUNK_SIZE, WORD_RESERVE,
};
pub use splitter::split_by_words;
