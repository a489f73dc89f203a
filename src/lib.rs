//! # chunkflow - Content Segmentation for LLM Pipelines
//!
//! Partitions loaded documents (raw text or HTML) into ordered chunk
//! sequences sized to fit the context window of whichever language-model
//! backend consumes them downstream. Different backends tokenize
//! differently, so the per-chunk budget is derived with a backend-specific
//! token counter rather than a fixed character heuristic.
//!
//! ## Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! chunkflow = "0.1"
//! ```
//!
//! ### Planning chunks directly
//!
//! ```
//! use chunkflow::{Backend, BackendKind, ChunkPlanner};
//!
//! # fn main() -> chunkflow::Result<()> {
//! let backend = Backend::new(BackendKind::Generic, "local/4096");
//! let planner = ChunkPlanner::new(&backend)?;
//!
//! let chunks = planner.plan("text scraped from somewhere");
//! assert_eq!(chunks.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ### Running the parse node in a pipeline
//!
//! ```
//! use chunkflow::{Backend, BackendKind, Document, ParseNode, ParseNodeConfig};
//! use chunkflow::pipeline::{PipelineState, StateValue};
//!
//! # fn main() -> chunkflow::Result<()> {
//! let config = ParseNodeConfig::new(Backend::new(BackendKind::Generic, "local/4096"));
//! let node = ParseNode::new("docs", "parsed", config)?;
//!
//! let mut state = PipelineState::new();
//! state.insert(
//!     "docs",
//!     StateValue::Documents(vec![Document::new("<p>scraped page</p>")]),
//! );
//! node.execute(&mut state)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Backend Budgets
//!
//! A backend descriptor names its context window in the final `/` segment,
//! e.g. `"openai/gpt-4o/128000"`. 10% of the window is reserved for prompt
//! and response overhead; the rest is the per-chunk token budget. On the
//! token-counted paths (OpenAI, Mistral) chunk boundaries are budget-wide
//! character offsets, an intentional and documented approximation rather
//! than a token-aligned split. The generic fallback splits on whitespace word
//! counts instead, and Ollama backends currently log a warning and produce
//! no chunks.
//!
//! ## Modules
//!
//! - [`chunking`] - Chunk planner and word splitter
//! - [`html`] - HTML-to-text normalization
//! - [`llm`] - Backend descriptors and token counters
//! - [`pipeline`] - Parse node and shared pipeline state
//! - [`types`] - Documents, errors, and the crate `Result`

pub mod chunking;
pub mod html;
pub mod llm;
pub mod pipeline;
pub mod types;

pub use chunking::{ChunkPlanner, PlannerOptions};
pub use llm::{Backend, BackendKind, TokenCounter};
pub use pipeline::{ParseNode, ParseNodeConfig};
pub use types::{Document, PipelineError, Result};
