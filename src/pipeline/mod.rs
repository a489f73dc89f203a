//! Pipeline Nodes and Shared State
//!
//! Nodes communicate exclusively through a [`PipelineState`] map: each node
//! reads the keys it needs and writes its outputs back. The [`ParseNode`]
//! is the segmentation step of the pipeline, sitting between document
//! loading and downstream model calls.
//!
//! # Usage
//!
//! ```
//! use chunkflow::llm::{Backend, BackendKind};
//! use chunkflow::pipeline::{ParseNode, ParseNodeConfig, PipelineState, StateValue};
//! use chunkflow::types::Document;
//!
//! let config = ParseNodeConfig::new(Backend::new(BackendKind::Generic, "local/4096"));
//! let node = ParseNode::new("docs", "parsed", config)?;
//!
//! let mut state = PipelineState::new();
//! state.insert(
//!     "docs",
//!     StateValue::Documents(vec![Document::new("<p>Some scraped page</p>")]),
//! );
//! node.execute(&mut state)?;
//!
//! assert!(!state.require_chunks("parsed")?.is_empty());
//! # Ok::<(), chunkflow::types::PipelineError>(())
//! ```

pub mod parse;
pub mod state;

pub use parse::{ParseNode, ParseNodeConfig};
pub use state::{PipelineState, StateValue};
