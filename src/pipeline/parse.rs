//! Parse node: HTML normalization plus chunk planning
//!
//! The node owns the glue around the [`ChunkPlanner`]: it pulls its input
//! out of the shared state, optionally normalizes HTML, and writes the
//! resulting chunk sequence back under its output key.

use crate::chunking::planner::{ChunkPlanner, PlannerOptions, DEFAULT_CHUNK_SIZE};
use crate::html::{html_to_text, transform_document};
use crate::llm::backend::Backend;
use crate::pipeline::state::{PipelineState, StateValue};
use crate::types::{Document, PipelineError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for a [`ParseNode`].
///
/// Deserializable from pipeline configuration; every field except the
/// backend descriptor has a default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseNodeConfig {
    /// Log execution at info level instead of debug.
    #[serde(default)]
    pub verbose: bool,
    /// Normalize HTML input to plain text before chunking.
    #[serde(default = "default_parse_html")]
    pub parse_html: bool,
    /// Byte-size budget for the generic fallback path.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Backend the chunks are being prepared for.
    pub llm_model: Backend,
}

fn default_parse_html() -> bool {
    true
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl ParseNodeConfig {
    pub fn new(llm_model: Backend) -> Self {
        Self {
            verbose: false,
            parse_html: true,
            chunk_size: DEFAULT_CHUNK_SIZE,
            llm_model,
        }
    }
}

/// Pipeline node that parses document content and splits it into chunks.
#[derive(Debug)]
pub struct ParseNode {
    node_name: String,
    input_key: String,
    output_key: String,
    verbose: bool,
    parse_html: bool,
    planner: ChunkPlanner,
}

impl ParseNode {
    /// Build a parse node reading from `input_key` and writing to
    /// `output_key`.
    ///
    /// The chunk planner is resolved here, so configuration defects in the
    /// backend descriptor fail construction rather than execution.
    pub fn new(
        input_key: impl Into<String>,
        output_key: impl Into<String>,
        config: ParseNodeConfig,
    ) -> Result<Self> {
        let options = PlannerOptions {
            chunk_size: config.chunk_size,
            ..PlannerOptions::default()
        };
        let planner = ChunkPlanner::with_options(&config.llm_model, options)?;

        Ok(Self {
            node_name: "Parse".to_string(),
            input_key: input_key.into(),
            output_key: output_key.into(),
            verbose: config.verbose,
            parse_html: config.parse_html,
            planner,
        })
    }

    /// Build a parse node around an already-configured planner.
    ///
    /// Useful when the embedding application tuned [`PlannerOptions`] or
    /// injected a token counter. HTML normalization stays enabled and
    /// logging stays at debug level.
    pub fn with_planner(
        input_key: impl Into<String>,
        output_key: impl Into<String>,
        planner: ChunkPlanner,
    ) -> Self {
        Self {
            node_name: "Parse".to_string(),
            input_key: input_key.into(),
            output_key: output_key.into(),
            verbose: false,
            parse_html: true,
            planner,
        }
    }

    /// Override the node name used in logs.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.node_name = name.into();
        self
    }

    /// Enable or disable HTML normalization.
    pub fn with_parse_html(mut self, enabled: bool) -> Self {
        self.parse_html = enabled;
        self
    }

    /// Execute the node against the shared state.
    ///
    /// Reads the input key (documents or raw text), normalizes HTML when
    /// enabled, plans chunks, and inserts them under the output key.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::MissingInput`] when the input key is absent,
    /// holds no documents, or holds an already-chunked value.
    pub fn execute(&self, state: &mut PipelineState) -> Result<()> {
        if self.verbose {
            tracing::info!("--- Executing {} Node ---", self.node_name);
        } else {
            tracing::debug!("--- Executing {} Node ---", self.node_name);
        }

        let document = self.input_document(state)?;
        let chunks = self.planner.plan(&document);

        if self.verbose {
            tracing::info!(
                node = %self.node_name,
                chunks = chunks.len(),
                "parsed content into chunks"
            );
        }

        state.insert(self.output_key.clone(), StateValue::Chunks(chunks));
        Ok(())
    }

    fn input_document(&self, state: &PipelineState) -> Result<Document> {
        match state.require(&self.input_key)? {
            StateValue::Documents(docs) => {
                let first = docs.first().ok_or_else(|| {
                    PipelineError::MissingInput(format!(
                        "state key '{}' holds no documents",
                        self.input_key
                    ))
                })?;
                if self.parse_html {
                    Ok(transform_document(first))
                } else {
                    Ok(first.clone())
                }
            }
            StateValue::Text(text) => {
                if self.parse_html {
                    Ok(Document::new(html_to_text(text)))
                } else {
                    Ok(Document::new(text.clone()))
                }
            }
            StateValue::Chunks(_) => Err(PipelineError::MissingInput(format!(
                "state key '{}' already holds chunks",
                self.input_key
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::backend::BackendKind;

    fn generic_config() -> ParseNodeConfig {
        ParseNodeConfig::new(Backend::new(BackendKind::Generic, "local/4096"))
    }

    #[test]
    fn test_config_defaults() {
        let json = r#"{"llm_model": {"kind": "generic", "name": "local/4096"}}"#;
        let config: ParseNodeConfig = serde_json::from_str(json).unwrap();

        assert!(!config.verbose);
        assert!(config.parse_html);
        assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
    }

    #[test]
    fn test_construction_rejects_malformed_backend() {
        let config = ParseNodeConfig::new(Backend::new(BackendKind::OpenAi, "gpt-4o"));
        let err = ParseNode::new("docs", "parsed", config).unwrap_err();
        assert!(matches!(err, PipelineError::Configuration(_)));
    }

    #[test]
    fn test_empty_document_list_is_missing_input() {
        let node = ParseNode::new("docs", "parsed", generic_config()).unwrap();
        let mut state = PipelineState::new();
        state.insert("docs", StateValue::Documents(vec![]));

        let err = node.execute(&mut state).unwrap_err();
        assert!(matches!(err, PipelineError::MissingInput(_)));
    }
}
