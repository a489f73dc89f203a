use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============= Document Types =============

/// A loaded document flowing through the pipeline.
///
/// Only `page_content` is inspected by the chunk planner; `metadata` is
/// carried along untouched so downstream nodes keep provenance information
/// (source URL, fetch timestamp, and similar).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub page_content: String,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Document {
    pub fn new(page_content: impl Into<String>) -> Self {
        Self {
            page_content: page_content.into(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_metadata(
        page_content: impl Into<String>,
        metadata: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            page_content: page_content.into(),
            metadata,
        }
    }
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Tokenizer error: {0}")]
    Tokenizer(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
