//! Shared state passed between pipeline nodes
//!
//! Each node reads its inputs from named keys and writes its outputs back
//! under its own keys; the map's contents are the only hand-off between
//! nodes.

use crate::types::{Document, PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A value stored under a state key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "type", content = "value")]
pub enum StateValue {
    /// Loaded documents, typically from a fetch node.
    Documents(Vec<Document>),
    /// Raw text, when no document wrapper exists.
    Text(String),
    /// Ordered chunk sequence produced by a parse node.
    Chunks(Vec<String>),
}

/// String-keyed state map threaded through the pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineState {
    values: HashMap<String, StateValue>,
}

impl PipelineState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: StateValue) {
        self.values.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&StateValue> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Fetch a required key.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::MissingInput`] when the key is absent.
    pub fn require(&self, key: &str) -> Result<&StateValue> {
        self.values
            .get(key)
            .ok_or_else(|| PipelineError::MissingInput(format!("state key '{}' not found", key)))
    }

    /// Fetch the chunk sequence stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::MissingInput`] when the key is absent or
    /// holds a non-chunk value.
    pub fn require_chunks(&self, key: &str) -> Result<&[String]> {
        match self.require(key)? {
            StateValue::Chunks(chunks) => Ok(chunks),
            other => Err(PipelineError::MissingInput(format!(
                "state key '{}' holds {} where chunks were expected",
                key,
                other.kind_name()
            ))),
        }
    }
}

impl StateValue {
    fn kind_name(&self) -> &'static str {
        match self {
            StateValue::Documents(_) => "documents",
            StateValue::Text(_) => "text",
            StateValue::Chunks(_) => "chunks",
        }
    }
}
