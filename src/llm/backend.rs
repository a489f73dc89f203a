//! Backend descriptors for token accounting
//!
//! A [`Backend`] identifies which language model will consume the chunks
//! downstream. The planner never talks to the model itself; all it needs is
//! the counting policy (the [`BackendKind`]) and the context-window size
//! encoded in the descriptor name.

use crate::types::{PipelineError, Result};
use serde::{Deserialize, Serialize};

/// Token-accounting policy, selected once at configuration time.
///
/// # Supported Backends
///
/// | Kind | Counting | Notes |
/// |------|----------|-------|
/// | OpenAi | ✅ tiktoken BPE | Window-sliced chunking |
/// | Mistral | ✅ approximated BPE | Window-sliced chunking |
/// | Ollama | ❌ Unimplemented | Logs a warning, yields no chunks |
/// | Generic | ✅ word count | Whitespace word splitting |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    OpenAi,
    Mistral,
    Ollama,
    Generic,
}

impl BackendKind {
    /// Human-readable name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            BackendKind::OpenAi => "OpenAI",
            BackendKind::Mistral => "Mistral",
            BackendKind::Ollama => "Ollama",
            BackendKind::Generic => "Generic",
        }
    }
}

/// Descriptor for a downstream model backend.
///
/// The `name` is a `/`-separated identifier whose final segment encodes the
/// model's context-window size in tokens, e.g. `"openai/gpt-4o/128000"`.
/// The window is parsed once when a planner is configured; a name that does
/// not follow this shape is a configuration defect, not a runtime condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backend {
    pub kind: BackendKind,
    pub name: String,
}

impl Backend {
    pub fn new(kind: BackendKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// Parse the context-window size from the final `/` segment of the name.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Configuration`] when the name is empty, has
    /// no `/` separator, or its final segment is not a positive integer.
    pub fn context_window(&self) -> Result<usize> {
        let segment = self.window_segment()?;
        let window: usize = segment.parse().map_err(|_| {
            PipelineError::Configuration(format!(
                "backend name '{}' has a non-numeric window segment '{}'",
                self.name, segment
            ))
        })?;
        if window == 0 {
            return Err(PipelineError::Configuration(format!(
                "backend name '{}' declares a zero-token context window",
                self.name
            )));
        }
        Ok(window)
    }

    /// Resolve the model name passed to backends whose counter needs one.
    ///
    /// This is the same final `/` segment that carries the window size; the
    /// two have always shared that position in the descriptor format.
    pub fn model_name(&self) -> Result<&str> {
        self.window_segment()
    }

    fn window_segment(&self) -> Result<&str> {
        if self.name.is_empty() {
            return Err(PipelineError::Configuration(
                "backend name is empty".to_string(),
            ));
        }
        if !self.name.contains('/') {
            return Err(PipelineError::Configuration(format!(
                "backend name '{}' has no '/'-delimited window segment",
                self.name
            )));
        }
        // contains('/') guarantees rsplit yields at least one piece
        let segment = self.name.rsplit('/').next().unwrap_or_default();
        if segment.is_empty() {
            return Err(PipelineError::Configuration(format!(
                "backend name '{}' ends with an empty window segment",
                self.name
            )));
        }
        Ok(segment)
    }
}
