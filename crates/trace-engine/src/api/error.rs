use thiserror::Error;

use crate::glyphs::ScriptId;

/// Errors surfaced to the caller of the tutor engine.
///
/// Scoring itself never fails: empty paths and empty guides are valid states
/// that score 0. Only lookups, config checks and data parsing can go wrong.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("unknown script '{0}'")]
    UnknownScript(String),

    #[error("character '{id}' not found in script '{script}'")]
    UnknownCharacter { script: ScriptId, id: String },

    #[error("invalid config: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: &'static str },

    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T, E = TraceError> = std::result::Result<T, E>;
