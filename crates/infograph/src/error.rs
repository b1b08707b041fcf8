//! Error types for Infograph operations.
//!
//! This module provides the main error type [`InfographicError`]. Layout math
//! never fails; errors come from resolving names (structures, items,
//! templates), decoding options and documents, and I/O.

use std::io;

use thiserror::Error;

use crate::registry::{Slot, VariantKind};

/// The main error type for Infograph operations.
#[derive(Debug, Error)]
pub enum InfographicError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("unknown {kind} `{key}`")]
    NotFound { kind: VariantKind, key: String },

    #[error("structure `{structure}` requires the `{slot}` slot")]
    MissingSlot { structure: String, slot: Slot },

    #[error("invalid options for `{key}`: {source}")]
    InvalidOptions {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid document: {0}")]
    InvalidDocument(#[source] serde_json::Error),

    #[error("unknown template `{0}`")]
    UnknownTemplate(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl InfographicError {
    /// Creates an `InvalidDocument` error from a plain message.
    pub(crate) fn document(message: impl std::fmt::Display) -> Self {
        Self::InvalidDocument(<serde_json::Error as serde::de::Error>::custom(message))
    }
}
