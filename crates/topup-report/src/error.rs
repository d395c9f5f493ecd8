//! Error types for the topup-report crate.
//!
//! This module defines semantic error enums for dataset loading and report
//! file writing, following the project's error handling conventions with
//! `thiserror`.

use std::fmt;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Input dataset an error refers to.
///
/// The loading errors carry the dataset so that callers and operators can
/// tell a users failure from a companies failure without string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// The users dataset.
    Users,
    /// The companies dataset.
    Companies,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Users => f.write_str("users"),
            Self::Companies => f.write_str("companies"),
        }
    }
}

/// Errors that can occur when loading an input dataset.
///
/// These errors cover file I/O, JSON parsing, and per-record presence
/// validation. Each variant names the dataset it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The dataset file could not be read.
    #[error("{resource} file not found at '{path}': {message}")]
    FileNotFound {
        /// Dataset the file belongs to.
        resource: Resource,
        /// Path to the dataset file.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The dataset content is not well-formed JSON of the expected shape.
    #[error("invalid {resource} JSON: {message}")]
    InvalidJson {
        /// Dataset the content belongs to.
        resource: Resource,
        /// Description of the parse error.
        message: String,
    },

    /// A record is missing one or more required fields.
    #[error("invalid {resource} record at index {index}: missing required fields: {}", .fields.join(", "))]
    MissingFields {
        /// Dataset the record belongs to.
        resource: Resource,
        /// Index of the record in the dataset array.
        index: usize,
        /// Names of the missing fields, in declaration order.
        fields: Vec<&'static str>,
    },
}

/// Errors that can occur when writing the report file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    /// The report file could not be written.
    #[error("failed to write report to '{path}': {message}")]
    Write {
        /// Path to the report file.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },
}
