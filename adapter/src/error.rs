//! Error taxonomy for the AI-MARRVEL adapter.

use std::path::PathBuf;
use std::process::ExitStatus;

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdapterError {
    /// Raw result table is missing a required column or cannot be parsed.
    #[error("Malformed input {path}: {message}")]
    MalformedInput { path: PathBuf, message: String },

    /// Variant key does not decompose into `chrom-pos-ref-alt`.
    #[error("Invalid variant key '{key}': {reason}")]
    InvalidVariantKey { key: String, reason: String },

    /// Gene symbol has no entry in the identifier dictionary (strict policy only).
    #[error("Unknown gene symbol: {0}")]
    UnknownGeneSymbol(String),

    #[error("Phenopacket error in {path}: {message}")]
    Phenopacket { path: PathBuf, message: String },

    #[error("Incorrect file format for {path}: expected a .vcf or .vcf.gz file")]
    IncorrectFileFormat { path: PathBuf },

    #[error("Incompatible genome assembly '{assembly}' in {path}")]
    IncompatibleGenomeAssembly { assembly: String, path: PathBuf },

    /// `config.yaml` cannot be read into the tool configuration, or holds an unknown value.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Command {command} exited with {status}")]
    CommandFailed { command: String, status: ExitStatus },

    #[error("Executable '{name}' not found on PATH: {source}")]
    ExecutableNotFound {
        name: String,
        #[source]
        source: which::Error,
    },

    #[error("{failed} of {total} raw result files failed to post-process")]
    BatchFailed { failed: usize, total: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AdapterError>;

impl AdapterError {
    pub fn malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn invalid_variant_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidVariantKey {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub fn phenopacket(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Phenopacket {
            path: path.into(),
            message: message.into(),
        }
    }
}
