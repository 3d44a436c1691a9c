use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AdapterError;

/// One row of AI-MARRVEL `_integrated.csv` output after projection.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResultRow {
    pub variant: String,
    pub predict: f64,
    pub gene_symbol: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneResult {
    pub gene_symbol: String,
    pub gene_identifier: String,
    pub score: f64,
}

/// Variant-level result. Carries no score: AI-MARRVEL scores are attached to genes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariantResult {
    pub chromosome: String,
    pub start: u64,
    pub end: u64,
    pub reference: String,
    pub alternate: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl FromStr for SortOrder {
    type Err = AdapterError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.to_ascii_uppercase().as_str() {
            "ASCENDING" => Ok(SortOrder::Ascending),
            "DESCENDING" => Ok(SortOrder::Descending),
            other => Err(AdapterError::Config(format!("unknown sort order '{other}'"))),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Ascending => write!(f, "ASCENDING"),
            SortOrder::Descending => write!(f, "DESCENDING"),
        }
    }
}

/// Identifier namespace a gene symbol is resolved into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum GeneIdentifier {
    #[default]
    EnsemblId,
    HgncId,
    EntrezId,
}

/// What to do when a gene symbol is missing from the identifier dictionary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedGenePolicy {
    Strict,
    #[default]
    Lenient,
}
