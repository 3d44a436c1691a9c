use tracing::{debug, warn};

use crate::data_handling::hgnc::IdentifierDictionary;
use crate::error::{AdapterError, Result};
use crate::models::{GeneResult, RawResultRow, UnresolvedGenePolicy, VariantResult};
use crate::post_process::pheval_result::calculate_end_pos;

/// Identifier written for genes the dictionary does not know under the lenient policy.
pub const UNRESOLVED_GENE_IDENTIFIER: &str = "unresolved";

const VARIANT_KEY_SEPARATOR: char = '-';

pub fn resolve_gene_identifier(
    gene_symbol: &str,
    dictionary: &IdentifierDictionary,
    policy: UnresolvedGenePolicy,
) -> Result<String> {
    match dictionary.get(gene_symbol) {
        Some(identifier) => Ok(identifier.to_string()),
        None => match policy {
            UnresolvedGenePolicy::Strict => {
                Err(AdapterError::UnknownGeneSymbol(gene_symbol.to_string()))
            }
            UnresolvedGenePolicy::Lenient => {
                warn!("No identifier found for gene symbol {}", gene_symbol);
                Ok(UNRESOLVED_GENE_IDENTIFIER.to_string())
            }
        },
    }
}

/// Fields of a `chrom-pos-ref-alt` variant key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantKey<'a> {
    pub chrom: &'a str,
    pub pos: u64,
    pub reference: &'a str,
    pub alternate: &'a str,
    end: u64,
}

impl<'a> VariantKey<'a> {
    /// Strict four-field parse. Alleles containing the separator are rejected
    /// instead of being truncated.
    pub fn parse(key: &'a str) -> Result<Self> {
        let fields: Vec<&str> = key.split(VARIANT_KEY_SEPARATOR).collect();
        let [chrom, pos, reference, alternate] = fields[..] else {
            return Err(AdapterError::invalid_variant_key(
                key,
                format!("expected 4 '{VARIANT_KEY_SEPARATOR}'-separated fields, found {}", fields.len()),
            ));
        };
        if let Some(empty) = [("chromosome", chrom), ("reference", reference), ("alternate", alternate)]
            .iter()
            .find(|(_, value)| value.is_empty())
        {
            return Err(AdapterError::invalid_variant_key(key, format!("empty {} field", empty.0)));
        }
        let pos = pos
            .parse::<u64>()
            .map_err(|_| AdapterError::invalid_variant_key(key, format!("position '{pos}' is not numeric")))?;
        if pos == 0 {
            return Err(AdapterError::invalid_variant_key(key, "positions are 1-based"));
        }
        let end = calculate_end_pos(pos, reference)
            .ok_or_else(|| AdapterError::invalid_variant_key(key, "end position out of range"))?;
        Ok(VariantKey {
            chrom,
            pos,
            reference,
            alternate,
            end,
        })
    }

    pub fn end(&self) -> u64 {
        self.end
    }
}

pub fn obtain_chrom(variant_str: &str) -> Result<&str> {
    Ok(VariantKey::parse(variant_str)?.chrom)
}

pub fn obtain_pos(variant_str: &str) -> Result<u64> {
    Ok(VariantKey::parse(variant_str)?.pos)
}

pub fn obtain_ref(variant_str: &str) -> Result<&str> {
    Ok(VariantKey::parse(variant_str)?.reference)
}

pub fn obtain_alt(variant_str: &str) -> Result<&str> {
    Ok(VariantKey::parse(variant_str)?.alternate)
}

/// Turns the raw rows of one file into gene-level and variant-level results.
pub struct ConvertToPhEvalResult<'d> {
    raw_result: Vec<RawResultRow>,
    dictionary: &'d IdentifierDictionary,
    policy: UnresolvedGenePolicy,
}

impl<'d> ConvertToPhEvalResult<'d> {
    pub fn new(
        raw_result: Vec<RawResultRow>,
        dictionary: &'d IdentifierDictionary,
        policy: UnresolvedGenePolicy,
    ) -> Self {
        ConvertToPhEvalResult {
            raw_result,
            dictionary,
            policy,
        }
    }

    /// One `GeneResult` per raw row, in input order.
    pub fn extract_gene_requirements(&self) -> Result<Vec<GeneResult>> {
        self.raw_result
            .iter()
            .map(|entry| {
                Ok(GeneResult {
                    gene_symbol: entry.gene_symbol.clone(),
                    gene_identifier: resolve_gene_identifier(
                        &entry.gene_symbol,
                        self.dictionary,
                        self.policy,
                    )?,
                    score: entry.predict,
                })
            })
            .collect()
    }

    /// One `VariantResult` per raw row, in input order.
    pub fn extract_variant_requirements(&self) -> Result<Vec<VariantResult>> {
        self.raw_result
            .iter()
            .map(|entry| {
                let key = VariantKey::parse(&entry.variant)?;
                debug!("Decomposed {} into {:?}", entry.variant, key);
                Ok(VariantResult {
                    chromosome: key.chrom.to_string(),
                    start: key.pos,
                    end: key.end(),
                    reference: key.reference.to_string(),
                    alternate: key.alternate.to_string(),
                })
            })
            .collect()
    }
}
