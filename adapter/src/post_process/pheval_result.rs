//! Standardised PhEval result writer.
//!
//! Gene results are ranked by score. Variant results have no score in
//! AI-MARRVEL output, so the requested sort order has nothing to act on:
//! they keep their input order and are ranked by position.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::{GeneResult, SortOrder, VariantResult};

pub const GENE_RESULTS_DIR: &str = "pheval_gene_results";
pub const VARIANT_RESULTS_DIR: &str = "pheval_variant_results";

/// `start + len(ref) - 1`, or `None` when the end does not fit in a `u64`.
pub fn calculate_end_pos(variant_start: u64, variant_ref: &str) -> Option<u64> {
    variant_start.checked_add((variant_ref.len() as u64).saturating_sub(1))
}

#[derive(Debug, Serialize)]
pub struct RankedGeneRow {
    pub rank: usize,
    pub score: f64,
    pub gene_symbol: String,
    pub gene_identifier: String,
}

#[derive(Debug, Serialize)]
pub struct RankedVariantRow {
    pub rank: usize,
    pub chromosome: String,
    pub start: u64,
    pub end: u64,
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(rename = "alt")]
    pub alternate: String,
}

/// A result kind the standardised writer knows how to rank and serialise.
pub trait StandardisedResult: Sized {
    type Row: Serialize;

    const RESULTS_DIR: &'static str;
    const FILE_SUFFIX: &'static str;
    const HEADER: &'static [&'static str];

    fn score(&self) -> Option<f64>;

    /// Results sharing a key are duplicates; only the first survives ranking.
    fn dedup_key(&self) -> String;

    fn into_row(self, rank: usize) -> Self::Row;
}

impl StandardisedResult for GeneResult {
    type Row = RankedGeneRow;

    const RESULTS_DIR: &'static str = GENE_RESULTS_DIR;
    const FILE_SUFFIX: &'static str = "-pheval_gene_result.tsv";
    const HEADER: &'static [&'static str] = &["rank", "score", "gene_symbol", "gene_identifier"];

    fn score(&self) -> Option<f64> {
        Some(self.score)
    }

    fn dedup_key(&self) -> String {
        self.gene_symbol.clone()
    }

    fn into_row(self, rank: usize) -> RankedGeneRow {
        RankedGeneRow {
            rank,
            score: self.score,
            gene_symbol: self.gene_symbol,
            gene_identifier: self.gene_identifier,
        }
    }
}

impl StandardisedResult for VariantResult {
    type Row = RankedVariantRow;

    const RESULTS_DIR: &'static str = VARIANT_RESULTS_DIR;
    const FILE_SUFFIX: &'static str = "-pheval_variant_result.tsv";
    const HEADER: &'static [&'static str] = &["rank", "chromosome", "start", "end", "ref", "alt"];

    fn score(&self) -> Option<f64> {
        None
    }

    fn dedup_key(&self) -> String {
        format!(
            "{}-{}-{}-{}-{}",
            self.chromosome, self.start, self.end, self.reference, self.alternate
        )
    }

    fn into_row(self, rank: usize) -> RankedVariantRow {
        RankedVariantRow {
            rank,
            chromosome: self.chromosome,
            start: self.start,
            end: self.end,
            reference: self.reference,
            alternate: self.alternate,
        }
    }
}

fn compare_scores(a: Option<f64>, b: Option<f64>, sort_order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match sort_order {
            SortOrder::Ascending => a.total_cmp(&b),
            SortOrder::Descending => b.total_cmp(&a),
        },
        _ => Ordering::Equal,
    }
}

/// Sorts (stable), drops duplicates keeping the first, then ranks.
///
/// Tied scores share the largest position they span ("max" ranking).
/// Unscored results are ranked by position.
pub fn rank_results<R: StandardisedResult>(results: Vec<R>, sort_order: SortOrder) -> Vec<R::Row> {
    let mut results = results;
    results.sort_by(|a, b| compare_scores(a.score(), b.score(), sort_order));

    let mut seen = HashSet::new();
    let unique: Vec<R> = results
        .into_iter()
        .filter(|result| seen.insert(result.dedup_key()))
        .collect();

    let scores: Vec<Option<f64>> = unique.iter().map(R::score).collect();
    let mut ranks = vec![0; unique.len()];
    let mut i = 0;
    while i < scores.len() {
        let mut j = i + 1;
        if scores[i].is_some() {
            while j < scores.len() && scores[j] == scores[i] {
                j += 1;
            }
        }
        for rank in &mut ranks[i..j] {
            *rank = j;
        }
        i = j;
    }

    unique
        .into_iter()
        .zip(ranks)
        .map(|(result, rank)| result.into_row(rank))
        .collect()
}

/// Path of the standardised file for `tool_result_path` (named after its stem).
pub fn standardised_result_path<R: StandardisedResult>(
    output_dir: &Path,
    tool_result_path: &Path,
) -> PathBuf {
    let stem = tool_result_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_dir
        .join(R::RESULTS_DIR)
        .join(format!("{stem}{}", R::FILE_SUFFIX))
}

/// Ranks `pheval_result` and writes it as a tab-separated file below `output_dir`,
/// overwriting any earlier output for the same tool result.
pub fn generate_pheval_result<R: StandardisedResult>(
    pheval_result: Vec<R>,
    sort_order: SortOrder,
    output_dir: &Path,
    tool_result_path: &Path,
) -> Result<PathBuf> {
    let output_path = standardised_result_path::<R>(output_dir, tool_result_path);
    if let Some(parent) = output_path.parent() {
        create_dir_all(parent)?;
    }

    if pheval_result.is_empty() {
        warn!("No results found for {}", tool_result_path.display());
    }
    let total = pheval_result.len();
    let ranked = rank_results(pheval_result, sort_order);
    debug!(
        "Ranked {} of {} results {} for {}",
        ranked.len(),
        total,
        sort_order,
        tool_result_path.display()
    );

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_path(&output_path)?;
    wtr.write_record(R::HEADER)?;
    for row in &ranked {
        wtr.serialize(row)?;
    }
    wtr.flush()?;

    info!("Wrote {} results to {}", ranked.len(), output_path.display());
    Ok(output_path)
}
