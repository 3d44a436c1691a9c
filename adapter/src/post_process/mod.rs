pub mod convert;
pub mod pheval_result;
pub mod raw_result;

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::data_handling::hgnc::IdentifierDictionary;
use crate::error::{AdapterError, Result};
use crate::helper_functions::all_files;
use crate::models::{GeneIdentifier, SortOrder, UnresolvedGenePolicy};
use convert::ConvertToPhEvalResult;
use pheval_result::generate_pheval_result;
use raw_result::read_raw_result;

pub const RAW_RESULT_SUFFIX: &str = "_integrated.csv";
const INTEGRATED_MARKER: &str = "_integrated";

#[derive(Debug, Clone, Copy)]
pub struct StandardisationOptions {
    pub unresolved_gene_policy: UnresolvedGenePolicy,
    pub gene_analysis: bool,
    pub variant_analysis: bool,
}

impl Default for StandardisationOptions {
    fn default() -> Self {
        StandardisationOptions {
            unresolved_gene_policy: UnresolvedGenePolicy::default(),
            gene_analysis: true,
            variant_analysis: true,
        }
    }
}

/// Outcome of one post-process batch.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub processed: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, AdapterError)>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.processed.len() + self.failed.len()
    }
}

/// Raw results directory entries named `*_integrated.csv`, searched recursively.
pub fn discover_raw_results(raw_results_dir: &Path) -> Result<Vec<PathBuf>> {
    Ok(all_files(raw_results_dir)?
        .into_iter()
        .filter(|path| {
            path.file_name()
                .is_some_and(|name| name.to_string_lossy().ends_with(RAW_RESULT_SUFFIX))
        })
        .collect())
}

/// Naming reference for the standardised outputs: `sample1_integrated.csv` → `sample1.csv`.
pub fn tool_result_path(raw_result_path: &Path) -> PathBuf {
    let file_name = raw_result_path
        .file_name()
        .map(|name| name.to_string_lossy().replace(INTEGRATED_MARKER, ""))
        .unwrap_or_default();
    raw_result_path.with_file_name(file_name)
}

/// Read → convert → emit for one raw result file.
pub fn standardise_raw_result(
    raw_result_path: &Path,
    output_dir: &Path,
    dictionary: &IdentifierDictionary,
    options: &StandardisationOptions,
) -> Result<()> {
    let raw_result = read_raw_result(raw_result_path)?;
    let converter = ConvertToPhEvalResult::new(raw_result, dictionary, options.unresolved_gene_policy);
    let tool_result_path = tool_result_path(raw_result_path);

    // Both conversions run before anything is written so a failing file leaves no output.
    let pheval_gene_result = if options.gene_analysis {
        Some(converter.extract_gene_requirements()?)
    } else {
        None
    };
    let pheval_variant_result = if options.variant_analysis {
        Some(converter.extract_variant_requirements()?)
    } else {
        None
    };

    if let Some(pheval_gene_result) = pheval_gene_result {
        generate_pheval_result(
            pheval_gene_result,
            SortOrder::Descending,
            output_dir,
            &tool_result_path,
        )?;
    }
    if let Some(pheval_variant_result) = pheval_variant_result {
        generate_pheval_result(
            pheval_variant_result,
            SortOrder::Descending,
            output_dir,
            &tool_result_path,
        )?;
    }
    Ok(())
}

/// Standardises every raw result file. A failing file is logged and
/// recorded; the remaining files still run.
pub fn create_standardised_results(
    raw_results_dir: &Path,
    output_dir: &Path,
    dictionary: &IdentifierDictionary,
    options: &StandardisationOptions,
) -> Result<BatchSummary> {
    let raw_results = discover_raw_results(raw_results_dir)?;
    info!(
        "Post-processing {} raw results from {}",
        raw_results.len(),
        raw_results_dir.display()
    );

    let mut summary = BatchSummary::default();
    for raw_result_path in raw_results {
        info!("Standardising {}", raw_result_path.display());
        match standardise_raw_result(&raw_result_path, output_dir, dictionary, options) {
            Ok(()) => summary.processed.push(raw_result_path),
            Err(e) => {
                error!("Failed to post-process {}: {}", raw_result_path.display(), e);
                summary.failed.push((raw_result_path, e));
            }
        }
    }
    Ok(summary)
}

/// Post-process entry point: builds the identifier dictionary once and
/// fails if any file in the batch failed.
pub fn post_process_results(
    raw_results_dir: &Path,
    output_dir: &Path,
    hgnc_data: &Path,
    gene_identifier: GeneIdentifier,
    options: &StandardisationOptions,
) -> Result<()> {
    let dictionary = IdentifierDictionary::from_hgnc_file(hgnc_data, gene_identifier)?;
    if dictionary.is_empty() {
        warn!("No {:?} identifiers found in {}", dictionary.gene_identifier(), hgnc_data.display());
    }
    let summary = create_standardised_results(raw_results_dir, output_dir, &dictionary, options)?;
    info!(
        "Post-processed {} of {} raw results",
        summary.processed.len(),
        summary.total()
    );
    if summary.failed.is_empty() {
        Ok(())
    } else {
        Err(AdapterError::BatchFailed {
            failed: summary.failed.len(),
            total: summary.total(),
        })
    }
}
