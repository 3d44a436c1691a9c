use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::data_handling::phenopacket::phenopacket_reader;
use crate::error::Result;
use crate::helper_functions::all_files;

pub const HPO_IDS_DIR: &str = "hpo_ids";
pub const PHENOPACKETS_DIR: &str = "phenopackets";

/// Location of the HPO id list AI-MARRVEL reads for one phenopacket.
pub fn hpo_txt_path(testdata_dir: &Path, phenopacket_path: &Path) -> PathBuf {
    let stem = phenopacket_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    testdata_dir.join(HPO_IDS_DIR).join(format!("{stem}.txt"))
}

pub fn write_observed_hpo_ids(phenopacket_path: &Path, testdata_dir: &Path) -> Result<PathBuf> {
    let phenopacket = phenopacket_reader(phenopacket_path)?;
    let observed_hpo_ids = phenopacket.observed_phenotypic_features();
    let output_path = hpo_txt_path(testdata_dir, phenopacket_path);
    fs::write(&output_path, observed_hpo_ids.join("\n"))?;
    debug!(
        "Wrote {} observed HPO ids to {}",
        observed_hpo_ids.len(),
        output_path.display()
    );
    Ok(output_path)
}

/// Writes `hpo_ids/<stem>.txt` for every phenopacket in the corpus.
pub fn prepare_inputs(testdata_dir: &Path) -> Result<()> {
    fs::create_dir_all(testdata_dir.join(HPO_IDS_DIR))?;
    let phenopackets = all_files(&testdata_dir.join(PHENOPACKETS_DIR))?;
    info!("Creating HPO txt files for {} phenopackets", phenopackets.len());
    for phenopacket_path in &phenopackets {
        write_observed_hpo_ids(phenopacket_path, testdata_dir)?;
    }
    Ok(())
}
