use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::GeneIdentifier;

/// The HGNC complete set (`hgnc_complete_set.txt`).
pub struct HgncDataset {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct HgncRow {
    symbol: String,
    #[serde(default)]
    hgnc_id: String,
    #[serde(default)]
    entrez_id: String,
    #[serde(default)]
    ensembl_gene_id: String,
    #[serde(default)]
    prev_symbol: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HgncRecord {
    pub symbol: String,
    pub ensembl_id: String,
    pub hgnc_id: String,
    pub entrez_id: String,
    pub previous_symbols: Vec<String>,
}

impl HgncRecord {
    pub fn identifier(&self, gene_identifier: GeneIdentifier) -> &str {
        match gene_identifier {
            GeneIdentifier::EnsemblId => &self.ensembl_id,
            GeneIdentifier::HgncId => &self.hgnc_id,
            GeneIdentifier::EntrezId => &self.entrez_id,
        }
    }
}

impl From<HgncRow> for HgncRecord {
    fn from(row: HgncRow) -> Self {
        let previous_symbols = row
            .prev_symbol
            .split('|')
            .map(|symbol| symbol.trim().trim_matches('"').to_string())
            .filter(|symbol| !symbol.is_empty())
            .collect();
        HgncRecord {
            symbol: row.symbol,
            ensembl_id: row.ensembl_gene_id,
            hgnc_id: row.hgnc_id,
            entrez_id: row.entrez_id,
            previous_symbols,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HgncData {
    pub records: Vec<HgncRecord>,
}

impl HgncDataset {
    pub fn load(&self) -> Result<HgncData> {
        info!("Reading HGNC data from {}", self.path.display());
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .from_path(&self.path)?;

        let mut records = Vec::new();
        for row in reader.deserialize::<HgncRow>() {
            records.push(HgncRecord::from(row?));
        }
        debug!("Loaded {} HGNC records", records.len());
        Ok(HgncData { records })
    }
}

impl HgncData {
    /// Builds the symbol → identifier lookup for one namespace.
    ///
    /// Current symbols always win over previous symbols; among previous
    /// symbols the first record listing it wins. Records without an
    /// identifier in the namespace are skipped.
    pub fn identifier_dictionary(&self, gene_identifier: GeneIdentifier) -> IdentifierDictionary {
        let mut entries: HashMap<String, String> = HashMap::new();
        for record in &self.records {
            let identifier = record.identifier(gene_identifier);
            if !identifier.is_empty() {
                entries.insert(record.symbol.clone(), identifier.to_string());
            }
        }
        for record in &self.records {
            let identifier = record.identifier(gene_identifier);
            if identifier.is_empty() {
                continue;
            }
            for previous in &record.previous_symbols {
                entries
                    .entry(previous.clone())
                    .or_insert_with(|| identifier.to_string());
            }
        }
        info!(
            "Built {:?} dictionary with {} symbols",
            gene_identifier,
            entries.len()
        );
        IdentifierDictionary {
            gene_identifier,
            entries,
        }
    }
}

/// Read-only, case-sensitive gene symbol → identifier mapping shared by a whole batch.
#[derive(Debug, Clone, Default)]
pub struct IdentifierDictionary {
    gene_identifier: GeneIdentifier,
    entries: HashMap<String, String>,
}

impl IdentifierDictionary {
    pub fn from_hgnc_file(path: &Path, gene_identifier: GeneIdentifier) -> Result<Self> {
        let hgnc = HgncDataset {
            path: path.to_path_buf(),
        }
        .load()?;
        Ok(hgnc.identifier_dictionary(gene_identifier))
    }

    pub fn get(&self, gene_symbol: &str) -> Option<&str> {
        self.entries.get(gene_symbol).map(String::as_str)
    }

    pub fn gene_identifier(&self) -> GeneIdentifier {
        self.gene_identifier
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, S)> for IdentifierDictionary {
    fn from_iter<I: IntoIterator<Item = (S, S)>>(iter: I) -> Self {
        IdentifierDictionary {
            gene_identifier: GeneIdentifier::default(),
            entries: iter
                .into_iter()
                .map(|(symbol, identifier)| (symbol.into(), identifier.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HGNC: &str = "hgnc_id\tsymbol\tname\tentrez_id\tensembl_gene_id\trefseq_accession\tprev_symbol\n\
HGNC:1100\tBRCA1\tBRCA1 DNA repair associated\t672\tENSG00000012048\tNM_007294\tRNF53\n\
HGNC:5\tA1BG\talpha-1-B glycoprotein\t1\tENSG00000121410\tNM_130786\t\n\
HGNC:11998\tTP53\ttumor protein p53\t7157\tENSG00000141510\tNM_000546\t\"P53|LFS1\"\n\
HGNC:99999\tNOENS\tno ensembl mapping\t999\t\t\tOLDNAME\n\
HGNC:24086\tA1CF\tAPOBEC1 complementation factor\t29974\tENSG00000148584\tNM_014576\tA1BG\n";

    fn load_fixture() -> HgncData {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hgnc_complete_set.txt");
        std::fs::write(&path, HGNC).unwrap();
        HgncDataset { path }.load().unwrap()
    }

    #[test]
    fn loads_records_and_previous_symbols() {
        let hgnc = load_fixture();
        assert_eq!(hgnc.records.len(), 5);
        let tp53 = hgnc.records.iter().find(|r| r.symbol == "TP53").unwrap();
        assert_eq!(tp53.previous_symbols, vec!["P53".to_string(), "LFS1".to_string()]);
        let a1bg = hgnc.records.iter().find(|r| r.symbol == "A1BG").unwrap();
        assert!(a1bg.previous_symbols.is_empty());
    }

    #[test]
    fn dictionary_resolves_current_and_previous_symbols() {
        let dictionary = load_fixture().identifier_dictionary(GeneIdentifier::EnsemblId);
        assert_eq!(dictionary.get("BRCA1"), Some("ENSG00000012048"));
        assert_eq!(dictionary.get("RNF53"), Some("ENSG00000012048"));
        assert_eq!(dictionary.get("P53"), Some("ENSG00000141510"));
        assert_eq!(dictionary.get("brca1"), None);
    }

    #[test]
    fn current_symbol_beats_previous_symbol() {
        let dictionary = load_fixture().identifier_dictionary(GeneIdentifier::EnsemblId);
        assert_eq!(dictionary.get("A1BG"), Some("ENSG00000121410"));
    }

    #[test]
    fn empty_identifiers_are_skipped() {
        let hgnc = load_fixture();
        let ensembl = hgnc.identifier_dictionary(GeneIdentifier::EnsemblId);
        assert_eq!(ensembl.get("NOENS"), None);
        assert_eq!(ensembl.get("OLDNAME"), None);

        let entrez = hgnc.identifier_dictionary(GeneIdentifier::EntrezId);
        assert_eq!(entrez.get("NOENS"), Some("999"));
        assert_eq!(entrez.gene_identifier(), GeneIdentifier::EntrezId);
    }

    #[test]
    fn hgnc_namespace() {
        let dictionary = load_fixture().identifier_dictionary(GeneIdentifier::HgncId);
        assert_eq!(dictionary.get("TP53"), Some("HGNC:11998"));
    }
}
