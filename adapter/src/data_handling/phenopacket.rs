use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{AdapterError, Result};

const COMPATIBLE_GENOME_ASSEMBLIES: [&str; 4] = ["GRCh37", "hg19", "GRCh38", "hg38"];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OntologyClass {
    pub id: String,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhenotypicFeature {
    #[serde(rename = "type")]
    pub term: OntologyClass,
    #[serde(default)]
    pub excluded: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Subject {
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhenopacketFile {
    pub uri: String,
    #[serde(default)]
    pub file_attributes: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phenopacket {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub subject: Subject,
    #[serde(default)]
    pub phenotypic_features: Vec<PhenotypicFeature>,
    #[serde(default)]
    pub files: Vec<PhenopacketFile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Family {
    #[serde(default)]
    pub id: String,
    pub proband: Phenopacket,
    #[serde(default)]
    pub files: Vec<PhenopacketFile>,
}

/// Either a single-sample phenopacket or a family with a proband.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PhenopacketRecord {
    Family(Family),
    Phenopacket(Phenopacket),
}

pub fn phenopacket_reader(path: &Path) -> Result<PhenopacketRecord> {
    debug!("Reading phenopacket {}", path.display());
    let reader = BufReader::new(File::open(path)?);
    serde_json::from_reader(reader)
        .map_err(|e| AdapterError::phenopacket(path, format!("cannot parse JSON: {e}")))
}

/// VCF referenced by a phenopacket, re-rooted into the corpus VCF directory.
#[derive(Debug, Clone, PartialEq)]
pub struct VcfFileData {
    pub uri: PathBuf,
    pub genome_assembly: String,
}

impl PhenopacketRecord {
    fn subject_phenopacket(&self) -> &Phenopacket {
        match self {
            PhenopacketRecord::Family(family) => &family.proband,
            PhenopacketRecord::Phenopacket(phenopacket) => phenopacket,
        }
    }

    pub fn subject_id(&self) -> &str {
        &self.subject_phenopacket().subject.id
    }

    pub fn files(&self) -> &[PhenopacketFile] {
        match self {
            PhenopacketRecord::Family(family) => &family.files,
            PhenopacketRecord::Phenopacket(phenopacket) => &phenopacket.files,
        }
    }

    /// HPO ids of all phenotypic features that are not marked excluded.
    pub fn observed_phenotypic_features(&self) -> Vec<String> {
        self.subject_phenopacket()
            .phenotypic_features
            .iter()
            .filter(|feature| !feature.excluded)
            .map(|feature| feature.term.id.clone())
            .collect()
    }

    pub fn vcf_file_data(&self, phenopacket_path: &Path, vcf_dir: &Path) -> Result<VcfFileData> {
        let vcf = self
            .files()
            .iter()
            .find(|file| {
                file.file_attributes
                    .get("fileFormat")
                    .is_some_and(|format| format.eq_ignore_ascii_case("vcf"))
            })
            .ok_or_else(|| AdapterError::phenopacket(phenopacket_path, "no VCF file listed"))?;

        let file_name = Path::new(&vcf.uri)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !file_name.ends_with(".vcf") && !file_name.ends_with(".vcf.gz") {
            return Err(AdapterError::IncorrectFileFormat {
                path: PathBuf::from(&vcf.uri),
            });
        }

        let genome_assembly = vcf
            .file_attributes
            .get("genomeAssembly")
            .cloned()
            .unwrap_or_default();
        if !COMPATIBLE_GENOME_ASSEMBLIES.contains(&genome_assembly.as_str()) {
            return Err(AdapterError::IncompatibleGenomeAssembly {
                assembly: genome_assembly,
                path: phenopacket_path.to_path_buf(),
            });
        }

        Ok(VcfFileData {
            uri: vcf_dir.join(file_name),
            genome_assembly,
        })
    }
}

/// Maps a phenopacket genome assembly onto the UCSC name AI-MARRVEL expects.
pub fn tool_genome_assembly(genome_assembly: &str, phenopacket_path: &Path) -> Result<String> {
    match genome_assembly.to_lowercase().as_str() {
        "grch37" | "hg19" => Ok("hg19".to_string()),
        "grch38" | "hg38" => Ok("hg38".to_string()),
        _ => Err(AdapterError::IncompatibleGenomeAssembly {
            assembly: genome_assembly.to_string(),
            path: phenopacket_path.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHENOPACKET: &str = r#"{
        "id": "case-1",
        "subject": {"id": "patient-1"},
        "phenotypicFeatures": [
            {"type": {"id": "HP:0001250", "label": "Seizure"}},
            {"type": {"id": "HP:0001263", "label": "Global developmental delay"}, "excluded": true},
            {"type": {"id": "HP:0000252", "label": "Microcephaly"}, "excluded": false}
        ],
        "files": [
            {"uri": "/original/location/case-1.vcf.gz",
             "fileAttributes": {"fileFormat": "vcf", "genomeAssembly": "GRCh37"}}
        ]
    }"#;

    fn parse(json: &str) -> PhenopacketRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn observed_features_skip_excluded() {
        let record = parse(PHENOPACKET);
        assert_eq!(
            record.observed_phenotypic_features(),
            vec!["HP:0001250".to_string(), "HP:0000252".to_string()]
        );
        assert_eq!(record.subject_id(), "patient-1");
    }

    #[test]
    fn vcf_is_rerooted_into_corpus_vcf_dir() {
        let record = parse(PHENOPACKET);
        let vcf = record
            .vcf_file_data(Path::new("case-1.json"), Path::new("/corpus/vcf"))
            .unwrap();
        assert_eq!(vcf.uri, PathBuf::from("/corpus/vcf/case-1.vcf.gz"));
        assert_eq!(vcf.genome_assembly, "GRCh37");
    }

    #[test]
    fn family_uses_proband_and_family_files() {
        let json = r#"{
            "id": "family-1",
            "proband": {
                "subject": {"id": "proband-1"},
                "phenotypicFeatures": [{"type": {"id": "HP:0004322"}}]
            },
            "files": [{"uri": "fam.vcf", "fileAttributes": {"fileFormat": "VCF", "genomeAssembly": "GRCh38"}}]
        }"#;
        let record = parse(json);
        assert!(matches!(record, PhenopacketRecord::Family(_)));
        assert_eq!(record.subject_id(), "proband-1");
        assert_eq!(record.observed_phenotypic_features(), vec!["HP:0004322".to_string()]);
        let vcf = record.vcf_file_data(Path::new("f.json"), Path::new("vcf")).unwrap();
        assert_eq!(vcf.uri, PathBuf::from("vcf/fam.vcf"));
    }

    #[test]
    fn unsupported_assembly_and_format_are_rejected() {
        let bad_assembly = PHENOPACKET.replace("GRCh37", "T2T-CHM13");
        let err = parse(&bad_assembly)
            .vcf_file_data(Path::new("p.json"), Path::new("vcf"))
            .unwrap_err();
        assert!(matches!(err, AdapterError::IncompatibleGenomeAssembly { .. }));

        let bad_format = PHENOPACKET.replace("case-1.vcf.gz", "case-1.bam");
        let err = parse(&bad_format)
            .vcf_file_data(Path::new("p.json"), Path::new("vcf"))
            .unwrap_err();
        assert!(matches!(err, AdapterError::IncorrectFileFormat { .. }));
    }

    #[test]
    fn assemblies_map_to_ucsc_names() {
        let path = Path::new("p.json");
        assert_eq!(tool_genome_assembly("GRCh37", path).unwrap(), "hg19");
        assert_eq!(tool_genome_assembly("GRCh38", path).unwrap(), "hg38");
        assert_eq!(tool_genome_assembly("hg19", path).unwrap(), "hg19");
        assert!(tool_genome_assembly("GRCm39", path).is_err());
    }
}
