//! Model of the `config.yaml` the harness places in the tool input directory.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AdapterError, Result};
use crate::models::{GeneIdentifier, UnresolvedGenePolicy};

pub const CONFIG_FILE_NAME: &str = "config.yaml";
pub const DEFAULT_HGNC_FILE_NAME: &str = "hgnc_complete_set.txt";

/// Execution backend used to launch AI-MARRVEL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Apptainer,
    Docker,
    Nextflow,
}

impl Environment {
    pub fn executable(&self) -> &'static str {
        match self {
            Environment::Apptainer => "apptainer",
            Environment::Docker => "docker",
            Environment::Nextflow => "nextflow",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.executable())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiMarrvelConfigurations {
    pub environment: Environment,
    #[serde(default)]
    pub gene_identifier: GeneIdentifier,
    #[serde(default)]
    pub unresolved_gene_policy: UnresolvedGenePolicy,
    #[serde(default)]
    pub hgnc_data: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputDirConfig {
    pub tool: String,
    pub tool_version: String,
    #[serde(default = "default_true")]
    pub variant_analysis: bool,
    #[serde(default = "default_true")]
    pub gene_analysis: bool,
    #[serde(default)]
    pub disease_analysis: bool,
    pub tool_specific_configuration_options: AiMarrvelConfigurations,
}

fn default_true() -> bool {
    true
}

impl InputDirConfig {
    pub fn from_yaml(path: &Path) -> Result<Self> {
        info!("Reading tool configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AdapterError::Config(format!("{}: {e}", path.display())))
    }

    pub fn hgnc_data_path(&self, input_dir: &Path) -> PathBuf {
        self.tool_specific_configuration_options
            .hgnc_data
            .clone()
            .unwrap_or_else(|| input_dir.join(DEFAULT_HGNC_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = "\
tool: AI-MARRVEL
tool_version: 1.0.0
tool_specific_configuration_options:
  environment: docker
";

    #[test]
    fn minimal_config_takes_defaults() {
        let config: InputDirConfig = serde_yaml::from_str(MINIMAL).unwrap();
        let options = &config.tool_specific_configuration_options;
        assert_eq!(options.environment, Environment::Docker);
        assert_eq!(options.gene_identifier, GeneIdentifier::EnsemblId);
        assert_eq!(options.unresolved_gene_policy, UnresolvedGenePolicy::Lenient);
        assert!(config.gene_analysis && config.variant_analysis);
        assert!(!config.disease_analysis);
        assert_eq!(
            config.hgnc_data_path(Path::new("/in")),
            PathBuf::from("/in/hgnc_complete_set.txt")
        );
    }

    #[test]
    fn full_config_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "\
tool: AI-MARRVEL
tool_version: 1.0.0
variant_analysis: false
gene_analysis: true
disease_analysis: false
tool_specific_configuration_options:
  environment: nextflow
  gene_identifier: hgnc_id
  unresolved_gene_policy: strict
  hgnc_data: /data/hgnc.txt
",
        )
        .unwrap();

        let config = InputDirConfig::from_yaml(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        let options = &config.tool_specific_configuration_options;
        assert_eq!(options.environment, Environment::Nextflow);
        assert_eq!(options.gene_identifier, GeneIdentifier::HgncId);
        assert_eq!(options.unresolved_gene_policy, UnresolvedGenePolicy::Strict);
        assert!(!config.variant_analysis);
        assert_eq!(config.hgnc_data_path(dir.path()), PathBuf::from("/data/hgnc.txt"));
    }

    #[test]
    fn unknown_environment_is_rejected() {
        let yaml = MINIMAL.replace("docker", "podman");
        assert!(serde_yaml::from_str::<InputDirConfig>(&yaml).is_err());
    }

    #[test]
    fn unknown_environment_in_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, MINIMAL.replace("docker", "podman")).unwrap();
        let err = InputDirConfig::from_yaml(&path).unwrap_err();
        assert!(matches!(err, AdapterError::Config(_)));
    }

    #[test]
    fn environment_is_required() {
        let yaml = "tool: AI-MARRVEL\ntool_version: 1.0.0\ntool_specific_configuration_options: {}\n";
        assert!(serde_yaml::from_str::<InputDirConfig>(yaml).is_err());
    }
}
