use std::path::PathBuf;

use crate::run::SampleArguments;

/// Parameters of one `nextflow run` invocation of the AI-MARRVEL workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct NextFlowParameters {
    pub executable: PathBuf,
    pub ref_dir: PathBuf,
    pub input_vcf: PathBuf,
    pub input_hpo: PathBuf,
    pub output_dir: PathBuf,
    pub sample_id: String,
    pub reference_version: String,
}

impl From<&SampleArguments> for NextFlowParameters {
    fn from(arguments: &SampleArguments) -> Self {
        NextFlowParameters {
            executable: arguments.data_dependencies.join("AI_MARRVEL/main.nf"),
            ref_dir: arguments.data_dependencies.clone(),
            input_vcf: arguments.vcf_path.clone(),
            input_hpo: arguments.hpo_txt_file_path.clone(),
            output_dir: arguments.output_directory.clone(),
            sample_id: arguments.subject_id.clone(),
            reference_version: arguments.genome_assembly.clone(),
        }
    }
}

pub fn create_next_flow_command(arguments: &SampleArguments) -> String {
    let parameters = NextFlowParameters::from(arguments);
    format!(
        "nextflow run {} --ref_dir {} --input_vcf {} --input_hpo {} --outdir {} --run_id {} --ref_ver {}",
        parameters.executable.display(),
        parameters.ref_dir.display(),
        parameters.input_vcf.display(),
        parameters.input_hpo.display(),
        parameters.output_dir.display(),
        parameters.sample_id,
        parameters.reference_version,
    )
}
