pub mod apptainer;
pub mod docker;
pub mod nextflow;

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, error, info};

use crate::config::Environment;
use crate::data_handling::phenopacket::{phenopacket_reader, tool_genome_assembly};
use crate::error::{AdapterError, Result};
use crate::helper_functions::{all_files, write_commands};
use crate::prepare::{hpo_txt_path, PHENOPACKETS_DIR};

pub const AIM_IMAGE: &str = "chaozhongliu/aim-lite";
pub const VCF_FILE: &str = "/input/vcf.gz";
pub const HPO_TXT: &str = "/input/hpo.txt";
pub const DATA_DEPENDENCIES: &str = "/run/data_dependencies";
pub const OUTPUT_DIR: &str = "/out";

const VCF_DIR: &str = "vcf";

/// Everything a backend needs to launch AI-MARRVEL on one sample.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleArguments {
    /// Phenopacket file stem; names the tool's output files.
    pub sample_id: String,
    pub subject_id: String,
    pub vcf_path: PathBuf,
    pub genome_assembly: String,
    pub hpo_txt_file_path: PathBuf,
    pub data_dependencies: PathBuf,
    pub output_directory: PathBuf,
}

pub fn get_sample_arguments(
    phenopacket_path: &Path,
    testdata_dir: &Path,
    input_dir: &Path,
    output_dir: &Path,
) -> Result<SampleArguments> {
    let phenopacket = phenopacket_reader(phenopacket_path)?;
    let vcf_file_data = phenopacket.vcf_file_data(phenopacket_path, &testdata_dir.join(VCF_DIR))?;
    let genome_assembly = tool_genome_assembly(&vcf_file_data.genome_assembly, phenopacket_path)?;
    let sample_id = phenopacket_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(SampleArguments {
        sample_id,
        subject_id: phenopacket.subject_id().to_string(),
        vcf_path: vcf_file_data.uri,
        genome_assembly,
        hpo_txt_file_path: hpo_txt_path(testdata_dir, phenopacket_path),
        data_dependencies: input_dir.to_path_buf(),
        output_directory: output_dir.to_path_buf(),
    })
}

pub fn create_command(environment: Environment, arguments: &SampleArguments) -> String {
    match environment {
        Environment::Apptainer => apptainer::create_apptainer_command(arguments),
        Environment::Docker => docker::create_docker_command(arguments),
        Environment::Nextflow => nextflow::create_next_flow_command(arguments),
    }
}

/// Builds one command per phenopacket and writes them to the corpus batch file.
pub fn create_commands(
    environment: Environment,
    tool_input_commands_dir: &Path,
    testdata_dir: &Path,
    input_dir: &Path,
    output_dir: &Path,
) -> Result<PathBuf> {
    let mut all_commands = Vec::new();
    for phenopacket_path in all_files(&testdata_dir.join(PHENOPACKETS_DIR))? {
        let arguments = get_sample_arguments(&phenopacket_path, testdata_dir, input_dir, output_dir)?;
        debug!("{} arguments for {}: {:?}", environment, phenopacket_path.display(), arguments);
        all_commands.push(create_command(environment, &arguments));
    }
    info!("Created {} {} commands", all_commands.len(), environment);
    write_commands(&all_commands, tool_input_commands_dir, testdata_dir)
}

fn locate(executable: &str) -> Result<PathBuf> {
    which::which(executable).map_err(|source| AdapterError::ExecutableNotFound {
        name: executable.to_string(),
        source,
    })
}

/// Runs a batch file with `bash` after checking the backend is installed.
pub fn execute_batch_file(batch_file: &Path, environment: Environment) -> Result<()> {
    let bash = locate("bash")?;
    let backend = locate(environment.executable())?;
    debug!("Using {} at {}", environment, backend.display());

    info!("Executing {}", batch_file.display());
    let status = Command::new(&bash).arg(batch_file).status()?;
    if !status.success() {
        error!("AI-MARRVEL batch {} failed with {}", batch_file.display(), status);
        return Err(AdapterError::CommandFailed {
            command: format!("{} {}", bash.display(), batch_file.display()),
            status,
        });
    }
    info!("AI-MARRVEL batch completed: output at {}", batch_file.display());
    Ok(())
}

pub fn run_commands(
    environment: Environment,
    tool_input_commands_dir: &Path,
    testdata_dir: &Path,
    input_dir: &Path,
    output_dir: &Path,
) -> Result<()> {
    let batch_file = create_commands(
        environment,
        tool_input_commands_dir,
        testdata_dir,
        input_dir,
        output_dir,
    )?;
    execute_batch_file(&batch_file, environment)
}
