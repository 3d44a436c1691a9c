use std::path::Path;

use crate::run::{SampleArguments, AIM_IMAGE, DATA_DEPENDENCIES, HPO_TXT, OUTPUT_DIR, VCF_FILE};

/// Memory limit handed to `proc.sh` inside the docker image.
const DOCKER_MEMORY: &str = "30G";

/// `host:container` volume specs for one sample.
#[derive(Debug, Clone, PartialEq)]
pub struct AiMarrvelVolumes {
    pub vcf_path: String,
    pub hpo_txt: String,
    pub data_dependencies: String,
    pub output_dir: String,
}

fn volume(host: &Path, container: &str) -> String {
    format!("{}:{}", host.display(), container)
}

pub fn create_volumes(arguments: &SampleArguments) -> AiMarrvelVolumes {
    AiMarrvelVolumes {
        vcf_path: volume(&arguments.vcf_path, VCF_FILE),
        hpo_txt: volume(&arguments.hpo_txt_file_path, HPO_TXT),
        data_dependencies: volume(&arguments.data_dependencies, DATA_DEPENDENCIES),
        output_dir: volume(&arguments.output_directory, OUTPUT_DIR),
    }
}

pub fn create_docker_command(arguments: &SampleArguments) -> String {
    let volumes = create_volumes(arguments);
    format!(
        "docker run --rm -v {} -v {} -v {} -v {} {} /run/proc.sh {} {} {}",
        volumes.vcf_path,
        volumes.hpo_txt,
        volumes.data_dependencies,
        volumes.output_dir,
        AIM_IMAGE,
        arguments.sample_id,
        arguments.genome_assembly,
        DOCKER_MEMORY,
    )
}
