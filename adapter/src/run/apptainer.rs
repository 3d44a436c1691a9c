use crate::run::{SampleArguments, AIM_IMAGE, DATA_DEPENDENCIES, HPO_TXT, OUTPUT_DIR, VCF_FILE};

/// Cores handed to `proc.sh` inside the apptainer image.
const APPTAINER_THREADS: u32 = 32;

fn bind_mount(source: &std::path::Path, destination: &str) -> String {
    format!("--mount type=bind,source={},destination={}", source.display(), destination)
}

pub fn create_apptainer_command(arguments: &SampleArguments) -> String {
    format!(
        "apptainer run {} {} {} {} docker://{} /run/proc.sh {} {} {}",
        bind_mount(&arguments.vcf_path, VCF_FILE),
        bind_mount(&arguments.hpo_txt_file_path, HPO_TXT),
        bind_mount(&arguments.data_dependencies, DATA_DEPENDENCIES),
        bind_mount(&arguments.output_directory, OUTPUT_DIR),
        AIM_IMAGE,
        arguments.sample_id,
        arguments.genome_assembly,
        APPTAINER_THREADS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run::tests::sample_arguments;

    #[test]
    fn apptainer_command_mounts_inputs() {
        assert_eq!(
            create_apptainer_command(&sample_arguments()),
            "apptainer run \
             --mount type=bind,source=/corpus/vcf/case-1.vcf.gz,destination=/input/vcf.gz \
             --mount type=bind,source=/corpus/hpo_ids/case-1.txt,destination=/input/hpo.txt \
             --mount type=bind,source=/input_dir,destination=/run/data_dependencies \
             --mount type=bind,source=/out/raw_results,destination=/out \
             docker://chaozhongliu/aim-lite /run/proc.sh case-1 hg19 32"
        );
    }
}
