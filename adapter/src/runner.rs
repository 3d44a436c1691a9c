//! Harness lifecycle: prepare inputs, run the tool, post-process its output.

use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::InputDirConfig;
use crate::error::Result;
use crate::post_process::pheval_result::{GENE_RESULTS_DIR, VARIANT_RESULTS_DIR};
use crate::post_process::{post_process_results, StandardisationOptions};
use crate::prepare::prepare_inputs;
use crate::run::run_commands;

pub const TOOL_INPUT_COMMANDS_DIR: &str = "tool_input_commands";
pub const RAW_RESULTS_DIR: &str = "raw_results";

/// The three phases the benchmarking harness drives, and the output layout it expects.
pub trait PhEvalRunner {
    fn output_dir(&self) -> &Path;

    fn prepare(&self) -> Result<()>;
    fn run(&self) -> Result<()>;
    fn post_process(&self) -> Result<()>;

    fn tool_input_commands_dir(&self) -> PathBuf {
        self.output_dir().join(TOOL_INPUT_COMMANDS_DIR)
    }

    fn raw_results_dir(&self) -> PathBuf {
        self.output_dir().join(RAW_RESULTS_DIR)
    }

    fn build_output_directory_structure(&self) -> Result<()> {
        for dir in [
            self.tool_input_commands_dir(),
            self.raw_results_dir(),
            self.output_dir().join(GENE_RESULTS_DIR),
            self.output_dir().join(VARIANT_RESULTS_DIR),
        ] {
            create_dir_all(dir)?;
        }
        Ok(())
    }

    /// All phases in order.
    fn execute(&self) -> Result<()> {
        self.build_output_directory_structure()?;
        self.prepare()?;
        self.run()?;
        self.post_process()
    }
}

#[derive(Debug, Clone)]
pub struct AiMarrvelRunner {
    pub input_dir: PathBuf,
    pub testdata_dir: PathBuf,
    pub tmp_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Tool `config.yaml`; usually `<input_dir>/config.yaml`.
    pub config_file: PathBuf,
    pub version: String,
}

impl AiMarrvelRunner {
    fn tool_config(&self) -> Result<InputDirConfig> {
        InputDirConfig::from_yaml(&self.config_file)
    }
}

impl PhEvalRunner for AiMarrvelRunner {
    fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn prepare(&self) -> Result<()> {
        info!("Creating HPO txt files from phenopackets");
        prepare_inputs(&self.testdata_dir)
    }

    fn run(&self) -> Result<()> {
        let config = self.tool_config()?;
        let environment = config.tool_specific_configuration_options.environment;
        info!(
            "Running AI-MARRVEL {} with {} (scratch: {})",
            self.version,
            environment,
            self.tmp_dir.display()
        );
        run_commands(
            environment,
            &self.tool_input_commands_dir(),
            &self.testdata_dir,
            &self.input_dir,
            &self.raw_results_dir(),
        )
    }

    fn post_process(&self) -> Result<()> {
        info!("Post processing results to PhEval standardised TSV output");
        let config = self.tool_config()?;
        let options = &config.tool_specific_configuration_options;
        post_process_results(
            &self.raw_results_dir(),
            &self.output_dir,
            &config.hgnc_data_path(&self.input_dir),
            options.gene_identifier,
            &StandardisationOptions {
                unresolved_gene_policy: options.unresolved_gene_policy,
                gene_analysis: config.gene_analysis,
                variant_analysis: config.variant_analysis,
            },
        )
    }
}
