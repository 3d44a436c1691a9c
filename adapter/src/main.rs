use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pheval_ai_marrvel::cli::{Args, Commands};
use pheval_ai_marrvel::config::{InputDirConfig, CONFIG_FILE_NAME};
use pheval_ai_marrvel::post_process::{post_process_results, StandardisationOptions};
use pheval_ai_marrvel::prepare::prepare_inputs;
use pheval_ai_marrvel::runner::{AiMarrvelRunner, PhEvalRunner};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let start = std::time::Instant::now();

    match args.command {
        Commands::Prepare { testdata_dir } => {
            prepare_inputs(&testdata_dir)
                .with_context(|| format!("preparing {}", testdata_dir.display()))?;
        }
        Commands::Run {
            input_dir,
            testdata_dir,
            output_dir,
            tool_version,
        } => {
            let runner = AiMarrvelRunner {
                config_file: input_dir.join(CONFIG_FILE_NAME),
                input_dir,
                testdata_dir,
                tmp_dir: std::env::temp_dir(),
                output_dir,
                version: tool_version,
            };
            runner.build_output_directory_structure()?;
            runner.run().context("running AI-MARRVEL")?;
        }
        Commands::PostProcess {
            raw_results_dir,
            output_dir,
            hgnc_data,
            gene_identifier,
            unresolved_gene_policy,
        } => {
            let options = StandardisationOptions {
                unresolved_gene_policy,
                ..StandardisationOptions::default()
            };
            post_process_results(&raw_results_dir, &output_dir, &hgnc_data, gene_identifier, &options)
                .with_context(|| format!("post-processing {}", raw_results_dir.display()))?;
        }
        Commands::Execute {
            input_dir,
            testdata_dir,
            output_dir,
            tmp_dir,
            config_file,
            tool_version,
        } => {
            let config_file = config_file.unwrap_or_else(|| input_dir.join(CONFIG_FILE_NAME));
            let tool_config = InputDirConfig::from_yaml(&config_file)
                .with_context(|| format!("reading tool configuration {}", config_file.display()))?;
            info!("Benchmarking {} {}", tool_config.tool, tool_config.tool_version);
            let runner = AiMarrvelRunner {
                input_dir,
                testdata_dir,
                tmp_dir,
                output_dir,
                config_file,
                version: tool_version,
            };
            runner.execute().context("executing AI-MARRVEL runner")?;
        }
    }

    info!("Elapsed time: {:?}", start.elapsed());
    Ok(())
}
