use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::models::{GeneIdentifier, UnresolvedGenePolicy};

#[derive(Debug, Parser)]
#[command(name = "pheval-ai-marrvel", version, about = "AI-MARRVEL runner.")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write observed HPO ids for every phenopacket in a corpus.
    Prepare {
        #[arg(long = "testdata-dir", value_name = "PATH", help = "Corpus directory")]
        testdata_dir: PathBuf,
    },

    /// Build and execute the AI-MARRVEL commands for a corpus.
    Run {
        #[arg(long = "input-dir", value_name = "PATH", help = "Tool input directory (config.yaml, data dependencies)")]
        input_dir: PathBuf,

        #[arg(long = "testdata-dir", value_name = "PATH", help = "Corpus directory")]
        testdata_dir: PathBuf,

        #[arg(long = "output-dir", value_name = "PATH", help = "Run output directory")]
        output_dir: PathBuf,

        #[arg(long = "tool-version", value_name = "VERSION", default_value = "latest")]
        tool_version: String,
    },

    /// Convert raw AI-MARRVEL results into PhEval standardised TSV output.
    PostProcess {
        #[arg(long = "raw-results-dir", value_name = "PATH", help = "Directory of *_integrated.csv files")]
        raw_results_dir: PathBuf,

        #[arg(long = "output-dir", value_name = "PATH", help = "Directory for standardised results")]
        output_dir: PathBuf,

        #[arg(
            long = "hgnc-data",
            value_name = "PATH",
            env = "HGNC_COMPLETE_SET",
            help = "HGNC complete set (hgnc_complete_set.txt)"
        )]
        hgnc_data: PathBuf,

        #[arg(long = "gene-identifier", value_enum, default_value_t = GeneIdentifier::EnsemblId)]
        gene_identifier: GeneIdentifier,

        #[arg(long = "unresolved-gene-policy", value_enum, default_value_t = UnresolvedGenePolicy::Lenient)]
        unresolved_gene_policy: UnresolvedGenePolicy,
    },

    /// Prepare, run and post-process in one go.
    Execute {
        #[arg(long = "input-dir", value_name = "PATH")]
        input_dir: PathBuf,

        #[arg(long = "testdata-dir", value_name = "PATH")]
        testdata_dir: PathBuf,

        #[arg(long = "output-dir", value_name = "PATH")]
        output_dir: PathBuf,

        #[arg(long = "tmp-dir", value_name = "PATH", default_value = "/tmp")]
        tmp_dir: PathBuf,

        #[arg(long = "config-file", value_name = "PATH", help = "Tool config.yaml (defaults to <input-dir>/config.yaml)")]
        config_file: Option<PathBuf>,

        #[arg(long = "tool-version", value_name = "VERSION", default_value = "latest")]
        tool_version: String,
    },
}
