//! PhEval runner plugin for AI-MARRVEL.
//!
//! Prepares HPO inputs from phenopackets, launches AI-MARRVEL through
//! apptainer, docker or nextflow, and converts its `_integrated.csv`
//! output into ranked gene and variant results.

pub mod cli;
pub mod config;
pub mod data_handling;
pub mod error;
pub mod helper_functions;
pub mod models;
pub mod post_process;
pub mod prepare;
pub mod run;
pub mod runner;

pub use error::{AdapterError, Result};
