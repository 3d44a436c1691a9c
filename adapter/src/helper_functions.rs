use std::fs;
use std::path::{Path, PathBuf};

use polars::error::PolarsResult;
use polars::frame::DataFrame;
use polars::prelude::{CsvReadOptions, SerReader};
use tracing::debug;

use crate::error::Result;

pub fn read_csv(file_path: &Path) -> PolarsResult<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(PathBuf::from(file_path)))?
        .finish()
}

/// Recursively lists every regular file below `directory`, sorted by path.
pub fn all_files(directory: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![directory.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else {
                files.push(path);
            }
        }
    }
    files.sort();
    debug!("Found {} files under {}", files.len(), directory.display());
    Ok(files)
}

/// Writes newline-joined commands to `<commands_dir>/<testdata_dir name>_commands.txt`.
pub fn write_commands(
    commands: &[String],
    tool_input_commands_dir: &Path,
    testdata_dir: &Path,
) -> Result<PathBuf> {
    let corpus_name = testdata_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "corpus".to_string());
    fs::create_dir_all(tool_input_commands_dir)?;
    let batch_file = tool_input_commands_dir.join(format!("{corpus_name}_commands.txt"));
    fs::write(&batch_file, commands.join("\n"))?;
    debug!("Wrote {} commands to {}", commands.len(), batch_file.display());
    Ok(batch_file)
}
