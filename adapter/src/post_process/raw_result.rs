use std::path::Path;

use polars::prelude::*;
use tracing::{debug, error};

use crate::error::{AdapterError, Result};
use crate::helper_functions::read_csv;
use crate::models::RawResultRow;

/// Header pandas gives the unnamed index column when AI-MARRVEL writes its table.
const INDEX_COLUMN: &str = "Unnamed: 0";
const VARIANT_COLUMN: &str = "variant";
const PREDICT_COLUMN: &str = "predict";
const GENE_SYMBOL_COLUMN: &str = "geneSymbol";

/// Renames the index column to `variant`. An empty first header is accepted as the index.
fn rename_columns(mut df: DataFrame, path: &Path) -> Result<DataFrame> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let index_column = if names.iter().any(|name| name == INDEX_COLUMN) {
        Some(INDEX_COLUMN)
    } else if names.first().is_some_and(|first| first.is_empty()) {
        Some("")
    } else {
        None
    };

    if let Some(index_column) = index_column {
        df.rename(index_column, PlSmallStr::from(VARIANT_COLUMN))
            .map_err(|e| AdapterError::malformed(path, format!("cannot rename index column: {e}")))?;
    } else if !names.iter().any(|name| name == VARIANT_COLUMN) {
        return Err(AdapterError::malformed(
            path,
            format!("missing index column '{INDEX_COLUMN}'"),
        ));
    }
    Ok(df)
}

fn project(df: &DataFrame, path: &Path) -> Result<DataFrame> {
    for required in [VARIANT_COLUMN, PREDICT_COLUMN, GENE_SYMBOL_COLUMN] {
        if !df.get_column_names().iter().any(|name| name.as_str() == required) {
            return Err(AdapterError::malformed(
                path,
                format!("missing required column '{required}'"),
            ));
        }
    }
    Ok(df.select([VARIANT_COLUMN, PREDICT_COLUMN, GENE_SYMBOL_COLUMN])?)
}

fn rows_from_frame(df: &DataFrame, path: &Path) -> Result<Vec<RawResultRow>> {
    let variant = df.column(VARIANT_COLUMN)?.cast(&DataType::String)?;
    let predict = df.column(PREDICT_COLUMN)?.cast(&DataType::Float64)?;
    let gene_symbol = df.column(GENE_SYMBOL_COLUMN)?.cast(&DataType::String)?;

    let variants = variant.as_materialized_series().str()?;
    let scores = predict.as_materialized_series().f64()?;
    let symbols = gene_symbol.as_materialized_series().str()?;

    let mut rows = Vec::with_capacity(df.height());
    for (i, ((variant, predict), gene_symbol)) in variants
        .into_iter()
        .zip(scores.into_iter())
        .zip(symbols.into_iter())
        .enumerate()
    {
        let (variant, predict, gene_symbol) = match (variant, predict, gene_symbol) {
            (Some(v), Some(p), Some(g)) if !v.trim().is_empty() && !g.trim().is_empty() => {
                (v, p, g)
            }
            other => {
                return Err(AdapterError::malformed(
                    path,
                    format!("row {i} has an empty or non-numeric field: {other:?}"),
                ));
            }
        };
        rows.push(RawResultRow {
            variant: variant.to_string(),
            predict,
            gene_symbol: gene_symbol.to_string(),
        });
    }
    Ok(rows)
}

/// Loads an AI-MARRVEL `_integrated.csv` table and projects it to
/// `{variant, predict, geneSymbol}`.
pub fn read_raw_result(raw_result_path: &Path) -> Result<Vec<RawResultRow>> {
    let df = read_csv(raw_result_path).map_err(|e| {
        error!("Failed to read raw result {}: {}", raw_result_path.display(), e);
        AdapterError::malformed(raw_result_path, format!("not a delimited table: {e}"))
    })?;
    debug!("Loaded {} rows from {}", df.height(), raw_result_path.display());

    let df = rename_columns(df, raw_result_path)?;
    let df = project(&df, raw_result_path)?;
    rows_from_frame(&df, raw_result_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_table(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample1_integrated.csv");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn reads_and_projects_required_columns() {
        let (_dir, path) = write_table(
            "Unnamed: 0,predict,geneSymbol,confidence\n1-100-A-T,0.9,BRCA1,high\n",
        );
        let rows = read_raw_result(&path).unwrap();
        assert_eq!(
            rows,
            vec![RawResultRow {
                variant: "1-100-A-T".to_string(),
                predict: 0.9,
                gene_symbol: "BRCA1".to_string(),
            }]
        );
    }

    #[test]
    fn preserves_row_order() {
        let (_dir, path) = write_table(
            "Unnamed: 0,geneSymbol,predict\n\
             7-140453136-A-T,BRAF,0.2\n\
             17-7577121-G-A,TP53,0.8\n\
             X-100-C-G,DMD,1\n",
        );
        let rows = read_raw_result(&path).unwrap();
        let symbols: Vec<&str> = rows.iter().map(|r| r.gene_symbol.as_str()).collect();
        assert_eq!(symbols, vec!["BRAF", "TP53", "DMD"]);
        assert_eq!(rows[2].predict, 1.0);
    }

    #[test]
    fn missing_index_column_is_malformed() {
        let (_dir, path) = write_table("id,predict,geneSymbol\n1-100-A-T,0.9,BRCA1\n");
        let err = read_raw_result(&path).unwrap_err();
        assert!(matches!(err, AdapterError::MalformedInput { .. }));
    }

    #[test]
    fn missing_predict_column_is_malformed() {
        let (_dir, path) = write_table("Unnamed: 0,score,geneSymbol\n1-100-A-T,0.9,BRCA1\n");
        let err = read_raw_result(&path).unwrap_err();
        assert!(matches!(err, AdapterError::MalformedInput { .. }));
    }

    #[test]
    fn rename_accepts_existing_variant_column() {
        let df = polars::df![
            "variant" => &["1-100-A-T"],
            "predict" => &[0.5],
            "geneSymbol" => &["BRCA1"]
        ]
        .unwrap();
        let df = rename_columns(df, Path::new("in.csv")).unwrap();
        let projected = project(&df, Path::new("in.csv")).unwrap();
        assert_eq!(projected.width(), 3);
    }

    #[test]
    fn index_and_variant_columns_together_are_malformed() {
        let (_dir, path) = write_table(
            "Unnamed: 0,variant,predict,geneSymbol\n0,1-100-A-T,0.9,BRCA1\n",
        );
        let err = read_raw_result(&path).unwrap_err();
        assert!(matches!(err, AdapterError::MalformedInput { .. }));
    }

    #[test]
    fn null_score_is_malformed() {
        let df = polars::df![
            "variant" => &["1-100-A-T", "1-200-C-G"],
            "predict" => &[Some(0.5), None],
            "geneSymbol" => &["BRCA1", "BRCA2"]
        ]
        .unwrap();
        let err = rows_from_frame(&df, Path::new("in.csv")).unwrap_err();
        assert!(matches!(err, AdapterError::MalformedInput { .. }));
    }
}
