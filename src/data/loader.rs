use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Column, Table};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a tabular dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – Parquet file with numeric columns (recommended)
/// * `.json`    – `[{ "column": 123.0, ... }, ...]` (records orientation)
/// * `.csv`     – header row with column names, numeric cells
///
/// `name` is the logical dataset name ("tuition", "financial", ...), carried
/// into the [`Table`] for error messages.
pub fn load_table(path: &Path, name: &str) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "parquet" | "pq" => load_parquet(path, name),
        "json" => load_json(path, name),
        "csv" => load_csv(path, name),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, every cell a number.
fn load_csv(path: &Path, name: &str) -> Result<Table> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        if record.len() != headers.len() {
            bail!(
                "CSV row {row_no}: has {} fields, expected {}",
                record.len(),
                headers.len()
            );
        }
        for (col_idx, cell) in record.iter().enumerate() {
            let value: f64 = cell.trim().parse().with_context(|| {
                format!(
                    "Row {row_no}, column '{}': '{cell}' is not a number",
                    headers[col_idx]
                )
            })?;
            columns[col_idx].push(value);
        }
    }

    let columns = headers
        .into_iter()
        .zip(columns)
        .map(|(h, v)| Column::new(h, v))
        .collect();

    Ok(Table::new(name, columns)?)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Undergrad Public": 9000, "Undergrad Private": 32000, ... },
///   ...
/// ]
/// ```
///
/// Every record must carry the same set of keys; all values must be numbers.
fn load_json(path: &Path, name: &str) -> Result<Table> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;
    if records.is_empty() {
        bail!("JSON dataset has no rows");
    }

    let first = records[0]
        .as_object()
        .context("Row 0 is not a JSON object")?;
    let keys: Vec<String> = first.keys().cloned().collect();

    let mut columns: Vec<Vec<f64>> = vec![Vec::with_capacity(records.len()); keys.len()];

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        if obj.len() != keys.len() {
            bail!(
                "Row {i}: has {} fields, expected the {} of row 0",
                obj.len(),
                keys.len()
            );
        }
        for (col_idx, key) in keys.iter().enumerate() {
            let value = obj
                .get(key)
                .with_context(|| format!("Row {i}: missing column '{key}'"))?;
            let value = value
                .as_f64()
                .with_context(|| format!("Row {i}, column '{key}': not a number"))?;
            columns[col_idx].push(value);
        }
    }

    let columns = keys
        .into_iter()
        .zip(columns)
        .map(|(k, v)| Column::new(k, v))
        .collect();

    Ok(Table::new(name, columns)?)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with numeric columns (Float64/Float32/Int64/Int32).
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`), as long as every column is numeric.
fn load_parquet(path: &Path, name: &str) -> Result<Table> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut headers: Vec<String> = Vec::new();
    let mut columns: Vec<Vec<f64>> = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        if headers.is_empty() {
            headers = schema.fields().iter().map(|f| f.name().clone()).collect();
            columns = vec![Vec::new(); headers.len()];
        }

        for (col_idx, header) in headers.iter().enumerate() {
            let array = batch.column(col_idx);
            append_numeric_column(array, header, &mut columns[col_idx])
                .with_context(|| format!("column '{header}'"))?;
        }
    }

    if headers.is_empty() {
        bail!("Parquet file contains no record batches");
    }

    let columns = headers
        .into_iter()
        .zip(columns)
        .map(|(h, v)| Column::new(h, v))
        .collect();

    Ok(Table::new(name, columns)?)
}

// -- Arrow helpers --

/// Append every value of a numeric Arrow array to `out` as `f64`.
fn append_numeric_column(col: &Arc<dyn Array>, name: &str, out: &mut Vec<f64>) -> Result<()> {
    if col.null_count() > 0 {
        bail!("'{name}' contains null values");
    }
    match col.data_type() {
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            out.extend(arr.values().iter().copied());
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?;
            out.extend(arr.values().iter().map(|&v| v as f64));
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            out.extend(arr.values().iter().map(|&v| v as f64));
        }
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            out.extend(arr.values().iter().map(|&v| v as f64));
        }
        other => bail!("'{name}' has non-numeric type {other:?}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Float64Array as F64;
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use std::io::Write;

    #[test]
    fn csv_round_trip() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Year,Undergrad Public").unwrap();
        writeln!(file, "2015,9000").unwrap();
        writeln!(file, "2016,9400").unwrap();
        file.flush().unwrap();

        let table = load_table(file.path(), "tuition").unwrap();
        assert_eq!(table.name, "tuition");
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.column_mean("Undergrad Public").unwrap(), 9200.0);
        assert_eq!(table.column("Year").unwrap().values, vec![2015.0, 2016.0]);
    }

    #[test]
    fn csv_non_numeric_cell_fails() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "a,b").unwrap();
        writeln!(file, "1,oops").unwrap();
        file.flush().unwrap();

        let err = load_table(file.path(), "t").unwrap_err();
        assert!(format!("{err:#}").contains("not a number"));
    }

    #[test]
    fn json_records_round_trip() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"[{{"a": 1, "b": 2.5}}, {{"a": 3, "b": 4.5}}]"#).unwrap();
        file.flush().unwrap();

        let table = load_table(file.path(), "t").unwrap();
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.column_mean("b").unwrap(), 3.5);
    }

    #[test]
    fn json_missing_key_fails() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"[{{"a": 1, "b": 2}}, {{"a": 3}}]"#).unwrap();
        file.flush().unwrap();

        assert!(load_table(file.path(), "t").is_err());
    }

    #[test]
    fn parquet_round_trip() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("Undergrad Aid", DataType::Float64, false),
            Field::new("Graduate Aid", DataType::Float64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(F64::from(vec![2000.0, 2200.0])),
                Arc::new(F64::from(vec![1000.0, 1400.0])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new()
            .suffix(".parquet")
            .tempfile()
            .unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_table(file.path(), "financial").unwrap();
        assert_eq!(table.column_mean("Undergrad Aid").unwrap(), 2100.0);
        assert_eq!(table.column_mean("Graduate Aid").unwrap(), 1200.0);
    }

    #[test]
    fn unknown_extension_fails() {
        let err = load_table(Path::new("tuition.xls"), "t").unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }
}
