use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Per-row offsets that give the series a mild year-over-year drift.
const DRIFT: [f64; 4] = [-600.0, -200.0, 200.0, 600.0];

const YEARS: [i64; 4] = [2015, 2016, 2017, 2018];

const FIELDS: [&str; 10] = [
    "Engineering",
    "Computer Science",
    "Business",
    "Nursing",
    "Education",
    "Psychology",
    "Biology",
    "Economics",
    "Communications",
    "Mathematics",
];

fn drifted(base: f64) -> Vec<f64> {
    DRIFT.iter().map(|d| base + d).collect()
}

fn write_parquet(path: &Path, columns: Vec<(&str, Vec<f64>)>) {
    let mut fields = vec![Field::new("Year", DataType::Int64, false)];
    fields.extend(
        columns
            .iter()
            .map(|(name, _)| Field::new(*name, DataType::Float64, false)),
    );
    let schema = Arc::new(Schema::new(fields));

    let mut arrays: Vec<Arc<dyn arrow::array::Array>> =
        vec![Arc::new(Int64Array::from(YEARS.to_vec()))];
    for (_, values) in columns {
        arrays.push(Arc::new(Float64Array::from(values)));
    }

    let batch = RecordBatch::try_new(schema.clone(), arrays).expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

fn write_salary_csv(path: &Path, bases: [f64; 10]) {
    let mut writer = csv::Writer::from_path(path).expect("Failed to create CSV file");
    writer
        .write_record(FIELDS)
        .expect("Failed to write CSV header");

    for drift in DRIFT {
        let row: Vec<String> = bases.iter().map(|b| format!("{}", b + drift)).collect();
        writer.write_record(&row).expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV");
}

fn main() {
    let out_dir = std::env::args().nth(1).unwrap_or_else(|| "dataset".to_string());
    let out_dir = Path::new(&out_dir);
    std::fs::create_dir_all(out_dir).expect("Failed to create output directory");

    write_parquet(
        &out_dir.join("tuition.parquet"),
        vec![
            ("Undergrad Public", drifted(9480.0)),
            ("Undergrad Private", drifted(33_020.0)),
            ("Graduate Public", drifted(11_850.0)),
            ("Graduate Private", drifted(41_800.0)),
            ("Room and Board", drifted(10_620.0)),
        ],
    );

    write_parquet(
        &out_dir.join("financial.parquet"),
        vec![
            ("Undergrad Loan", drifted(7050.0)),
            ("Undergrad Aid", drifted(9310.0)),
            ("Graduate Loan", drifted(18_820.0)),
            ("Graduate Aid", drifted(8590.0)),
        ],
    );

    write_salary_csv(
        &out_dir.join("salary_associate.csv"),
        [
            48_000.0, 46_000.0, 38_000.0, 44_000.0, 32_000.0, 31_000.0, 34_000.0, 37_000.0,
            33_000.0, 40_000.0,
        ],
    );
    write_salary_csv(
        &out_dir.join("salary_undergraduate.csv"),
        [
            68_000.0, 66_000.0, 52_000.0, 56_000.0, 40_000.0, 42_000.0, 46_000.0, 54_000.0,
            45_000.0, 58_000.0,
        ],
    );
    write_salary_csv(
        &out_dir.join("salary_graduate.csv"),
        [
            78_000.0, 77_000.0, 62_000.0, 64_000.0, 48_000.0, 50_000.0, 55_000.0, 66_000.0,
            52_000.0, 68_000.0,
        ],
    );

    println!(
        "Wrote tuition, financial and three salary datasets to {}",
        out_dir.display()
    );
}
