use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{DataError, IceDataset, Observation};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an extent dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with `year`, `mo` (or `month`) and `extent` columns
/// * `.json`    – `[{ "year": 1979, "mo": 1, "extent": 15.41 }, ...]`
/// * `.parquet` – integer or float columns with the same names
///
/// Any other columns are ignored.
pub fn load_file(path: &Path) -> Result<IceDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            read_csv(file)
        }
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            parse_json(&text)
        }
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::debug!("Parsed {} observations from {}", dataset.len(), path.display());
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Row schema shared by the CSV and JSON loaders
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct Row {
    year: i32,
    #[serde(alias = "mo")]
    month: i64,
    extent: f64,
}

impl Row {
    fn into_observation(self, row: usize) -> Result<Observation> {
        Observation::new(self.year, self.month, self.extent).with_context(|| format!("Row {row}"))
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout:  header row with column names, one observation per line.
/// Header and field whitespace is trimmed, so the padded NSIDC monthly
/// files (`year, mo,    data-type, region, extent,   area`) load directly.
pub fn read_csv<R: Read>(reader: R) -> Result<IceDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers().context("reading CSV headers")?.clone();
    let required: [(&'static str, &[&str]); 3] = [
        ("year", &["year"]),
        ("mo", &["mo", "month"]),
        ("extent", &["extent"]),
    ];
    for (column, aliases) in required {
        if !headers.iter().any(|h| aliases.contains(&h)) {
            return Err(DataError::MissingColumn(column).into());
        }
    }

    let mut observations = Vec::new();
    for (row_no, result) in reader.deserialize::<Row>().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        observations.push(row.into_observation(row_no)?);
    }

    Ok(IceDataset::new(observations))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (the default `to_json(orient='records')` layout).
pub fn parse_json(text: &str) -> Result<IceDataset> {
    let rows: Vec<Row> = serde_json::from_str(text).context("parsing JSON records")?;
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| row.into_observation(i))
        .collect::<Result<Vec<_>>>()
        .map(IceDataset::new)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with `year`, `mo`/`month` and `extent` columns.
///
/// Integer and float physical types are both accepted and cast on read.
fn load_parquet(path: &Path) -> Result<IceDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut observations = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        read_batch(&batch, observations.len(), &mut observations)?;
    }

    Ok(IceDataset::new(observations))
}

fn read_batch(batch: &RecordBatch, row_offset: usize, out: &mut Vec<Observation>) -> Result<()> {
    let years = integer_column(batch, "year", &["year"], row_offset)?;
    let months = integer_column(batch, "mo", &["mo", "month"], row_offset)?;
    let extents = column_as(batch, "extent", &["extent"], &DataType::Float64)?;

    let years = years.as_primitive::<Int64Type>();
    let months = months.as_primitive::<Int64Type>();
    let extents = extents.as_primitive::<Float64Type>();

    for i in 0..batch.num_rows() {
        let row = row_offset + i;
        for (column, array) in [
            ("year", years as &dyn Array),
            ("mo", months as &dyn Array),
            ("extent", extents as &dyn Array),
        ] {
            if array.is_null(i) {
                return Err(DataError::NullValue { column, row }.into());
            }
        }
        let year = i32::try_from(years.value(i))
            .with_context(|| format!("Row {row}: year {} out of range", years.value(i)))?;
        let obs = Observation::new(year, months.value(i), extents.value(i))
            .with_context(|| format!("Row {row}"))?;
        out.push(obs);
    }
    Ok(())
}

/// Like [`column_as`] with an `Int64` target, but a float column must hold
/// whole numbers: `1.7` is an error instead of being truncated to `1`.
fn integer_column(
    batch: &RecordBatch,
    column: &'static str,
    aliases: &[&str],
    row_offset: usize,
) -> Result<Arc<dyn Array>> {
    let floats = column_as(batch, column, aliases, &DataType::Float64)?;
    let floats = floats.as_primitive::<Float64Type>();
    for (i, value) in floats.iter().enumerate() {
        if let Some(value) = value {
            if value.fract() != 0.0 {
                bail!("Row {}: {column} {value} is not a whole number", row_offset + i);
            }
        }
    }
    column_as(batch, column, aliases, &DataType::Int64)
}

/// Find the first column matching one of `aliases` and cast it to `to`.
fn column_as(
    batch: &RecordBatch,
    column: &'static str,
    aliases: &[&str],
    to: &DataType,
) -> Result<Arc<dyn Array>> {
    let schema = batch.schema();
    let Some(idx) = aliases.iter().find_map(|name| schema.index_of(name).ok()) else {
        return Err(DataError::MissingColumn(column).into());
    };
    let col = batch.column(idx);
    match col.data_type() {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64
        | DataType::Float32
        | DataType::Float64 => {}
        other => bail!("Column '{column}' has type {other:?}, expected a numeric column"),
    }
    cast(col, to).with_context(|| format!("casting '{column}' to {to:?}"))
}
