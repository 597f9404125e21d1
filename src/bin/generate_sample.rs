use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Float64Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Write a synthetic monthly sea-ice extent dataset.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Output file; `.csv` or `.parquet`.
    #[arg(long, default_value = "sample_ice.csv")]
    out: PathBuf,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Column names follow the NSIDC monthly files.
#[derive(Debug, Serialize)]
struct Row {
    year: i64,
    mo: i64,
    extent: f64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Arctic-like cycle: maximum in March (~15.5), minimum in September (~6.5),
/// shrinking by roughly 0.5 % a year, plus a handful of `-9999` missing-value rows.
fn generate(rng: &mut SimpleRng) -> Vec<Row> {
    let mut rows = Vec::new();
    for year in 1979..=2023i64 {
        let decline = 1.0 - 0.005 * (year - 1979) as f64;
        for mo in 1..=12i64 {
            let phase = (mo - 3) as f64 * std::f64::consts::PI / 6.0;
            let seasonal = 11.0 + 4.5 * phase.cos();
            let extent = if rng.next_f64() < 0.01 {
                -9999.0
            } else {
                seasonal * decline + rng.gauss(0.0, 0.25)
            };
            rows.push(Row { year, mo, extent });
        }
    }
    rows
}

fn write_csv(path: &Path, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[Row]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("year", DataType::Int64, false),
        Field::new("mo", DataType::Int64, false),
        Field::new("extent", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.year))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.mo))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.extent))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();
    let mut rng = SimpleRng::new(args.seed);
    let rows = generate(&mut rng);

    let ext = args
        .out
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "csv" => write_csv(&args.out, &rows)?,
        "parquet" | "pq" => write_parquet(&args.out, &rows)?,
        other => bail!("Unsupported output extension: .{other}"),
    }

    let missing = rows.iter().filter(|r| r.extent < 0.0).count();
    println!(
        "Wrote {} observations ({missing} missing-value rows) to {}",
        rows.len(),
        args.out.display()
    );
    Ok(())
}
