//! Write a synthetic NPDB-style extract for trying the dashboard without the
//! real public-use file.
//!
//! Produces `sample_npdb.csv` and `sample_npdb.parquet` with the same rows.

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const STATES: [&str; 12] = ["CA", "NY", "TX", "FL", "PA", "IL", "OH", "MI", "NJ", "GA", "WA", "PR"];
const ALLEGATIONS: [i64; 11] = [1, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100];
const RECORDS: usize = 5_000;
const PRACTITIONERS: u64 = 1_800;

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

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len() as u64) as usize]
    }

    /// Log-normal draw, for right-skewed payment amounts.
    fn log_normal(&mut self, mu: f64, sigma: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        (mu + sigma * z).exp()
    }
}

/// One synthetic report, with fields as they appear in the public-use file.
struct SampleRow {
    seqno: i64,
    year: i64,
    practnum: i64,
    workstat: String,
    totalpmt: String,
    aalength: Option<f64>,
    algnnatr: Option<i64>,
    outcome: Option<i64>,
}

fn format_dollars(amount: f64) -> String {
    let whole = amount.round() as u64;
    let digits = whole.to_string();
    let mut out = String::from("$");
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn generate(rng: &mut SimpleRng) -> Vec<SampleRow> {
    (0..RECORDS)
        .map(|i| {
            let is_payment = rng.next_f64() < 0.8;
            SampleRow {
                seqno: i as i64 + 1,
                year: 2004 + rng.below(17) as i64,
                practnum: rng.below(PRACTITIONERS) as i64 + 1,
                workstat: rng.pick(&STATES).to_string(),
                totalpmt: if is_payment {
                    format_dollars(rng.log_normal(11.8, 1.1))
                } else {
                    String::new()
                },
                aalength: (!is_payment).then(|| (rng.below(40) as f64) / 4.0),
                // A small share of codes fall outside the lookup tables.
                algnnatr: is_payment.then(|| {
                    if rng.next_f64() < 0.02 {
                        110
                    } else {
                        *rng.pick(&ALLEGATIONS)
                    }
                }),
                outcome: is_payment.then(|| rng.below(10) as i64 + 1),
            }
        })
        .collect()
}

fn write_csv(rows: &[SampleRow], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record([
        "SEQNO", "ORIGYEAR", "PRACTNUM", "WORKSTAT", "TOTALPMT", "AALENGTH", "ALGNNATR", "OUTCOME",
    ])?;
    let opt = |v: Option<String>| v.unwrap_or_default();
    for r in rows {
        writer.write_record([
            r.seqno.to_string(),
            r.year.to_string(),
            r.practnum.to_string(),
            r.workstat.clone(),
            r.totalpmt.clone(),
            opt(r.aalength.map(|v| v.to_string())),
            opt(r.algnnatr.map(|v| v.to_string())),
            opt(r.outcome.map(|v| v.to_string())),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(rows: &[SampleRow], path: &str) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("SEQNO", DataType::Int64, false),
        Field::new("ORIGYEAR", DataType::Int64, false),
        Field::new("PRACTNUM", DataType::Int64, false),
        Field::new("WORKSTAT", DataType::Utf8, false),
        Field::new("TOTALPMT", DataType::Utf8, true),
        Field::new("AALENGTH", DataType::Float64, true),
        Field::new("ALGNNATR", DataType::Int64, true),
        Field::new("OUTCOME", DataType::Int64, true),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.seqno))),
        Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.year))),
        Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.practnum))),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.workstat.as_str()))),
        Arc::new(
            rows.iter()
                .map(|r| (!r.totalpmt.is_empty()).then_some(r.totalpmt.as_str()))
                .collect::<StringArray>(),
        ),
        Arc::new(rows.iter().map(|r| r.aalength).collect::<Float64Array>()),
        Arc::new(rows.iter().map(|r| r.algnnatr).collect::<Int64Array>()),
        Arc::new(rows.iter().map(|r| r.outcome).collect::<Int64Array>()),
    ];

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;
    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    write_csv(&rows, "sample_npdb.csv")?;
    write_parquet(&rows, "sample_npdb.parquet")?;

    println!(
        "Wrote {} records to sample_npdb.csv and sample_npdb.parquet",
        rows.len()
    );
    Ok(())
}
