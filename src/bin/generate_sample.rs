use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

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

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// Element name and the composition range samples are drawn from (wt-%).
const ELEMENTS: [(&str, f64, f64); 6] = [
    ("C", 0.02, 0.45),
    ("Mn", 0.20, 1.60),
    ("Si", 0.05, 0.60),
    ("P", 0.005, 0.040),
    ("S", 0.002, 0.030),
    ("Cr", 0.00, 1.20),
];

const GRADES: [&str; 4] = ["S235JR", "S355J2", "C45E", "42CrMo4"];
const SPECS: [&str; 3] = ["AIM", "MIN", "MAX"];

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

fn write_catalog(path: &Path, rng: &mut SimpleRng, n_rows: usize) -> Result<()> {
    let mut psn_no = Vec::with_capacity(n_rows);
    let mut grade = Vec::with_capacity(n_rows);
    let mut spec = Vec::with_capacity(n_rows);
    let mut element_values: Vec<Vec<Option<f64>>> =
        vec![Vec::with_capacity(n_rows); ELEMENTS.len()];

    for i in 0..n_rows {
        psn_no.push(format!("PSN{:05}", 10_000 + i));
        grade.push(GRADES[i % GRADES.len()].to_string());
        spec.push(SPECS[i % SPECS.len()].to_string());
        for (column, &(_, lo, hi)) in element_values.iter_mut().zip(ELEMENTS.iter()) {
            // Roughly one value in ten is left unmeasured.
            if rng.next_f64() < 0.1 {
                column.push(None);
            } else {
                column.push(Some(round4(rng.uniform(lo, hi))));
            }
        }
    }

    let mut fields = vec![
        Field::new("PSN_NO", DataType::Utf8, false),
        Field::new("PSN_Grade", DataType::Utf8, false),
        Field::new("SPEC", DataType::Utf8, false),
    ];
    let mut columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(psn_no)),
        Arc::new(StringArray::from(grade)),
        Arc::new(StringArray::from(spec)),
    ];
    for ((name, _, _), values) in ELEMENTS.iter().zip(element_values) {
        fields.push(Field::new(*name, DataType::Float64, true));
        columns.push(Arc::new(Float64Array::from(values)));
    }

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating catalog file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn write_ranges(path: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("creating range sheet")?;
    writer.write_record(["Element", "C", "Mn", "Si", "P", "S", ""])?;
    writer.write_record(["Min", "0.10", "0.30", "", "", "", ""])?;
    writer.write_record(["Max", "0.25", "1.00", "0.40", "0.030", "0.020", ""])?;
    writer.flush().context("flushing range sheet")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let n_rows = 300;

    let dir = Path::new("sample_workbook");
    std::fs::create_dir_all(dir).context("creating sample_workbook/")?;

    write_catalog(&dir.join("PSN_DATA.parquet"), &mut rng, n_rows)?;
    write_ranges(&dir.join("Dashboard.csv"))?;

    println!(
        "Wrote {n_rows} PSNs ({} elements each) and a range sheet to {}/",
        ELEMENTS.len(),
        dir.display()
    );
    Ok(())
}
