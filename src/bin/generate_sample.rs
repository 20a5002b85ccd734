use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// One generated launch.
struct Launch {
    flight: i64,
    site: &'static str,
    class: i64,
    payload: f64,
    booster: &'static str,
}

fn generate(n: usize, rng: &mut SimpleRng) -> Vec<Launch> {
    const SITES: [&str; 4] = ["CCAFS LC-40", "CCAFS SLC-40", "KSC LC-39A", "VAFB SLC-4E"];
    // Later booster generations fly heavier payloads and fail less often.
    const BOOSTERS: [(&str, f64, f64); 5] = [
        ("v1.0", 600.0, 0.55),
        ("v1.1", 2500.0, 0.65),
        ("FT", 4500.0, 0.8),
        ("B4", 5500.0, 0.85),
        ("B5", 6500.0, 0.95),
    ];

    (0..n)
        .map(|i| {
            let generation = (i * BOOSTERS.len() / n).min(BOOSTERS.len() - 1);
            let (booster, mean_payload, success_rate) = BOOSTERS[generation];
            let payload = (mean_payload * (0.4 + 1.2 * rng.next_f64())).round().min(9600.0);
            Launch {
                flight: i as i64 + 1,
                site: rng.pick(&SITES),
                class: i64::from(rng.next_f64() < success_rate),
                payload,
                booster,
            }
        })
        .collect()
}

fn write_csv(path: &str, launches: &[Launch]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "Flight Number",
        "Launch Site",
        "class",
        "Payload Mass (kg)",
        "Booster Version Category",
    ])?;
    for l in launches {
        writer.write_record([
            l.flight.to_string(),
            l.site.to_string(),
            l.class.to_string(),
            l.payload.to_string(),
            l.booster.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &str, launches: &[Launch]) -> anyhow::Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.flight))),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.site))),
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.class))),
            Arc::new(Float64Array::from_iter_values(launches.iter().map(|l| l.payload))),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.booster))),
        ],
    )?;

    let file = std::fs::File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);
    let launches = generate(56, &mut rng);

    write_csv("sample_launches.csv", &launches)?;
    write_parquet("sample_launches.parquet", &launches)?;

    println!(
        "Wrote {} launches to sample_launches.csv and sample_launches.parquet",
        launches.len()
    );
    Ok(())
}
