//! Writes deterministic sample data for the dashboard:
//!
//! * `<out>/all_data.csv`          – `Year,Name,Sex,Births` with a header
//! * `<out>/names/yobYYYY.txt`     – one headerless `Name,Sex,Births` file per year
//!
//! Usage: `generate_sample [OUT_DIR]` (defaults to the current directory).

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

const FIRST_YEAR: u32 = 2000;
const YEARS: u32 = 10;

/// (name, sex, typical births per year)
const NAMES: &[(&str, &str, f64)] = &[
    ("Emma", "F", 900.0),
    ("Olivia", "F", 850.0),
    ("Ava", "F", 600.0),
    ("Sophia", "F", 700.0),
    ("Isabella", "F", 450.0),
    ("Mia", "F", 300.0),
    ("Charlotte", "F", 250.0),
    ("Amelia", "F", 150.0),
    ("Liam", "M", 950.0),
    ("Noah", "M", 880.0),
    ("Oliver", "M", 500.0),
    ("Elijah", "M", 420.0),
    ("James", "M", 640.0),
    ("William", "M", 560.0),
    ("Benjamin", "M", 330.0),
    ("Lucas", "M", 210.0),
    ("Henry", "M", 120.0),
];

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

fn main() -> Result<()> {
    let out_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let names_dir = out_dir.join("names");
    fs::create_dir_all(&names_dir)
        .with_context(|| format!("creating {}", names_dir.display()))?;

    let mut rng = SimpleRng::new(42);

    let csv_path = out_dir.join("all_data.csv");
    let mut all = csv::Writer::from_path(&csv_path)
        .with_context(|| format!("creating {}", csv_path.display()))?;
    all.write_record(["Year", "Name", "Sex", "Births"])?;

    let mut rows = 0usize;
    for offset in 0..YEARS {
        let year = FIRST_YEAR + offset;
        let year_path = names_dir.join(format!("yob{year}.txt"));
        let mut yearly = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&year_path)
            .with_context(|| format!("creating {}", year_path.display()))?;

        // Slow drift so totals differ between years.
        let trend = 1.0 + offset as f64 * 0.03;
        for &(name, sex, typical) in NAMES {
            let births = rng.gauss(typical * trend, typical * 0.1).max(0.0).round() as u64;
            let births = births.to_string();
            all.write_record([year.to_string().as_str(), name, sex, births.as_str()])?;
            yearly.write_record([name, sex, births.as_str()])?;
            rows += 1;
        }
        yearly.flush()?;
    }
    all.flush()?;

    println!(
        "Wrote {rows} rows to {} and {YEARS} yearly files to {}",
        csv_path.display(),
        names_dir.display()
    );
    Ok(())
}
