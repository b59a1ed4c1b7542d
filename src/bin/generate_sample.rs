use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

const TIME_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

#[derive(Serialize)]
struct Row {
    #[serde(rename = "Time")]
    time: String,
    #[serde(rename = "Source Pressure (mBar)")]
    source_pressure: f64,
    #[serde(rename = "Flow (sccm)")]
    flow: f64,
    #[serde(rename = "Chamber Pressure (mBar)")]
    chamber_pressure: f64,
}

/// Seeded splitmix64 noise; the same seed always yields the same files.
struct Noise(u64);

impl Noise {
    /// Uniform value in `[-amplitude, amplitude)`.
    fn jitter(&mut self, amplitude: f64) -> f64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        let unit = (z >> 11) as f64 / (1u64 << 53) as f64;
        amplitude * (2.0 * unit - 1.0)
    }
}

/// One pressure ramp: source pressure climbs linearly, the chamber follows with a
/// conductance that differs per run.
fn ramp(start: NaiveDateTime, samples: usize, conductance: f64, noise: &mut Noise) -> Vec<Row> {
    (0..samples)
        .map(|i| {
            let source = 10.0 + i as f64 * 5.0;
            let chamber = source * (1.0 - (-conductance * i as f64 / samples as f64).exp());
            Row {
                time: (start + Duration::seconds(i as i64)).format(TIME_FORMAT).to_string(),
                source_pressure: source,
                flow: conductance * source + noise.jitter(0.5),
                chamber_pressure: chamber + noise.jitter(0.2),
            }
        })
        .collect()
}

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_data"));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut noise = Noise(42);
    let day = NaiveDate::from_ymd_opt(2024, 6, 5).context("invalid sample date")?;

    // (start hour, conductance) per run; one run per file.
    let runs = [(9, 0.8), (11, 1.5), (14, 2.5)];
    let mut total = 0;

    for (n, &(hour, conductance)) in runs.iter().enumerate() {
        let start = day
            .and_hms_opt(hour, 0, 0)
            .context("invalid sample start time")?;
        let rows = ramp(start, 120, conductance, &mut noise);

        let path = out_dir.join(format!("run_{}.csv", n + 1));
        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("creating {}", path.display()))?;
        for row in &rows {
            writer.serialize(row)?;
        }
        writer.flush()?;

        println!(
            "Wrote {} rows to {} (window {} .. {})",
            rows.len(),
            path.display(),
            start.format("%Y-%m-%d %H:%M:%S"),
            (start + Duration::seconds(rows.len() as i64 - 1)).format("%Y-%m-%d %H:%M:%S"),
        );
        total += rows.len();
    }

    println!("{total} rows in {} file(s)", runs.len());
    Ok(())
}
