//! Writes synthetic spectrometer text exports for trying out the converter.
//!
//! Usage: `generate_sample [DIR] [COUNT]` (defaults: `.` and 3).

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

fn generate_spectrum(
    shifts: &[f64],
    peaks: &[(f64, f64, f64)],
    baseline: f64,
    noise_level: f64,
    noise: &mut Noise,
) -> Vec<f64> {
    shifts
        .iter()
        .map(|&s| {
            let signal: f64 = peaks
                .iter()
                .map(|&(mu, sigma, amp)| gaussian(s, mu, sigma, amp))
                .sum();
            baseline + signal + noise.normal(noise_level)
        })
        .collect()
}

/// Seeded noise for the synthetic counts (SplitMix64 stream, polar-method
/// normal samples).  Same seed, same files.
struct Noise {
    state: u64,
    spare: Option<f64>,
}

impl Noise {
    fn seeded(seed: u64) -> Self {
        Noise { state: seed, spare: None }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in [-1, 1).
    fn symmetric(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 52) as f64 - 1.0
    }

    fn normal(&mut self, std_dev: f64) -> f64 {
        if let Some(z) = self.spare.take() {
            return z * std_dev;
        }
        loop {
            let (u, v) = (self.symmetric(), self.symmetric());
            let s = u * u + v * v;
            if s > 0.0 && s < 1.0 {
                let k = (-2.0 * s.ln() / s).sqrt();
                self.spare = Some(v * k);
                return u * k * std_dev;
            }
        }
    }
}

/// (centre, width, height) triples, loosely modelled on common Raman bands.
const PEAK_SETS: [&[(f64, f64, f64)]; 3] = [
    &[(520.0, 6.0, 4200.0), (950.0, 20.0, 600.0)],
    &[(1001.0, 4.0, 3100.0), (1600.0, 12.0, 1800.0), (2930.0, 30.0, 2400.0)],
    &[(465.0, 8.0, 2600.0), (1085.0, 5.0, 3900.0), (1350.0, 40.0, 900.0)],
];

fn write_export(path: &Path, index: usize, shifts: &[f64], counts: &[f64]) -> Result<()> {
    let file = std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "[Info]")?;
    writeln!(out, "Title\tsynthetic sample {index}")?;
    writeln!(out, "Acq. time (s)\t10")?;
    writeln!(out, "Accumulations\t2")?;
    writeln!(out)?;
    writeln!(out, "[Data]")?;
    writeln!(out, "Spectrum {index}")?;
    writeln!(out, "rel. 1/cm\tCCD cts")?;
    for (s, c) in shifts.iter().zip(counts) {
        writeln!(out, "{s:.2}\t{c:.1}")?;
    }
    out.flush().with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let dir = PathBuf::from(args.next().unwrap_or_else(|| ".".to_string()));
    let count: usize = match args.next() {
        Some(n) => n.parse().with_context(|| format!("COUNT must be a number, got '{n}'"))?,
        None => 3,
    };

    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut noise = Noise::seeded(42);

    // Raman shift: 100 → 3200 rel. 1/cm, step 1.5
    let shifts: Vec<f64> = (0..2067).map(|i| 100.0 + i as f64 * 1.5).collect();

    for i in 1..=count {
        let peaks = PEAK_SETS[(i - 1) % PEAK_SETS.len()];
        let counts = generate_spectrum(&shifts, peaks, 350.0, 25.0, &mut noise);
        let path = dir.join(format!("sample_{i}.txt"));
        write_export(&path, i, &shifts, &counts)?;
    }

    let readme = dir.join("Readme.txt");
    std::fs::write(
        &readme,
        "Synthetic exports written by generate_sample. This file is ignored by rusty-raman.\n",
    )
    .with_context(|| format!("writing {}", readme.display()))?;

    println!(
        "Wrote {count} exports ({} points each) to {}",
        shifts.len(),
        dir.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_is_reproducible() {
        let a: Vec<f64> = {
            let mut n = Noise::seeded(7);
            (0..16).map(|_| n.normal(1.0)).collect()
        };
        let mut n = Noise::seeded(7);
        let b: Vec<f64> = (0..16).map(|_| n.normal(1.0)).collect();
        assert_eq!(a, b);
        assert_ne!(Noise::seeded(8).next_u64(), Noise::seeded(7).next_u64());
    }

    #[test]
    fn noise_is_roughly_standard_normal() {
        let mut n = Noise::seeded(42);
        let samples: Vec<f64> = (0..20_000).map(|_| n.normal(2.0)).collect();
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let var = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / samples.len() as f64;
        assert!(mean.abs() < 0.1, "mean {mean}");
        assert!((var.sqrt() - 2.0).abs() < 0.1, "std dev {}", var.sqrt());

        let mut u = Noise::seeded(1);
        assert!((0..1000).map(|_| u.symmetric()).all(|x| (-1.0..1.0).contains(&x)));
    }

    #[test]
    fn export_has_marker_title_units_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample_1.txt");
        write_export(&path, 1, &[100.0, 101.5], &[350.0, 351.0]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let after: Vec<&str> = text.split_once("[Data]\n").unwrap().1.lines().collect();
        assert_eq!(after, ["Spectrum 1", "rel. 1/cm\tCCD cts", "100.00\t350.0", "101.50\t351.0"]);
    }
}
