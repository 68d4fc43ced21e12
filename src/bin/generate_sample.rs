use std::fs::File;
use std::io::{BufWriter, Write};

/// Logistic rise through the front position: ~0 ahead of the cone,
/// ~`amplitude` well behind it.
fn density(site: f64, time: f64, origin: f64, velocity: f64, width: f64) -> f64 {
    let front = velocity * time - (site - origin).abs();
    let amplitude = 0.95;
    amplitude / (1.0 + (-front / width).exp())
}

fn main() -> std::io::Result<()> {
    let n_sites = 15usize;
    let n_times = 120usize;
    let dt = 0.05;

    // Excitation starts at the centre site and spreads at 2 sites per unit
    // time; a small site-dependent ripple keeps the table from being
    // perfectly smooth.
    let origin = (n_sites as f64 - 1.0) / 2.0;
    let velocity = 2.0;
    let width = 0.35;

    let output_path = "sample_data.txt";
    let file = File::create(output_path)?;
    let mut out = BufWriter::new(file);

    for ti in 0..n_times {
        let time = ti as f64 * dt;
        write!(out, "{time:.4}")?;
        for s in 0..n_sites {
            let ripple = 0.01 * ((s as f64 * 1.7 + time * 3.1).sin());
            let v = (density(s as f64, time, origin, velocity, width) + ripple)
                .clamp(0.0, 1.0);
            write!(out, " {v:.6}")?;
        }
        writeln!(out)?;
    }
    out.flush()?;

    println!("Wrote {n_times} time samples × {n_sites} sites to {output_path}");
    Ok(())
}
