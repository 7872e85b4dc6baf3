// Example usage of the quantized archive: write noisy signals, read them back

use pltq::{ArchiveReader, ArchiveWriter, QuantConfig};
use rand::Rng;
use tracing::{debug, info, Level};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .init();

    let mut rng = rand::thread_rng();

    // A few sine waves with different amplitudes, offsets and noise
    let signals: Vec<Vec<f32>> = (0..4)
        .map(|k| {
            let amplitude = 1.0 + k as f32 * 2.5;
            let offset = k as f32 * -10.0;
            (0..2_000)
                .map(|i| {
                    let t = i as f32 * 0.01;
                    offset + amplitude * (t * (k + 1) as f32).sin() + rng.gen_range(-0.05..0.05)
                })
                .collect()
        })
        .collect();

    let config = QuantConfig::default();
    let out_dir = std::env::temp_dir().join("pltq_demo");

    let writer = ArchiveWriter::new(&config)?;
    let path = writer.write_series(&signals, &out_dir, "signals.zip")?;

    let raw_bytes: usize = signals.iter().map(|s| s.len() * 4).sum();
    let archive_bytes = std::fs::metadata(&path)?.len();
    info!(
        "Wrote {} ({} bytes, raw f32 would be {} bytes)",
        path.display(),
        archive_bytes,
        raw_bytes
    );

    let reader = ArchiveReader::open(&path, config.num_levels)?;
    info!("Archive holds {} series", reader.len());

    for (i, original) in signals.iter().enumerate() {
        let restored = reader.reconstruct(i)?;
        let worst = original
            .iter()
            .zip(&restored)
            .map(|(&x, y)| (x as f64 - y).abs())
            .fold(0.0, f64::max);

        let Some(d) = reader.descriptor(i) else {
            continue;
        };
        debug!("  [{}] length={} min={} max={}", i, d.length, d.min, d.max);
        info!(
            "  [{}] worst error {:.5} (step {:.5})",
            i,
            worst,
            (d.max - d.min) / (config.num_levels - 1) as f64
        );
    }

    Ok(())
}
