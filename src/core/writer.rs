// Archive writer: tables -> zip -> atomic file replace

use crate::core::codec::{Quantizer, Sample};
use crate::core::compression::{bundle, Tables};
use crate::core::error::{QuantError, Result};
use crate::core::format::QuantizedSeries;
use crate::core::table::{render_data, render_metadata};
use crate::models::config_model::QuantConfig;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

pub struct ArchiveWriter {
    quantizer: Quantizer,
    compression_level: Option<i64>,
}

impl ArchiveWriter {
    pub fn new(config: &QuantConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            quantizer: Quantizer::new(config.num_levels)?,
            compression_level: config.compression_level,
        })
    }

    pub fn num_levels(&self) -> u32 {
        self.quantizer.num_levels()
    }

    /// Writes an already-quantized batch to `dest`.
    ///
    /// Either the complete archive ends up at `dest` or nothing changes there.
    pub fn write<P: AsRef<Path>>(&self, batch: &[QuantizedSeries], dest: P) -> Result<()> {
        let dest = dest.as_ref();
        let num_levels = self.num_levels();

        for (i, series) in batch.iter().enumerate() {
            series.validate(num_levels).map_err(|e| match e {
                QuantError::InvalidInput(msg) => {
                    QuantError::InvalidInput(format!("series {}: {}", i, msg))
                }
                other => other,
            })?;
        }

        let tables = Tables {
            metadata: render_metadata(batch),
            data: render_data(batch),
        };
        let bytes = bundle(&tables, self.compression_level)?;

        persist_atomically(&bytes, dest)?;

        info!(
            path = %dest.display(),
            series = batch.len(),
            bytes = bytes.len(),
            "quantized archive written"
        );
        Ok(())
    }

    /// Quantizes `series_list` and writes it to `output_dir/file_name`,
    /// creating `output_dir` when missing. Returns the archive path.
    pub fn write_series<S, T, P>(
        &self,
        series_list: &[S],
        output_dir: P,
        file_name: &str,
    ) -> Result<PathBuf>
    where
        S: AsRef<[T]>,
        T: Sample,
        P: AsRef<Path>,
    {
        let batch = self.quantizer.encode_all(series_list)?;

        let output_dir = output_dir.as_ref();
        fs::create_dir_all(output_dir)?;
        let dest = output_dir.join(file_name);

        self.write(&batch, &dest)?;
        Ok(dest)
    }
}

fn temp_path_for(dest: &Path) -> PathBuf {
    let dir = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "archive".to_string());

    dir.join(format!(".{}.{}.tmp", name, Uuid::new_v4()))
}

// Sibling temp file + rename keeps the replace on one filesystem
fn persist_atomically(bytes: &[u8], dest: &Path) -> Result<()> {
    let tmp_path = temp_path_for(dest);

    let result = (|| -> std::io::Result<()> {
        let mut file = File::create(&tmp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp_path, dest)
    })();

    if let Err(e) = result {
        if let Err(cleanup) = fs::remove_file(&tmp_path) {
            if cleanup.kind() != std::io::ErrorKind::NotFound {
                warn!(
                    path = %tmp_path.display(),
                    error = %cleanup,
                    "failed to remove temp archive"
                );
            }
        }
        return Err(e.into());
    }

    debug!(tmp = %tmp_path.display(), dest = %dest.display(), "archive renamed into place");
    Ok(())
}

pub fn write_archive<P: AsRef<Path>>(batch: &[QuantizedSeries], dest: P) -> Result<()> {
    ArchiveWriter::new(&QuantConfig::default())?.write(batch, dest)
}

/// One-call write path: quantize with `num_levels` and archive to
/// `output_dir/file_name`.
pub fn write_quantized<S, T, P>(
    series_list: &[S],
    output_dir: P,
    file_name: &str,
    num_levels: u32,
) -> Result<PathBuf>
where
    S: AsRef<[T]>,
    T: Sample,
    P: AsRef<Path>,
{
    ArchiveWriter::new(&QuantConfig::with_num_levels(num_levels))?.write_series(
        series_list,
        output_dir,
        file_name,
    )
}
