// Quantized archive reader

use crate::core::codec::Quantizer;
use crate::core::compression::unbundle;
use crate::core::error::{QuantError, Result};
use crate::core::format::{Descriptor, QuantizedSeries};
use crate::core::table::{parse_data, parse_metadata};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A fully loaded archive. Every table row has been parsed and checked by the
/// time `open` returns.
pub struct ArchiveReader {
    path: PathBuf,
    quantizer: Quantizer,
    batch: Vec<QuantizedSeries>,
}

impl ArchiveReader {
    pub fn open<P: AsRef<Path>>(path: P, num_levels: u32) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let quantizer = Quantizer::new(num_levels)?;

        let bytes = fs::read(&path)?;
        debug!(path = %path.display(), bytes = bytes.len(), "archive loaded");

        let tables = unbundle(bytes)?;
        let descriptors = parse_metadata(&tables.metadata)?;
        let batch = parse_data(&tables.data, descriptors, num_levels)?;

        info!(path = %path.display(), series = batch.len(), "quantized archive read");

        Ok(Self {
            path,
            quantizer,
            batch,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn num_levels(&self) -> u32 {
        self.quantizer.num_levels()
    }

    pub fn len(&self) -> usize {
        self.batch.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &Descriptor> + '_ {
        self.batch.iter().map(|s| &s.descriptor)
    }

    pub fn descriptor(&self, index: usize) -> Option<&Descriptor> {
        self.batch.get(index).map(|s| &s.descriptor)
    }

    pub fn series(&self, index: usize) -> Option<&QuantizedSeries> {
        self.batch.get(index)
    }

    pub fn batch(&self) -> &[QuantizedSeries] {
        &self.batch
    }

    pub fn into_batch(self) -> Vec<QuantizedSeries> {
        self.batch
    }

    pub fn reconstruct(&self, index: usize) -> Result<Vec<f64>> {
        let series = self.batch.get(index).ok_or_else(|| {
            QuantError::invalid_input(format!(
                "series index {} out of range ({} series)",
                index,
                self.batch.len()
            ))
        })?;
        self.quantizer.decode_series(series)
    }

    pub fn reconstruct_all(&self) -> Result<Vec<Vec<f64>>> {
        self.batch
            .iter()
            .map(|s| self.quantizer.decode_series(s))
            .collect()
    }
}

/// Reads the batch stored at `source`, in file order.
pub fn read_archive<P: AsRef<Path>>(source: P, num_levels: u32) -> Result<Vec<QuantizedSeries>> {
    Ok(ArchiveReader::open(source, num_levels)?.into_batch())
}

/// One-call read path: load `source` and reconstruct every series.
pub fn read_quantized<P: AsRef<Path>>(source: P, num_levels: u32) -> Result<Vec<Vec<f64>>> {
    ArchiveReader::open(source, num_levels)?.reconstruct_all()
}
