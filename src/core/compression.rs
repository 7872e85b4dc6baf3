// Zip bundling of the metadata and data tables

use crate::core::constants::{DATA_ENTRY, MAX_COMPRESSION_LEVEL, MAX_ENTRY_PREALLOC, METADATA_ENTRY};
use crate::core::error::{QuantError, Result};
use std::io::{Cursor, Read, Write};
use tracing::debug;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// The two text tables carried by an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tables {
    pub metadata: String,
    pub data: String,
}

pub fn check_compression_level(level: Option<i64>) -> Result<()> {
    match level {
        Some(l) if !(0..=MAX_COMPRESSION_LEVEL).contains(&l) => {
            Err(QuantError::InvalidConfiguration(format!(
                "compression_level must be within 0..={}, got {}",
                MAX_COMPRESSION_LEVEL, l
            )))
        }
        _ => Ok(()),
    }
}

/// Deflates both tables into an in-memory zip.
pub fn bundle(tables: &Tables, level: Option<i64>) -> Result<Vec<u8>> {
    check_compression_level(level)?;
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(level);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, body) in [(METADATA_ENTRY, &tables.metadata), (DATA_ENTRY, &tables.data)] {
        zip.start_file(name, options)?;
        zip.write_all(body.as_bytes())?;
        debug!(entry = name, raw_len = body.len(), "table bundled");
    }

    let bytes = zip.finish()?.into_inner();
    Ok(bytes)
}

/// Extracts both tables from zip bytes held in memory.
pub fn unbundle(bytes: Vec<u8>) -> Result<Tables> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(container_error)?;
    let metadata = read_entry(&mut archive, METADATA_ENTRY)?;
    let data = read_entry(&mut archive, DATA_ENTRY)?;
    Ok(Tables { metadata, data })
}

fn read_entry(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> Result<String> {
    let mut entry = archive.by_name(name).map_err(|e| match e {
        ZipError::FileNotFound => QuantError::corrupt(format!("missing entry '{}'", name)),
        other => container_error(other),
    })?;

    // Declared sizes are untrusted; read_to_end grows past the hint as needed
    let hint = entry.size().min(MAX_ENTRY_PREALLOC) as usize;
    let mut raw = Vec::with_capacity(hint);
    entry
        .read_to_end(&mut raw)
        .map_err(|e| QuantError::corrupt(format!("entry '{}' unreadable: {}", name, e)))?;

    String::from_utf8(raw)
        .map_err(|_| QuantError::corrupt(format!("entry '{}' is not UTF-8 text", name)))
}

// The bytes are already in memory, so any container failure is corruption
fn container_error(err: ZipError) -> QuantError {
    QuantError::corrupt(format!("bad zip container: {}", err))
}
