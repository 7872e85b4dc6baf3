// Text tables stored inside the archive
//
// metadata.csv: header `length,min,max`, one row per series
// quantized.csv: no header, one row of comma-separated levels per series

use crate::core::constants::*;
use crate::core::error::{QuantError, Result};
use crate::core::format::{format_significant, Descriptor, QuantizedSeries};

pub fn render_metadata(batch: &[QuantizedSeries]) -> String {
    let mut out = String::with_capacity(METADATA_HEADER.len() + batch.len() * 24);
    out.push_str(METADATA_HEADER);
    out.push_str(ROW_TERMINATOR);

    for series in batch {
        let d = &series.descriptor;
        out.push_str(&d.length.to_string());
        out.push(FIELD_SEPARATOR);
        out.push_str(&format_significant(d.min, SIGNIFICANT_DIGITS));
        out.push(FIELD_SEPARATOR);
        out.push_str(&format_significant(d.max, SIGNIFICANT_DIGITS));
        out.push_str(ROW_TERMINATOR);
    }
    out
}

pub fn render_data(batch: &[QuantizedSeries]) -> String {
    let mut out = String::new();
    for series in batch {
        for (i, level) in series.levels.iter().enumerate() {
            if i > 0 {
                out.push(FIELD_SEPARATOR);
            }
            out.push_str(&level.to_string());
        }
        out.push_str(ROW_TERMINATOR);
    }
    out
}

struct Columns {
    length: usize,
    min: usize,
    max: usize,
    count: usize,
}

fn locate_columns(header: &str) -> Result<Columns> {
    let names: Vec<&str> = header.split(FIELD_SEPARATOR).map(str::trim).collect();
    let find = |name: &str| {
        names
            .iter()
            .position(|n| *n == name)
            .ok_or_else(|| QuantError::corrupt(format!("metadata header lacks '{}' column", name)))
    };

    Ok(Columns {
        length: find(COL_LENGTH)?,
        min: find(COL_MIN)?,
        max: find(COL_MAX)?,
        count: names.len(),
    })
}

/// Parses the metadata table into descriptors, in file order.
///
/// Columns are located through the header, so their order does not matter.
/// Blank lines are skipped.
pub fn parse_metadata(text: &str) -> Result<Vec<Descriptor>> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());

    let header = lines
        .next()
        .ok_or_else(|| QuantError::corrupt("metadata table has no header"))?;
    let cols = locate_columns(header)?;

    let mut descriptors = Vec::new();
    for (row, line) in lines.enumerate() {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();
        if fields.len() != cols.count {
            return Err(QuantError::corrupt(format!(
                "metadata row {}: expected {} columns, got {}",
                row,
                cols.count,
                fields.len()
            )));
        }

        let length: usize = fields[cols.length].parse().map_err(|_| {
            QuantError::corrupt(format!(
                "metadata row {}: bad length '{}'",
                row, fields[cols.length]
            ))
        })?;
        let min = parse_bound(fields[cols.min], row, COL_MIN)?;
        let max = parse_bound(fields[cols.max], row, COL_MAX)?;

        let descriptor = Descriptor { length, min, max };
        descriptor
            .validate()
            .map_err(|e| QuantError::corrupt(format!("metadata row {}: {}", row, e)))?;
        descriptors.push(descriptor);
    }

    Ok(descriptors)
}

fn parse_bound(field: &str, row: usize, name: &str) -> Result<f64> {
    field
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            QuantError::corrupt(format!("metadata row {}: bad {} '{}'", row, name, field))
        })
}

/// Pairs data rows with `descriptors` by position.
///
/// Only the first `length` fields of a row are read; anything after them is
/// left unparsed.
pub fn parse_data(
    text: &str,
    descriptors: Vec<Descriptor>,
    num_levels: u32,
) -> Result<Vec<QuantizedSeries>> {
    let rows: Vec<&str> = text.lines().collect();
    if rows.len() != descriptors.len() {
        return Err(QuantError::corrupt(format!(
            "metadata has {} rows but data has {}",
            descriptors.len(),
            rows.len()
        )));
    }

    descriptors
        .into_iter()
        .zip(rows)
        .enumerate()
        .map(|(row, (descriptor, line))| {
            let levels = parse_levels(line, descriptor.length, num_levels)
                .map_err(|msg| QuantError::corrupt(format!("data row {}: {}", row, msg)))?;
            Ok(QuantizedSeries::new(descriptor, levels))
        })
        .collect()
}

fn parse_levels(line: &str, length: usize, num_levels: u32) -> std::result::Result<Vec<u32>, String> {
    if length == 0 {
        return Ok(Vec::new());
    }

    // `length` comes from the archive; a row holds at most len/2 + 1 fields
    let mut levels = Vec::with_capacity(length.min(line.len() / 2 + 1));
    for field in line.split(FIELD_SEPARATOR).take(length) {
        let field = field.trim();
        let level: u32 = field
            .parse()
            .map_err(|_| format!("non-numeric level '{}'", field))?;
        if level >= num_levels {
            return Err(format!("level {} outside [0, {}]", level, num_levels - 1));
        }
        levels.push(level);
    }

    if levels.len() < length {
        return Err(format!(
            "expected {} levels, found {}",
            length,
            levels.len()
        ));
    }
    Ok(levels)
}
