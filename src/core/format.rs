// Data structures for quantized archives

use crate::core::error::{QuantError, Result};
use serde::{Deserialize, Serialize};

/// Per-series metadata needed to invert quantization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Descriptor {
    pub length: usize,
    pub min: f64,
    pub max: f64,
}

impl Descriptor {
    pub fn new(length: usize, min: f64, max: f64) -> Result<Self> {
        let descriptor = Self { length, min, max };
        descriptor.validate()?;
        Ok(descriptor)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(QuantError::invalid_input(format!(
                "non-finite bounds: min={}, max={}",
                self.min, self.max
            )));
        }
        if self.max < self.min {
            return Err(QuantError::invalid_input(format!(
                "max {} is below min {}",
                self.max, self.min
            )));
        }
        Ok(())
    }

    /// Range used for rescaling. Flat series fall back to 1.0.
    pub fn scale(&self) -> f64 {
        let range = self.max - self.min;
        if range != 0.0 {
            range
        } else {
            1.0
        }
    }
}

/// One quantized series: descriptor plus its level sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantizedSeries {
    pub descriptor: Descriptor,
    pub levels: Vec<u32>,
}

impl QuantizedSeries {
    pub fn new(descriptor: Descriptor, levels: Vec<u32>) -> Self {
        Self { descriptor, levels }
    }

    pub fn len(&self) -> usize {
        self.descriptor.length
    }

    pub fn is_empty(&self) -> bool {
        self.descriptor.length == 0
    }

    /// Checks the pairing before the series is written out.
    pub fn validate(&self, num_levels: u32) -> Result<()> {
        self.descriptor.validate()?;
        if self.levels.len() != self.descriptor.length {
            return Err(QuantError::invalid_input(format!(
                "descriptor declares {} samples but {} levels were given",
                self.descriptor.length,
                self.levels.len()
            )));
        }
        if let Some(level) = self.levels.iter().find(|&&l| l >= num_levels) {
            return Err(QuantError::invalid_input(format!(
                "level {} outside [0, {}]",
                level,
                num_levels - 1
            )));
        }
        Ok(())
    }
}

/// Formats `value` like printf `%.{digits}g`.
///
/// Fixed notation is used while the decimal exponent lies in
/// `[-4, digits)`, scientific (`1.5e+07`) otherwise. Trailing zeros in the
/// fraction are always stripped.
pub fn format_significant(value: f64, digits: usize) -> String {
    let digits = digits.max(1);
    let sci = format!("{:.*e}", digits - 1, value);

    // inf / NaN have no exponent part
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = match exp.parse() {
        Ok(e) => e,
        Err(_) => return sci,
    };

    if exp < -4 || exp >= digits as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exp.abs())
    } else {
        let decimals = (digits as i32 - 1 - exp).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
