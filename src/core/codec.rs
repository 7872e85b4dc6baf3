// Linear per-series quantization codec

use crate::core::constants::{DEFAULT_NUM_LEVELS, MIN_NUM_LEVELS};
use crate::core::error::{QuantError, Result};
use crate::core::format::{Descriptor, QuantizedSeries};

/// Numeric sample types accepted by the encoder.
///
/// Wide integers convert with `as`, so values past 2^53 lose precision.
pub trait Sample: Copy {
    fn to_f64(self) -> f64;
}

macro_rules! impl_sample {
    ($($t:ty),*) => {
        $(
            impl Sample for $t {
                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_sample!(f32, f64, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Quantizes float series into `num_levels` evenly spaced buckets between
/// each series' own min and max.
///
/// Levels are rounded half-to-even, so a sample sitting exactly between two
/// buckets goes to the even one (`[0.0, 5.0, 10.0]` at 256 levels encodes to
/// `[0, 128, 255]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantizer {
    num_levels: u32,
}

impl Quantizer {
    pub fn new(num_levels: u32) -> Result<Self> {
        check_num_levels(num_levels)?;
        Ok(Self { num_levels })
    }

    pub fn num_levels(&self) -> u32 {
        self.num_levels
    }

    fn max_level(&self) -> f64 {
        (self.num_levels - 1) as f64
    }

    pub fn encode<T>(&self, series: &[T]) -> Result<QuantizedSeries>
    where
        T: Sample,
    {
        if series.is_empty() {
            return Err(QuantError::invalid_input("cannot quantize an empty series"));
        }

        let mut min_val = f64::INFINITY;
        let mut max_val = f64::NEG_INFINITY;
        for (i, &x) in series.iter().enumerate() {
            let x = x.to_f64();
            if !x.is_finite() {
                return Err(QuantError::invalid_input(format!(
                    "non-finite sample {} at index {}",
                    x, i
                )));
            }
            min_val = min_val.min(x);
            max_val = max_val.max(x);
        }

        let descriptor = Descriptor {
            length: series.len(),
            min: min_val,
            max: max_val,
        };
        let scale = descriptor.scale();
        let max_level = self.max_level();

        let levels = series
            .iter()
            .map(|&x| {
                let x = x.to_f64();
                let level = ((x - min_val) / scale * max_level).round_ties_even();
                // Float error at the top edge must not escape the range
                level.clamp(0.0, max_level) as u32
            })
            .collect();

        Ok(QuantizedSeries::new(descriptor, levels))
    }

    /// Encodes every series in order, stopping at the first failure.
    pub fn encode_all<S, T>(&self, series_list: &[S]) -> Result<Vec<QuantizedSeries>>
    where
        S: AsRef<[T]>,
        T: Sample,
    {
        series_list
            .iter()
            .enumerate()
            .map(|(i, s)| {
                self.encode(s.as_ref()).map_err(|e| match e {
                    QuantError::InvalidInput(msg) => {
                        QuantError::InvalidInput(format!("series {}: {}", i, msg))
                    }
                    other => other,
                })
            })
            .collect()
    }

    /// Reconstructs `descriptor.length` samples. Levels past that count are
    /// ignored.
    pub fn decode(&self, descriptor: &Descriptor, levels: &[u32]) -> Result<Vec<f64>> {
        if levels.len() < descriptor.length {
            return Err(QuantError::invalid_input(format!(
                "descriptor declares {} samples but only {} levels were given",
                descriptor.length,
                levels.len()
            )));
        }

        let scale = descriptor.scale();
        let max_level = self.max_level();

        levels[..descriptor.length]
            .iter()
            .map(|&level| {
                if level >= self.num_levels {
                    return Err(QuantError::invalid_input(format!(
                        "level {} outside [0, {}]",
                        level,
                        self.num_levels - 1
                    )));
                }
                Ok(descriptor.min + (level as f64 / max_level) * scale)
            })
            .collect()
    }

    pub fn decode_series(&self, series: &QuantizedSeries) -> Result<Vec<f64>> {
        self.decode(&series.descriptor, &series.levels)
    }
}

impl Default for Quantizer {
    fn default() -> Self {
        Self {
            num_levels: DEFAULT_NUM_LEVELS,
        }
    }
}

pub(crate) fn check_num_levels(num_levels: u32) -> Result<()> {
    if num_levels < MIN_NUM_LEVELS {
        return Err(QuantError::InvalidConfiguration(format!(
            "num_levels must be at least {}, got {}",
            MIN_NUM_LEVELS, num_levels
        )));
    }
    Ok(())
}

pub fn encode<T>(series: &[T], num_levels: u32) -> Result<(Descriptor, Vec<u32>)>
where
    T: Sample,
{
    let q = Quantizer::new(num_levels)?.encode(series)?;
    Ok((q.descriptor, q.levels))
}

pub fn decode(descriptor: &Descriptor, levels: &[u32], num_levels: u32) -> Result<Vec<f64>> {
    Quantizer::new(num_levels)?.decode(descriptor, levels)
}
