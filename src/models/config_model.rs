use crate::core::codec::check_num_levels;
use crate::core::compression::check_compression_level;
use crate::core::constants::DEFAULT_NUM_LEVELS;
use crate::core::error::Result;
use serde::{Deserialize, Serialize};

/// Settings shared by the write and read paths.
///
/// `num_levels` is not stored in the archive, so both sides must agree on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantConfig {
    pub num_levels: u32,
    pub compression_level: Option<i64>,
}

impl Default for QuantConfig {
    fn default() -> Self {
        Self {
            num_levels: DEFAULT_NUM_LEVELS,
            compression_level: None,
        }
    }
}

impl QuantConfig {
    pub fn with_num_levels(num_levels: u32) -> Self {
        Self {
            num_levels,
            ..Self::default()
        }
    }

    pub fn from_json_str(data: &str) -> Result<Self> {
        let config: QuantConfig = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_num_levels(self.num_levels)?;
        check_compression_level(self.compression_level)
    }
}
