// Plotune quantized archive
// Main library entry point

pub mod core;
pub mod models;
pub mod utils;

// Re-export main types
pub use crate::core::codec::{decode, encode, Quantizer, Sample};
pub use crate::core::error::{QuantError, Result};
pub use crate::core::format::{format_significant, Descriptor, QuantizedSeries};
pub use crate::core::reader::{read_archive, read_quantized, ArchiveReader};
pub use crate::core::writer::{write_archive, write_quantized, ArchiveWriter};
pub use models::config_model::QuantConfig;
pub use utils::conf_helper::load_config;
