use crate::core::error::Result;
use crate::models::config_model::QuantConfig;
use std::fs;
use std::path::Path;
use tracing::info;

/// Loads and validates a JSON config file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<QuantConfig> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)?;
    let config = QuantConfig::from_json_str(&data)?;

    info!(
        path = %path.display(),
        num_levels = config.num_levels,
        "quantization config loaded"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::QuantError;

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quant.json");
        fs::write(&path, r#"{"num_levels": 1024}"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.num_levels, 1024);
        assert_eq!(config.compression_level, None);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(dir.path().join("absent.json"));
        assert!(matches!(result, Err(QuantError::Io(_))));
    }
}
