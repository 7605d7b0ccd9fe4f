use crate::core::error::{C3dError, Result};
use crate::models::inspect_model::InspectConfig;
use std::fs;
use std::path::Path;
use tracing::{info, Level};

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<InspectConfig> {
    let path = path.as_ref();

    let data = fs::read_to_string(path)
        .map_err(|e| C3dError::Config(format!("File read Error: {e} {}", path.display())))?;

    let config = parse_config(&data)?;

    info!("Config loaded from {}", path.display());
    Ok(config)
}

pub fn parse_config(data: &str) -> Result<InspectConfig> {
    let config: InspectConfig = serde_json::from_str(data)
        .map_err(|e| C3dError::Config(format!("JSON Parse Error: {e}")))?;

    // Reject bad levels up front instead of at subscriber setup
    log_level(&config)?;
    Ok(config)
}

pub fn log_level(config: &InspectConfig) -> Result<Level> {
    config
        .log_level
        .parse::<Level>()
        .map_err(|_| C3dError::Config(format!("Unknown log level: {}", config.log_level)))
}
