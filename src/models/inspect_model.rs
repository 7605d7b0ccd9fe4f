use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_log_level() -> String {
    "info".to_string()
}

/// Settings for inspecting one capture file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectConfig {
    pub input: PathBuf,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub dump_header_json: bool,
    /// Segments to report; empty reports all of them
    #[serde(default)]
    pub segments: Vec<String>,
}
