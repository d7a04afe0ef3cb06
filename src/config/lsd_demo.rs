use crate::detector::LsdParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct LsdDemoConfig {
    /// Grayscale image to process (`.pgm` goes through the built-in codec).
    pub input: PathBuf,
    #[serde(default)]
    pub params: LsdParams,
    pub output: LsdDemoOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct LsdDemoOutputConfig {
    pub segments_json: PathBuf,
    /// Optional PNG of the supporting regions.
    #[serde(default)]
    pub regions_image: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<LsdDemoConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn parse_config(data: &str) -> Result<LsdDemoConfig, serde_json::Error> {
    serde_json::from_str(data)
}
