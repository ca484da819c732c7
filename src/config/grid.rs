use crate::pipeline::AdaptiveGridParams;
use crate::stats::CellSelection;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Both,
}

impl OutputFormat {
    pub fn includes_text(self) -> bool {
        matches!(self, OutputFormat::Text | OutputFormat::Both)
    }

    pub fn includes_json(self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Both)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    pub json_out: Option<PathBuf>,
}

/// Caller-supplied boundaries; any value is accepted and normalized.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExplicitLines {
    pub horizontal: Vec<f64>,
    pub vertical: Vec<f64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct CategoryConfig {
    pub names: Vec<String>,
    pub selections: Vec<CellSelection>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GridToolConfig {
    #[serde(rename = "input")]
    pub input_path: PathBuf,
    /// Explicit lines take precedence over `adaptive`.
    #[serde(default)]
    pub lines: Option<ExplicitLines>,
    #[serde(default)]
    pub adaptive: Option<AdaptiveGridParams>,
    #[serde(default)]
    pub categories: Option<CategoryConfig>,
    #[serde(default)]
    pub output: OutputConfig,
}

pub fn load_config(path: &Path) -> Result<GridToolConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&contents).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(contents: &str) -> Result<GridToolConfig, serde_json::Error> {
    serde_json::from_str(contents)
}

/// Load the config named by the first command-line argument.
pub fn parse_cli(program: &str) -> Result<GridToolConfig, String> {
    let path = env::args()
        .nth(1)
        .ok_or_else(|| format!("Usage: {program} <config.json>"))?;
    load_config(Path::new(&path))
}
