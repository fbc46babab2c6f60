use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::types::RendererKind;

/// File name searched for by [`Config::load_or_default`].
pub const CONFIG_FILE: &str = ".rankviz.toml";

/// Top-level configuration from `.rankviz.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub chart: ChartConfig,
}

/// Where reports live and how the rankings section is recognized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
    #[serde(default = "default_file_extension")]
    pub file_extension: String,
    #[serde(default = "default_section_header")]
    pub section_header: String,
    #[serde(default = "default_separator_min_len")]
    pub separator_min_len: usize,
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_file_prefix() -> String {
    "experiment_results_".to_string()
}

fn default_file_extension() -> String {
    ".txt".to_string()
}

fn default_section_header() -> String {
    "Classifier Rankings by Accuracy:".to_string()
}

fn default_separator_min_len() -> usize {
    10
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
            file_prefix: default_file_prefix(),
            file_extension: default_file_extension(),
            section_header: default_section_header(),
            separator_min_len: default_separator_min_len(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub renderer: RendererKind,
    /// Percentage points represented by one block in the text chart.
    #[serde(default = "default_bar_scale")]
    pub bar_scale: f64,
}

fn default_bar_scale() -> f64 {
    2.0
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            renderer: RendererKind::default(),
            bar_scale: default_bar_scale(),
        }
    }
}

/// Pixel sizes of the two PNG charts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_comparison_width")]
    pub comparison_width: u32,
    #[serde(default = "default_comparison_height")]
    pub comparison_height: u32,
    #[serde(default = "default_trends_width")]
    pub trends_width: u32,
    #[serde(default = "default_trends_height")]
    pub trends_height: u32,
}

fn default_comparison_width() -> u32 {
    1600
}
fn default_comparison_height() -> u32 {
    1000
}
fn default_trends_width() -> u32 {
    1200
}
fn default_trends_height() -> u32 {
    720
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            comparison_width: default_comparison_width(),
            comparison_height: default_comparison_height(),
            trends_width: default_trends_width(),
            trends_height: default_trends_height(),
        }
    }
}

impl Config {
    /// Load configuration from a `.rankviz.toml` file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let config: Config = toml::from_str(&content).with_context(|| {
            format!(
                "failed to parse '{}'. Run `rankviz init` to create a valid config file",
                path.display()
            )
        })?;
        Ok(config)
    }

    /// Load from `.rankviz.toml` in the given directory or any ancestor, or return defaults.
    pub fn load_or_default(dir: &Path) -> Self {
        let start = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
        let mut current = start.as_path();
        loop {
            let config_path = current.join(CONFIG_FILE);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => config,
                    Err(e) => {
                        eprintln!(
                            "Warning: failed to load config from '{}': {e:#}. Using defaults.",
                            config_path.display()
                        );
                        Self::default()
                    }
                };
            }
            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }
        Self::default()
    }

    /// Generate default TOML content for `rankviz init`.
    pub fn default_toml() -> String {
        r#"# rankviz - classifier ranking visualization

[input]
# Directory holding experiment reports, relative to the working directory
results_dir = "results"
# Report files are <file_prefix><timestamp><file_extension>; the
# lexicographically greatest name is treated as the latest
file_prefix = "experiment_results_"
file_extension = ".txt"
# The rankings section starts at this line and ends at a run of '='
section_header = "Classifier Rankings by Accuracy:"
separator_min_len = 10

[render]
# "auto", "chart" or "text". Charts need a build with the `chart` feature.
renderer = "auto"
# Percentage points per block in the text chart
bar_scale = 2.0

[chart]
comparison_width = 1600
comparison_height = 1000
trends_width = 1200
trends_height = 720
"#
        .to_string()
    }
}
