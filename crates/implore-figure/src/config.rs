//! Configuration for implore-figure
//!
//! Every geometry constant of the composite figure, the noise seed and the
//! output options. Files are TOML or JSON, chosen by extension.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::colorbar::ColorbarStyle;
use crate::error::{validation, ConfigError, FigureResult};
use crate::export::{ExportConfig, ExportFormat, DEFAULT_DPI};

/// Figure-wide configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    /// Noise seed; `None` seeds from entropy
    pub seed: Option<u64>,
    /// Canvas size
    pub canvas: CanvasConfig,
    /// Grid partition
    pub layout: LayoutConfig,
    /// Colorbar strip geometry
    pub colorbar: ColorbarStyle,
    /// Export settings
    pub output: OutputConfig,
}

/// Physical canvas size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width_inches: f64,
    pub height_inches: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width_inches: 5.3,
            height_inches: 4.0,
        }
    }
}

/// Two rows: two panels on top, three below
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Relative heights of the top and bottom rows
    pub row_ratios: Vec<f64>,
    pub hspace: f64,
    /// Relative widths of the heatmap and scatter cells
    pub top_ratios: Vec<f64>,
    pub top_wspace: f64,
    /// Relative widths of the sin, cos and tan cells
    pub bottom_ratios: Vec<f64>,
    pub bottom_wspace: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            row_ratios: vec![1.0, 0.8],
            hspace: 0.55,
            top_ratios: vec![1.0, 1.2],
            top_wspace: 0.6,
            bottom_ratios: vec![1.0, 1.0, 1.0],
            bottom_wspace: 0.65,
        }
    }
}

/// Export settings; no path means nothing is written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: Option<PathBuf>,
    pub format: ExportFormat,
    pub dpi: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: None,
            format: ExportFormat::Svg,
            dpi: DEFAULT_DPI,
        }
    }
}

impl OutputConfig {
    pub fn export_config(&self) -> ExportConfig {
        ExportConfig {
            format: self.format,
            output_path: self.path.clone(),
            dpi: self.dpi,
        }
    }
}

impl FigureConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a `.toml` or `.json` file and validate it
    pub fn load(path: &Path) -> FigureResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml(&text)?,
            Some("json") => Self::from_json(&text)?,
            _ => {
                return Err(ConfigError::UnsupportedFile {
                    path: path.to_path_buf(),
                }
                .into())
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> FigureResult<()> {
        let positive = |name: &str, v: f64| -> Result<(), ConfigError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::OutOfRange(format!(
                    "{name} must be positive, got {v}"
                )))
            }
        };

        positive("canvas.width_inches", self.canvas.width_inches)?;
        positive("canvas.height_inches", self.canvas.height_inches)?;
        positive("colorbar.size_inches", self.colorbar.size_inches)?;
        if !(self.colorbar.pad_inches.is_finite() && self.colorbar.pad_inches >= 0.0) {
            return Err(ConfigError::OutOfRange(format!(
                "colorbar.pad_inches must be non-negative, got {}",
                self.colorbar.pad_inches
            ))
            .into());
        }

        for (name, ratios, expected) in [
            ("layout.row_ratios", &self.layout.row_ratios, 2),
            ("layout.top_ratios", &self.layout.top_ratios, 2),
            ("layout.bottom_ratios", &self.layout.bottom_ratios, 3),
        ] {
            if ratios.len() != expected {
                return Err(ConfigError::OutOfRange(format!(
                    "{name} needs {expected} entries, got {}",
                    ratios.len()
                ))
                .into());
            }
            for &r in ratios {
                validation::validate_ratio(name, r)?;
            }
        }
        validation::validate_gap("layout.hspace", self.layout.hspace)?;
        validation::validate_gap("layout.top_wspace", self.layout.top_wspace)?;
        validation::validate_gap("layout.bottom_wspace", self.layout.bottom_wspace)?;

        if self.output.dpi == 0 {
            return Err(ConfigError::OutOfRange("output.dpi must be positive".to_string()).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = FigureConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.layout.row_ratios, vec![1.0, 0.8]);
        assert_eq!(config.output.dpi, 150);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = FigureConfig::default();
        config.seed = Some(7);
        config.output.format = ExportFormat::Png;
        let toml_str = config.to_toml().unwrap();
        let parsed = FigureConfig::from_toml(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = FigureConfig::default();
        let json = config.to_json().unwrap();
        let parsed = FigureConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = FigureConfig::from_toml("seed = 3\n[layout]\nhspace = 0.3\n").unwrap();
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.layout.hspace, 0.3);
        assert_eq!(config.layout.top_wspace, 0.6);
        assert_eq!(config.canvas, CanvasConfig::default());
    }

    #[test]
    fn test_invalid_values() {
        let mut config = FigureConfig::default();
        config.canvas.width_inches = 0.0;
        assert!(config.validate().is_err());

        let mut config = FigureConfig::default();
        config.layout.bottom_ratios = vec![1.0, 1.0];
        assert!(config.validate().is_err());

        let mut config = FigureConfig::default();
        config.layout.hspace = -1.0;
        assert!(config.validate().is_err());

        let mut config = FigureConfig::default();
        config.output.dpi = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_export_config_from_output() {
        let mut config = FigureConfig::default();
        config.output.path = Some(PathBuf::from("fig.svg"));
        let export = config.output.export_config();
        assert_eq!(export.output_path, Some(PathBuf::from("fig.svg")));
        assert_eq!(export.format, ExportFormat::Svg);
    }
}
