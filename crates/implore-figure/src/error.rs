//! Error types for implore-figure
//!
//! Provides error handling for:
//! - Grid layout geometry
//! - Colorbar attachment
//! - Rendering and export
//! - Configuration loading

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for figure composition
#[derive(Error, Debug)]
pub enum FigureError {
    /// Invalid grid geometry (ratios, gaps, cell indices)
    #[error("Invalid layout: {0}")]
    Layout(String),

    /// Colorbar requested for something without a color scale
    #[error("Artist {index} on axes {axes} is not mappable: {reason}")]
    NotMappable {
        axes: usize,
        index: usize,
        reason: String,
    },

    /// Trigonometric selector outside sin/cos/tan
    #[error("Unknown trigonometric function: '{0}' (expected sin, cos or tan)")]
    UnknownTrigFunction(String),

    /// Noise distribution could not be built
    #[error("Invalid noise distribution: {0}")]
    Noise(String),

    /// Drawing backend failure
    #[error("Rendering failed: {0}")]
    Render(String),

    /// Export errors
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FigureError {
    /// Wrap any backend error (plotters errors are generic over the backend)
    pub fn render(err: impl std::fmt::Display) -> Self {
        FigureError::Render(err.to_string())
    }
}

/// Errors related to export
#[derive(Error, Debug)]
pub enum ExportError {
    /// Unsupported format name or extension
    #[error("Unsupported export format: {format}")]
    UnsupportedFormat { format: String },

    /// Invalid output path
    #[error("Invalid output path: {path}")]
    InvalidPath { path: PathBuf },

    /// Invalid dimensions
    #[error("Invalid dimensions: {width}x{height} (must be positive and within limits)")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Value is out of valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// TOML parse failure
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization failure
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON parse/serialize failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config file with an extension we cannot read
    #[error("Unsupported config file: {path}")]
    UnsupportedFile { path: PathBuf },
}

/// Result type alias for figure operations
pub type FigureResult<T> = Result<T, FigureError>;

/// Result type alias for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Validation utilities
pub mod validation {
    use super::*;

    const MAX_DIMENSION: u32 = 16384;
    const MIN_DIMENSION: u32 = 1;

    /// Validate export dimensions in pixels
    pub fn validate_dimensions(width: u32, height: u32) -> ExportResult<()> {
        if width < MIN_DIMENSION
            || height < MIN_DIMENSION
            || width > MAX_DIMENSION
            || height > MAX_DIMENSION
        {
            return Err(ExportError::InvalidDimensions { width, height });
        }
        Ok(())
    }

    /// Validate a relative size (grid ratio)
    pub fn validate_ratio(name: &str, value: f64) -> FigureResult<()> {
        if !value.is_finite() || value <= 0.0 {
            return Err(FigureError::Layout(format!(
                "{name} must be positive and finite, got {value}"
            )));
        }
        Ok(())
    }

    /// Validate a gap fraction (hspace/wspace)
    pub fn validate_gap(name: &str, value: f64) -> FigureResult<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(FigureError::Layout(format!(
                "{name} must be non-negative and finite, got {value}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_error_display() {
        let err = FigureError::Layout("bad ratio".to_string());
        assert!(err.to_string().contains("bad ratio"));
    }

    #[test]
    fn test_unknown_trig_display() {
        let err = FigureError::UnknownTrigFunction("sec".to_string());
        assert!(err.to_string().contains("'sec'"));
    }

    #[test]
    fn test_export_error_display() {
        let err = ExportError::InvalidDimensions {
            width: 0,
            height: 100,
        };
        assert!(err.to_string().contains("0x100"));
    }

    #[test]
    fn test_validate_dimensions() {
        assert!(validation::validate_dimensions(795, 600).is_ok());
        assert!(validation::validate_dimensions(0, 100).is_err());
        assert!(validation::validate_dimensions(20000, 1000).is_err());
    }

    #[test]
    fn test_validate_ratio() {
        assert!(validation::validate_ratio("ratio", 0.8).is_ok());
        assert!(validation::validate_ratio("ratio", 0.0).is_err());
        assert!(validation::validate_ratio("ratio", -1.0).is_err());
        assert!(validation::validate_ratio("ratio", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_gap() {
        assert!(validation::validate_gap("wspace", 0.0).is_ok());
        assert!(validation::validate_gap("wspace", -0.1).is_err());
    }
}
