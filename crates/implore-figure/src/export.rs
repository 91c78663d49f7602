//! Figure export
//!
//! Supports exporting the composed figure to:
//! - SVG: scalable vector graphics (in memory or to a file)
//! - PNG: raster image (to a file; raw RGB in memory)
//!
//! Pixel dimensions are the figure size in inches times the dpi.

use std::path::{Path, PathBuf};

use plotters::prelude::{BitMapBackend, IntoDrawingArea, SVGBackend};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{validation, ExportError, FigureError, FigureResult};
use crate::figure::Figure;
use crate::render::{draw_figure, Theme};

/// Default export resolution
pub const DEFAULT_DPI: u32 = 150;

/// Export format for figures
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// SVG scalable vector graphics
    #[default]
    Svg,
    /// PNG raster image
    Png,
}

impl ExportFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Png => "png",
        }
    }

    /// Get MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "image/svg+xml",
            ExportFormat::Png => "image/png",
        }
    }

    /// Check if this format is raster (vs vector)
    pub fn is_raster(&self) -> bool {
        matches!(self, ExportFormat::Png)
    }

    /// Check if this format is vector
    pub fn is_vector(&self) -> bool {
        !self.is_raster()
    }

    /// Parse a format name such as `"svg"` or `"PNG"`
    pub fn from_name(name: &str) -> Result<Self, ExportError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(ExportFormat::Svg),
            "png" => Ok(ExportFormat::Png),
            _ => Err(ExportError::UnsupportedFormat {
                format: name.to_string(),
            }),
        }
    }

    /// Infer the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| ExportError::InvalidPath {
                path: path.to_path_buf(),
            })?;
        Self::from_name(ext)
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Export configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output format
    pub format: ExportFormat,

    /// Output path (None = keep the result in memory)
    pub output_path: Option<PathBuf>,

    /// Resolution; also scales fonts and line widths
    pub dpi: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::Svg,
            output_path: None,
            dpi: DEFAULT_DPI,
        }
    }
}

impl ExportConfig {
    /// Create config for SVG export
    pub fn svg() -> Self {
        Self::default()
    }

    /// Create config for PNG export
    pub fn png(dpi: u32) -> Self {
        Self {
            format: ExportFormat::Png,
            dpi,
            ..Default::default()
        }
    }

    /// Set output path
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }
}

/// What an export produced
#[derive(Clone, Debug, Serialize)]
pub struct ExportReport {
    pub format: ExportFormat,

    /// Written file, when a path was configured
    pub path: Option<PathBuf>,

    /// SVG document, when no path was configured
    #[serde(skip)]
    pub svg: Option<String>,

    /// Pixel dimensions
    pub dimensions: (u32, u32),

    pub bytes_written: u64,

    /// Creation timestamp (RFC 3339)
    pub created_at: String,

    pub software_version: String,
}

/// Canvas size in pixels at `dpi`
pub fn pixel_size(figure: &Figure, dpi: u32) -> FigureResult<(u32, u32)> {
    let to_px = |inches: f64| -> u32 {
        let v = (inches * f64::from(dpi)).round();
        if v.is_finite() && v > 0.0 {
            v.min(f64::from(u32::MAX)) as u32
        } else {
            0
        }
    };
    let (w, h) = (to_px(figure.size_inches.0), to_px(figure.size_inches.1));
    validation::validate_dimensions(w, h)?;
    Ok((w, h))
}

/// Render to an SVG document
pub fn render_svg(figure: &Figure, dpi: u32) -> FigureResult<String> {
    let size = pixel_size(figure, dpi)?;
    let mut svg = String::new();
    {
        let area = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        draw_figure(figure, &area, f64::from(dpi), &Theme::default())?;
        area.present().map_err(FigureError::render)?;
    }
    Ok(svg)
}

fn raster_theme() -> Theme {
    let theme = Theme::raster();
    if !theme.render_text {
        warn!("built without the `ttf` feature; raster output has no text");
    }
    theme
}

/// Render to a raw RGB buffer (`width * height * 3` bytes)
pub fn render_rgb(figure: &Figure, dpi: u32) -> FigureResult<(Vec<u8>, (u32, u32))> {
    let size = pixel_size(figure, dpi)?;
    let mut buffer = vec![0_u8; size.0 as usize * size.1 as usize * 3];
    {
        let area = BitMapBackend::with_buffer(&mut buffer, size).into_drawing_area();
        draw_figure(figure, &area, f64::from(dpi), &raster_theme())?;
        area.present().map_err(FigureError::render)?;
    }
    Ok((buffer, size))
}

/// Export the figure according to `config`
///
/// With a path, the file is written (parent directories are created) and
/// the report carries its size. Without a path, SVG output is returned in
/// the report; PNG needs a path.
pub fn export(figure: &Figure, config: &ExportConfig) -> FigureResult<ExportReport> {
    let dimensions = pixel_size(figure, config.dpi)?;
    let mut report = ExportReport {
        format: config.format,
        path: config.output_path.clone(),
        svg: None,
        dimensions,
        bytes_written: 0,
        created_at: chrono::Utc::now().to_rfc3339(),
        software_version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let Some(path) = &config.output_path else {
        return match config.format {
            ExportFormat::Svg => {
                report.svg = Some(render_svg(figure, config.dpi)?);
                Ok(report)
            }
            ExportFormat::Png => Err(ExportError::InvalidPath {
                path: PathBuf::new(),
            }
            .into()),
        };
    };

    if path.as_os_str().is_empty() || path.is_dir() {
        return Err(ExportError::InvalidPath { path: path.clone() }.into());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    match config.format {
        ExportFormat::Svg => {
            std::fs::write(path, render_svg(figure, config.dpi)?)?;
        }
        ExportFormat::Png => {
            let area = BitMapBackend::new(path, dimensions).into_drawing_area();
            draw_figure(figure, &area, f64::from(config.dpi), &raster_theme())?;
            area.present().map_err(FigureError::render)?;
        }
    }

    report.bytes_written = std::fs::metadata(path)?.len();
    info!(
        path = %path.display(),
        format = config.format.extension(),
        width = dimensions.0,
        height = dimensions.1,
        bytes = report.bytes_written,
        "exported figure"
    );
    Ok(report)
}
