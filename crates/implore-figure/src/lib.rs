//! implore-figure - Composite grid figures for implore
//!
//! Renders one illustrative multi-panel figure: a Gaussian decay heatmap, a
//! two-group color-mapped scatter and three phase-shifted trigonometric
//! panels, arranged on a nested grid (two panels over three).
//!
//! # Key Components
//!
//! - **Layout**: nested grid partitions with ratios and gaps ([`GridSpec`])
//! - **Figure**: canvas, axes and retained artists ([`Figure`], [`Axes`])
//! - **Colorbar**: strip carved from the right of a mappable's axes
//! - **Panels**: heatmap, scatter and trigonometric generators
//! - **Composer**: builds the whole figure from a [`FigureConfig`]
//! - **Render/Export**: plotters-based SVG and PNG output
//!
//! # Example
//!
//! ```no_run
//! use implore_figure::{compose, export, ExportConfig, FigureConfig, NoiseSource};
//!
//! let figure = compose(&FigureConfig::default(), &mut NoiseSource::seeded(0))?;
//! export(&figure, &ExportConfig::svg().with_path("example.svg"))?;
//! # Ok::<(), implore_figure::FigureError>(())
//! ```

pub mod axis;
pub mod colorbar;
pub mod colormap;
pub mod composer;
pub mod config;
pub mod error;
pub mod export;
pub mod figure;
pub mod layout;
pub mod noise;
pub mod panels;
pub mod render;

pub use axis::{AxisConfig, Tick, TickSpec};
pub use colorbar::{colorbar, colorbar_with, ColorbarStyle};
pub use colormap::{Color, ColorScale, Colormap};
pub use composer::compose;
pub use config::FigureConfig;
pub use error::{ConfigError, ExportError, FigureError, FigureResult};
pub use export::{export, render_svg, ExportConfig, ExportFormat, ExportReport};
pub use figure::*;
pub use layout::{GridSpec, Rect};
pub use noise::NoiseSource;
pub use panels::{ScatterGroups, TrigFunction};

// render exports backend-generic drawing, access via render:: prefix
