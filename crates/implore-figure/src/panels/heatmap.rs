//! Gaussian decay heatmap

use tracing::debug;

use crate::colorbar::{colorbar_with, ColorbarStyle};
use crate::colormap::ColorScale;
use crate::error::FigureResult;
use crate::figure::{Axes, Grid2D};

/// Samples along each axis
pub const SAMPLES: usize = 61;

/// Lattice spacing
pub const STEP: f64 = 0.1;

/// Lower edge of the lattice on both axes
pub const START: f64 = -3.0;

/// Sample coordinates `-3 + 0.1 * i` for `i` in `0..61`
pub fn sample_axis() -> Vec<f64> {
    (0..SAMPLES).map(|i| START + STEP * i as f64).collect()
}

/// `exp(-(x² + y²) / 3)`
pub fn decay(x: f64, y: f64) -> f64 {
    (-(x * x + y * y) / 3.0).exp()
}

/// The decay field on the square lattice
pub fn gaussian_field() -> Grid2D {
    let axis = sample_axis();
    Grid2D::from_fn(&axis, &axis, decay)
}

/// Draw the heatmap panel with the default colorbar geometry
pub fn draw(axes: &mut Axes) -> FigureResult<()> {
    draw_with(axes, ColorbarStyle::default())
}

pub fn draw_with(axes: &mut Axes, style: ColorbarStyle) -> FigureResult<()> {
    let end = START + STEP * (SAMPLES - 1) as f64;
    let image = axes.imshow(
        gaussian_field(),
        [START, end, START, end],
        ColorScale::new(0.0, 1.0),
    );

    axes.set_xlabel("x label");
    axes.set_ylabel("y label");

    // every 10th sample lands on an integer
    let ticks: Vec<f64> = (-3..=3).map(f64::from).collect();
    axes.x.set_ticks(ticks.clone());
    axes.y.set_ticks(ticks);

    colorbar_with(axes, image, "color label", style)?;
    debug!(axes = axes.id, samples = SAMPLES * SAMPLES, "drew heatmap");
    Ok(())
}
