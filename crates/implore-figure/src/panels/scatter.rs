//! Two-group scatter with a shared color scale

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::colorbar::{colorbar_with, ColorbarStyle};
use crate::colormap::{Color, ColorScale};
use crate::error::{FigureError, FigureResult};
use crate::figure::{Axes, LegendLocation, MarkerFill, ScatterArtist};
use crate::noise::NoiseSource;

/// Points per group
pub const POINTS: usize = 100;

/// Edge width of every marker, in points
pub const EDGE_WIDTH: f64 = 0.75;

/// Where the legend-only markers are parked (outside the x view)
const LEGEND_ANCHOR: (f64, f64) = (-10.0, 0.0);

/// Synthetic data for both groups
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScatterGroups {
    pub x: Vec<f64>,
    pub y1: Vec<f64>,
    pub y2: Vec<f64>,
    pub c1: Vec<f64>,
    pub c2: Vec<f64>,
}

impl ScatterGroups {
    /// Draw noise in the order y1, y2, c1, c2 and build both groups
    pub fn synthesize(noise: &mut NoiseSource) -> FigureResult<Self> {
        let x: Vec<f64> = (0..POINTS).map(|i| i as f64).collect();
        let n_y1 = noise.normal(0.0, 10.0, POINTS)?;
        let n_y2 = noise.normal(0.0, 20.0, POINTS)?;
        let n_c1 = noise.normal(0.0, 10.0, POINTS)?;
        let n_c2 = noise.normal(0.0, 10.0, POINTS)?;

        let zip = |noise: &[f64], f: &dyn Fn(f64, f64) -> f64| -> Vec<f64> {
            x.iter().zip(noise).map(|(&x, &n)| f(x, n)).collect()
        };
        let y1 = zip(&n_y1, &|x, n| x + n);
        let y2 = zip(&n_y2, &|x, n| 2.0 * x + n - 20.0);
        let c1 = zip(&n_c1, &|x, n| -x + n + 80.0);
        let c2 = zip(&n_c2, &|x, n| x + n + 80.0);

        Ok(Self { x, y1, y2, c1, c2 })
    }

    /// min/max over both color arrays
    pub fn color_scale(&self) -> Option<ColorScale> {
        ColorScale::joint(&[self.c1.as_slice(), self.c2.as_slice()])
    }
}

/// Draw the scatter panel with the default colorbar geometry
pub fn draw(axes: &mut Axes, noise: &mut NoiseSource) -> FigureResult<()> {
    draw_with(axes, noise, ColorbarStyle::default())
}

pub fn draw_with(
    axes: &mut Axes,
    noise: &mut NoiseSource,
    style: ColorbarStyle,
) -> FigureResult<()> {
    let groups = ScatterGroups::synthesize(noise)?;
    let scale = groups
        .color_scale()
        .ok_or_else(|| FigureError::Noise("color values are all NaN".to_string()))?;

    let (lx, ly) = LEGEND_ANCHOR;
    axes.scatter(
        ScatterArtist::new(vec![lx], vec![ly])
            .with_color(Color::BLACK)
            .with_line_width(EDGE_WIDTH)
            .with_label("group 1"),
    );
    axes.scatter(
        ScatterArtist::new(vec![lx], vec![ly])
            .with_edge_color(Color::BLACK)
            .with_fill(MarkerFill::Hollow)
            .with_line_width(EDGE_WIDTH)
            .with_label("group 2"),
    );
    let legend = axes
        .legend_from_artists()
        .with_location(LegendLocation::UpperLeft);
    axes.set_legend(legend);

    axes.scatter(
        ScatterArtist::new(groups.x.clone(), groups.y1)
            .with_values(groups.c1, scale)
            .with_line_width(EDGE_WIDTH),
    );
    let group2 = axes.scatter(
        ScatterArtist::new(groups.x, groups.y2)
            .with_values(groups.c2, scale)
            .with_fill(MarkerFill::Hollow)
            .with_line_width(EDGE_WIDTH),
    );

    axes.set_xlabel("x label");
    axes.set_ylabel("y label");
    axes.x.set_limits(-5.0, 105.0);

    colorbar_with(axes, group2, "color label", style)?;
    debug!(
        axes = axes.id,
        vmin = scale.vmin,
        vmax = scale.vmax,
        "drew scatter groups"
    );
    Ok(())
}
