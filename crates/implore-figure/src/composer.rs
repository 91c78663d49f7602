//! Builds the composite figure
//!
//! Canvas → two rows → heatmap and scatter on top → sin, cos and tan
//! below. Every generator gets its own freshly bound axes.

use tracing::{debug, info};

use crate::config::FigureConfig;
use crate::error::FigureResult;
use crate::figure::Figure;
use crate::layout::{GridSpec, Rect};
use crate::noise::NoiseSource;
use crate::panels::{heatmap, scatter, trig, TrigFunction};

/// Compose the figure described by `config`, drawing noise from `noise`
pub fn compose(config: &FigureConfig, noise: &mut NoiseSource) -> FigureResult<Figure> {
    config.validate()?;
    let layout = &config.layout;
    let mut figure = Figure::new(config.canvas.width_inches, config.canvas.height_inches);

    let rows = GridSpec::new(2, 1, Rect::subplot_region())
        .with_height_ratios(layout.row_ratios.clone())
        .with_hspace(layout.hspace);

    let top = rows
        .subgrid(0, 0, 1, 2)?
        .with_width_ratios(layout.top_ratios.clone())
        .with_wspace(layout.top_wspace);
    heatmap::draw_with(figure.add_axes(top.cell(0, 0)?), config.colorbar)?;
    scatter::draw_with(figure.add_axes(top.cell(0, 1)?), noise, config.colorbar)?;
    debug!("top row composed");

    let bottom = rows
        .subgrid(1, 0, 1, 3)?
        .with_width_ratios(layout.bottom_ratios.clone())
        .with_wspace(layout.bottom_wspace);
    for (col, function) in TrigFunction::ALL.into_iter().enumerate() {
        trig::draw(figure.add_axes(bottom.cell(0, col)?), function)?;
    }
    debug!("bottom row composed");

    info!(
        panels = figure.panel_count(),
        colorbars = figure.colorbar_count(),
        seed = ?noise.seed(),
        "composed figure"
    );
    Ok(figure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FigureError;

    #[test]
    fn test_five_panels_two_colorbars() {
        let figure = compose(&FigureConfig::default(), &mut NoiseSource::seeded(0)).unwrap();
        assert_eq!(figure.panel_count(), 5);
        assert_eq!(figure.colorbar_count(), 2);
        assert!(figure.axes[0].colorbar.is_some());
        assert!(figure.axes[1].colorbar.is_some());
    }

    #[test]
    fn test_top_row_above_bottom_row() {
        let figure = compose(&FigureConfig::default(), &mut NoiseSource::seeded(0)).unwrap();
        let lowest_top = figure.axes[..2]
            .iter()
            .map(|a| a.rect.bottom)
            .fold(f64::INFINITY, f64::min);
        for ax in &figure.axes[2..] {
            assert!(ax.rect.top() < lowest_top);
        }
        // left to right within each row
        assert!(figure.axes[0].rect.left < figure.axes[1].rect.left);
        assert!(figure.axes[2].rect.right() < figure.axes[3].rect.left);
        assert!(figure.axes[3].rect.right() < figure.axes[4].rect.left);
    }

    #[test]
    fn test_invalid_layout_is_reported() {
        let mut config = FigureConfig::default();
        config.layout.top_ratios = vec![1.0, -1.0];
        let err = compose(&config, &mut NoiseSource::seeded(0)).unwrap_err();
        assert!(matches!(err, FigureError::Layout(_)));
    }
}
