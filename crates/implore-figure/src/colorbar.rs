//! Colorbar attachment
//!
//! A colorbar takes a thin strip from the right edge of the axes that owns
//! the mappable. The strip size and pad are physical lengths (inches), so
//! they are converted to figure fractions with the canvas width.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::axis::TickSpec;
use crate::error::{FigureError, FigureResult};
use crate::figure::{Axes, Colorbar, MappableRef};

/// Label rotation applied to colorbar labels (reads bottom to top)
pub const LABEL_ROTATION: f64 = 270.0;

/// Distance between tick labels and the colorbar label, in points
pub const LABEL_PAD: f64 = 10.0;

/// Strip geometry in inches
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorbarStyle {
    pub size_inches: f64,
    pub pad_inches: f64,
}

impl Default for ColorbarStyle {
    fn default() -> Self {
        Self {
            size_inches: 0.07,
            pad_inches: 0.05,
        }
    }
}

/// Attach a colorbar with the default strip geometry
pub fn colorbar<'a>(
    axes: &'a mut Axes,
    mappable: MappableRef,
    label: &str,
) -> FigureResult<&'a mut Colorbar> {
    colorbar_with(axes, mappable, label, ColorbarStyle::default())
}

/// Attach a colorbar for `mappable` to the right of `axes`.
///
/// The axes rectangle loses `size + pad` from its right edge. Replacing an
/// existing colorbar gives back the old strip first, so the axes is never
/// shrunk twice.
pub fn colorbar_with<'a>(
    axes: &'a mut Axes,
    mappable: MappableRef,
    label: &str,
    style: ColorbarStyle,
) -> FigureResult<&'a mut Colorbar> {
    let not_mappable = |reason: &str| FigureError::NotMappable {
        axes: mappable.axes,
        index: mappable.index,
        reason: reason.to_string(),
    };

    if mappable.axes != axes.id {
        return Err(not_mappable(&format!(
            "belongs to a different axes than {}",
            axes.id
        )));
    }
    let artist = axes
        .artist(mappable.index)
        .ok_or_else(|| not_mappable("no such artist"))?;
    let scale = artist
        .color_scale()
        .ok_or_else(|| not_mappable(&format!("{} has no color scale", artist.kind())))?;
    let cmap = artist.cmap().unwrap_or("viridis").to_string();

    let fig_width = axes.fig_size.0;
    if let Some(previous) = &axes.colorbar {
        let give_back = (previous.size_inches + previous.pad_inches) / fig_width;
        axes.rect.width += give_back;
    }
    axes.rect = axes
        .rect
        .shrink_right((style.size_inches + style.pad_inches) / fig_width);

    debug!(
        axes = axes.id,
        artist = mappable.index,
        vmin = scale.vmin,
        vmax = scale.vmax,
        "attached colorbar"
    );

    Ok(axes.colorbar.insert(Colorbar {
        source: mappable,
        scale,
        cmap,
        label: label.to_string(),
        label_rotation: LABEL_ROTATION,
        label_pad: LABEL_PAD,
        size_inches: style.size_inches,
        pad_inches: style.pad_inches,
        outline_visible: false,
        ticks: TickSpec::Auto,
    }))
}
