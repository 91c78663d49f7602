//! Figure model: canvas, axes and the artists recorded on them
//!
//! Drawing is retained: panel generators record artists, legends and
//! colorbars on an explicit [`Axes`] handle, and the renderer turns the
//! finished [`Figure`] into pixels later. There is no "current axes".

use serde::{Deserialize, Serialize};

use crate::axis::{padded_range, AxisConfig, TickSpec};
use crate::colormap::{Color, ColorScale};
use crate::layout::Rect;

/// Relative margin added around auto-scaled data
pub const AUTO_MARGIN: f64 = 0.05;

/// Index of an axes within its figure (creation order)
pub type AxesId = usize;

/// Reference to a drawn artist that carries a color scale
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappableRef {
    pub axes: AxesId,
    pub index: usize,
}

/// Aspect handling for the data box
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Aspect {
    /// Fill the assigned rectangle
    #[default]
    Auto,
    /// One data unit has the same physical length on both axes
    Equal,
}

/// Scalar samples on a regular lattice, row-major with rows along y
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid2D {
    pub nx: usize,
    pub ny: usize,
    pub values: Vec<f64>,
}

impl Grid2D {
    /// Evaluate `f(x, y)` on the outer product of two coordinate vectors
    pub fn from_fn(xs: &[f64], ys: &[f64], f: impl Fn(f64, f64) -> f64) -> Self {
        let values = ys
            .iter()
            .flat_map(|&y| xs.iter().map(move |&x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self {
            nx: xs.len(),
            ny: ys.len(),
            values,
        }
    }

    pub fn get(&self, ix: usize, iy: usize) -> Option<f64> {
        if ix >= self.nx || iy >= self.ny {
            return None;
        }
        self.values.get(iy * self.nx + ix).copied()
    }

    /// (min, max) over all finite samples
    pub fn range(&self) -> Option<(f64, f64)> {
        ColorScale::joint(&[self.values.as_slice()]).map(|s| (s.vmin, s.vmax))
    }
}

/// Marker face treatment
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerFill {
    Filled,
    /// Face left empty; color goes to the edge
    Hollow,
}

/// A fixed-scale image over a data extent
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageArtist {
    pub data: Grid2D,
    /// (x_min, x_max, y_min, y_max)
    pub extent: [f64; 4],
    pub scale: ColorScale,
    pub cmap: String,
}

/// Point cloud, optionally color mapped
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScatterArtist {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Values mapped through `scale`; `None` draws every point in `color`
    pub values: Option<Vec<f64>>,
    pub scale: Option<ColorScale>,
    pub cmap: String,
    pub color: Color,
    /// Explicit edge color; `None` uses the point color
    pub edge_color: Option<Color>,
    pub fill: MarkerFill,
    /// Edge width in points
    pub line_width: f64,
    /// Marker area in points²
    pub size: f64,
    pub label: Option<String>,
}

impl ScatterArtist {
    /// Uniformly colored points
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            x,
            y,
            values: None,
            scale: None,
            cmap: "viridis".to_string(),
            color: crate::colormap::cycle_color(0),
            edge_color: None,
            fill: MarkerFill::Filled,
            line_width: 1.0,
            size: 36.0,
            label: None,
        }
    }

    /// Map per-point values through a color scale
    pub fn with_values(mut self, values: Vec<f64>, scale: ColorScale) -> Self {
        self.values = Some(values);
        self.scale = Some(scale);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_edge_color(mut self, color: Color) -> Self {
        self.edge_color = Some(color);
        self
    }

    pub fn with_fill(mut self, fill: MarkerFill) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A polyline
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineArtist {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub color: Color,
    /// Line width in points
    pub width: f64,
    pub label: Option<String>,
}

/// Anything recorded on an axes
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Artist {
    Image(ImageArtist),
    Scatter(ScatterArtist),
    Line(LineArtist),
}

impl Artist {
    /// Color scale, for artists that can feed a colorbar
    pub fn color_scale(&self) -> Option<ColorScale> {
        match self {
            Artist::Image(img) => Some(img.scale),
            Artist::Scatter(sc) => sc.scale,
            Artist::Line(_) => None,
        }
    }

    /// Colormap name used with [`Artist::color_scale`]
    pub fn cmap(&self) -> Option<&str> {
        match self {
            Artist::Image(img) => Some(&img.cmap),
            Artist::Scatter(sc) if sc.scale.is_some() => Some(&sc.cmap),
            _ => None,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Artist::Image(_) => None,
            Artist::Scatter(sc) => sc.label.as_deref(),
            Artist::Line(line) => line.label.as_deref(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Artist::Image(_) => "image",
            Artist::Scatter(_) => "scatter",
            Artist::Line(_) => "line",
        }
    }

    /// Data extent as (x_min, x_max, y_min, y_max), ignoring NaN/inf
    fn data_bounds(&self) -> Option<[f64; 4]> {
        let (xs, ys) = match self {
            Artist::Image(img) => return Some(img.extent),
            Artist::Scatter(sc) => (&sc.x, &sc.y),
            Artist::Line(line) => (&line.x, &line.y),
        };
        let finite = |v: &&f64| v.is_finite();
        let x = xs.iter().filter(finite).fold(None, min_max_step)?;
        let y = ys.iter().filter(finite).fold(None, min_max_step)?;
        Some([x.0, x.1, y.0, y.1])
    }
}

fn min_max_step(acc: Option<(f64, f64)>, v: &f64) -> Option<(f64, f64)> {
    Some(match acc {
        None => (*v, *v),
        Some((lo, hi)) => (lo.min(*v), hi.max(*v)),
    })
}

/// Glyph shown next to a legend label
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LegendGlyph {
    Marker {
        fill: MarkerFill,
        face: Color,
        edge: Color,
    },
    Line {
        color: Color,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub glyph: LegendGlyph,
}

/// Where the legend box goes
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum LegendLocation {
    /// Inside the data box, upper-left corner
    UpperLeft,
    /// Lower-left corner of the box at an axes-fraction offset
    Anchored { x: f64, y: f64 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
    pub title: Option<String>,
    pub columns: usize,
    pub location: LegendLocation,
}

impl Legend {
    pub fn new(entries: Vec<LegendEntry>) -> Self {
        Self {
            entries,
            title: None,
            columns: 1,
            location: LegendLocation::UpperLeft,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }

    pub fn with_location(mut self, location: LegendLocation) -> Self {
        self.location = location;
        self
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }
}

/// Vertical color legend attached to the right of an axes
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Colorbar {
    pub source: MappableRef,
    pub scale: ColorScale,
    pub cmap: String,
    pub label: String,
    /// Label rotation in degrees
    pub label_rotation: f64,
    /// Gap between tick labels and the label, in points
    pub label_pad: f64,
    /// Strip width in inches
    pub size_inches: f64,
    /// Gap between parent and strip in inches
    pub pad_inches: f64,
    pub outline_visible: bool,
    pub ticks: TickSpec,
}

impl Colorbar {
    /// Strip rectangle next to the parent's data box
    pub fn rect(&self, parent: Rect, fig_size: (f64, f64)) -> Rect {
        Rect::new(
            parent.right() + self.pad_inches / fig_size.0,
            parent.bottom,
            self.size_inches / fig_size.0,
            parent.height,
        )
    }
}

/// A drawing target: one rectangular panel with its own coordinate system
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Axes {
    pub id: AxesId,
    /// Rectangle available to the data box (after any colorbar carve-out)
    pub rect: Rect,
    /// Canvas size in inches, for physical-unit geometry
    pub fig_size: (f64, f64),
    pub x: AxisConfig,
    pub y: AxisConfig,
    pub aspect: Aspect,
    pub artists: Vec<Artist>,
    pub legend: Option<Legend>,
    pub colorbar: Option<Colorbar>,
}

impl Axes {
    pub fn new(id: AxesId, rect: Rect, fig_size: (f64, f64)) -> Self {
        Self {
            id,
            rect,
            fig_size,
            x: AxisConfig::default(),
            y: AxisConfig::default(),
            aspect: Aspect::Auto,
            artists: Vec::new(),
            legend: None,
            colorbar: None,
        }
    }

    fn push(&mut self, artist: Artist) -> MappableRef {
        self.artists.push(artist);
        MappableRef {
            axes: self.id,
            index: self.artists.len() - 1,
        }
    }

    /// Draw a fixed-scale image; the data box switches to equal aspect
    pub fn imshow(&mut self, data: Grid2D, extent: [f64; 4], scale: ColorScale) -> MappableRef {
        self.aspect = Aspect::Equal;
        self.push(Artist::Image(ImageArtist {
            data,
            extent,
            scale,
            cmap: "viridis".to_string(),
        }))
    }

    pub fn scatter(&mut self, artist: ScatterArtist) -> MappableRef {
        self.push(Artist::Scatter(artist))
    }

    pub fn plot(&mut self, x: Vec<f64>, y: Vec<f64>, color: Color) -> MappableRef {
        self.push(Artist::Line(LineArtist {
            x,
            y,
            color,
            width: 1.5,
            label: None,
        }))
    }

    pub fn set_xlabel(&mut self, label: impl Into<String>) {
        self.x.set_label(label);
    }

    pub fn set_ylabel(&mut self, label: impl Into<String>) {
        self.y.set_label(label);
    }

    pub fn set_legend(&mut self, legend: Legend) {
        self.legend = Some(legend);
    }

    /// Legend built from every labeled artist so far, in draw order
    pub fn legend_from_artists(&self) -> Legend {
        let entries = self
            .artists
            .iter()
            .filter_map(|artist| {
                let label = artist.label()?.to_string();
                let glyph = match artist {
                    Artist::Scatter(sc) => LegendGlyph::Marker {
                        fill: sc.fill,
                        face: sc.color,
                        edge: sc.edge_color.unwrap_or(sc.color),
                    },
                    Artist::Line(line) => LegendGlyph::Line { color: line.color },
                    Artist::Image(_) => return None,
                };
                Some(LegendEntry { label, glyph })
            })
            .collect();
        Legend::new(entries)
    }

    pub fn artist(&self, index: usize) -> Option<&Artist> {
        self.artists.get(index)
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineArtist> {
        self.artists.iter().filter_map(|a| match a {
            Artist::Line(line) => Some(line),
            _ => None,
        })
    }

    pub fn scatters(&self) -> impl Iterator<Item = &ScatterArtist> {
        self.artists.iter().filter_map(|a| match a {
            Artist::Scatter(sc) => Some(sc),
            _ => None,
        })
    }

    /// Resolved view limits ((x_min, x_max), (y_min, y_max))
    pub fn view_limits(&self) -> ((f64, f64), (f64, f64)) {
        let mut padded: Option<[f64; 4]> = None;
        let mut exact: Option<[f64; 4]> = None;
        for artist in &self.artists {
            let Some(b) = artist.data_bounds() else {
                continue;
            };
            let slot = if matches!(artist, Artist::Image(_)) {
                &mut exact
            } else {
                &mut padded
            };
            *slot = Some(match *slot {
                None => b,
                Some(a) => [a[0].min(b[0]), a[1].max(b[1]), a[2].min(b[2]), a[3].max(b[3])],
            });
        }

        let padded = padded.map(|b| {
            let (x0, x1) = padded_range(b[0], b[1], AUTO_MARGIN);
            let (y0, y1) = padded_range(b[2], b[3], AUTO_MARGIN);
            [x0, x1, y0, y1]
        });
        let auto = match (padded, exact) {
            (Some(a), Some(b)) => [a[0].min(b[0]), a[1].max(b[1]), a[2].min(b[2]), a[3].max(b[3])],
            (Some(a), None) | (None, Some(a)) => a,
            (None, None) => [0.0, 1.0, 0.0, 1.0],
        };

        (
            self.x.limits.unwrap_or((auto[0], auto[1])),
            self.y.limits.unwrap_or((auto[2], auto[3])),
        )
    }

    /// Rectangle of the data box after aspect adjustment
    pub fn plot_rect(&self) -> Rect {
        match self.aspect {
            Aspect::Auto => self.rect,
            Aspect::Equal => {
                let ((x0, x1), (y0, y1)) = self.view_limits();
                let (dx, dy) = ((x1 - x0).abs(), (y1 - y0).abs());
                if dx > 0.0 && dy > 0.0 {
                    self.rect.fit_aspect(self.fig_size, dx / dy)
                } else {
                    self.rect
                }
            }
        }
    }
}

/// The top-level canvas
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    /// Physical size in inches (width, height)
    pub size_inches: (f64, f64),
    pub axes: Vec<Axes>,
}

impl Figure {
    pub fn new(width_inches: f64, height_inches: f64) -> Self {
        Self {
            size_inches: (width_inches, height_inches),
            axes: Vec::new(),
        }
    }

    /// Bind a new drawing target to a layout cell
    pub fn add_axes(&mut self, rect: Rect) -> &mut Axes {
        let id = self.axes.len();
        self.axes.push(Axes::new(id, rect, self.size_inches));
        &mut self.axes[id]
    }

    pub fn axes(&self, id: AxesId) -> Option<&Axes> {
        self.axes.get(id)
    }

    pub fn panel_count(&self) -> usize {
        self.axes.len()
    }

    pub fn colorbar_count(&self) -> usize {
        self.axes.iter().filter(|a| a.colorbar.is_some()).count()
    }

    /// Compact, serializable description of what was drawn
    pub fn summary(&self) -> FigureSummary {
        FigureSummary {
            size_inches: self.size_inches,
            panel_count: self.panel_count(),
            colorbar_count: self.colorbar_count(),
            panels: self
                .axes
                .iter()
                .map(|ax| PanelSummary {
                    id: ax.id,
                    rect: ax.plot_rect(),
                    x_label: ax.x.label.clone(),
                    y_label: ax.y.label.clone(),
                    artists: ax.artists.iter().map(|a| a.kind().to_string()).collect(),
                    legend: ax
                        .legend
                        .as_ref()
                        .map(|l| l.labels().into_iter().map(str::to_string).collect()),
                    colorbar: ax.colorbar.as_ref().map(|c| c.label.clone()),
                })
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FigureSummary {
    pub size_inches: (f64, f64),
    pub panel_count: usize,
    pub colorbar_count: usize,
    pub panels: Vec<PanelSummary>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PanelSummary {
    pub id: AxesId,
    pub rect: Rect,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub artists: Vec<String>,
    pub legend: Option<Vec<String>>,
    pub colorbar: Option<String>,
}
