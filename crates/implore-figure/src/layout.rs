//! Grid partitioning of a canvas
//!
//! All rectangles live in figure-fraction coordinates: the canvas is the
//! unit square with its origin at the bottom-left corner. A [`GridSpec`]
//! splits a region into rows and columns with relative sizes and gaps; a
//! cell of one grid can be the region of another (nested grids).

use serde::{Deserialize, Serialize};

use crate::error::{validation, FigureError, FigureResult};

/// Default gap between cells, as a fraction of the average cell size
pub const DEFAULT_SPACE: f64 = 0.2;

/// A rectangle in figure-fraction coordinates
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, bottom: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            bottom,
            width,
            height,
        }
    }

    /// Build from edges
    pub fn from_edges(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Self::new(left, bottom, right - left, top - bottom)
    }

    /// The whole canvas
    pub fn unit() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    /// Region used by a top-level grid: leaves room for outer tick labels
    pub fn subplot_region() -> Self {
        Self::from_edges(0.125, 0.11, 0.9, 0.88)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn top(&self) -> f64 {
        self.bottom + self.height
    }

    /// Split off `amount` from the right edge, returning the remaining rect
    pub fn shrink_right(&self, amount: f64) -> Rect {
        Rect::new(
            self.left,
            self.bottom,
            (self.width - amount).max(0.0),
            self.height,
        )
    }

    /// Largest rect with the given width/height ratio (in physical units),
    /// centered inside this one
    pub fn fit_aspect(&self, fig_size: (f64, f64), aspect: f64) -> Rect {
        let phys_w = self.width * fig_size.0;
        let phys_h = self.height * fig_size.1;
        if phys_w <= 0.0 || phys_h <= 0.0 || aspect <= 0.0 {
            return *self;
        }

        let (w, h) = if phys_w / phys_h > aspect {
            (phys_h * aspect, phys_h)
        } else {
            (phys_w, phys_w / aspect)
        };
        let width = w / fig_size.0;
        let height = h / fig_size.1;
        Rect::new(
            self.left + (self.width - width) / 2.0,
            self.bottom + (self.height - height) / 2.0,
            width,
            height,
        )
    }

    /// Convert to pixels `[x, y, w, h]` with y pointing down
    pub fn to_pixels(&self, canvas: (f64, f64)) -> [f64; 4] {
        [
            self.left * canvas.0,
            (1.0 - self.top()) * canvas.1,
            self.width * canvas.0,
            self.height * canvas.1,
        ]
    }
}

/// Row/column partition of a region
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub nrows: usize,
    pub ncols: usize,

    /// Region being partitioned
    pub region: Rect,

    /// Relative row heights (top to bottom)
    pub height_ratios: Vec<f64>,

    /// Relative column widths (left to right)
    pub width_ratios: Vec<f64>,

    /// Vertical gap, as a fraction of the average row height
    pub hspace: f64,

    /// Horizontal gap, as a fraction of the average column width
    pub wspace: f64,
}

impl GridSpec {
    /// Create an evenly spaced grid over a region
    pub fn new(nrows: usize, ncols: usize, region: Rect) -> Self {
        Self {
            nrows,
            ncols,
            region,
            height_ratios: vec![1.0; nrows],
            width_ratios: vec![1.0; ncols],
            hspace: DEFAULT_SPACE,
            wspace: DEFAULT_SPACE,
        }
    }

    pub fn with_height_ratios(mut self, ratios: impl Into<Vec<f64>>) -> Self {
        self.height_ratios = ratios.into();
        self
    }

    pub fn with_width_ratios(mut self, ratios: impl Into<Vec<f64>>) -> Self {
        self.width_ratios = ratios.into();
        self
    }

    pub fn with_hspace(mut self, hspace: f64) -> Self {
        self.hspace = hspace;
        self
    }

    pub fn with_wspace(mut self, wspace: f64) -> Self {
        self.wspace = wspace;
        self
    }

    /// Check that the grid describes a valid geometry
    pub fn validate(&self) -> FigureResult<()> {
        if self.nrows == 0 || self.ncols == 0 {
            return Err(FigureError::Layout(format!(
                "grid must have at least one row and column, got {}x{}",
                self.nrows, self.ncols
            )));
        }
        if self.height_ratios.len() != self.nrows {
            return Err(FigureError::Layout(format!(
                "expected {} height ratios, got {}",
                self.nrows,
                self.height_ratios.len()
            )));
        }
        if self.width_ratios.len() != self.ncols {
            return Err(FigureError::Layout(format!(
                "expected {} width ratios, got {}",
                self.ncols,
                self.width_ratios.len()
            )));
        }
        for &r in &self.height_ratios {
            validation::validate_ratio("height ratio", r)?;
        }
        for &r in &self.width_ratios {
            validation::validate_ratio("width ratio", r)?;
        }
        validation::validate_gap("hspace", self.hspace)?;
        validation::validate_gap("wspace", self.wspace)?;
        Ok(())
    }

    /// Rectangle of one cell
    pub fn cell(&self, row: usize, col: usize) -> FigureResult<Rect> {
        self.validate()?;
        if row >= self.nrows || col >= self.ncols {
            return Err(FigureError::Layout(format!(
                "cell ({row}, {col}) outside {}x{} grid",
                self.nrows, self.ncols
            )));
        }

        let rows = partition(self.region.height, &self.height_ratios, self.hspace);
        let cols = partition(self.region.width, &self.width_ratios, self.wspace);

        let (row_offset, row_size) = rows[row];
        let (col_offset, col_size) = cols[col];

        Ok(Rect::new(
            self.region.left + col_offset,
            self.region.top() - row_offset - row_size,
            col_size,
            row_size,
        ))
    }

    /// All cells in row-major order
    pub fn cells(&self) -> FigureResult<Vec<Rect>> {
        let mut out = Vec::with_capacity(self.nrows * self.ncols);
        for row in 0..self.nrows {
            for col in 0..self.ncols {
                out.push(self.cell(row, col)?);
            }
        }
        Ok(out)
    }

    /// Nested grid inside one cell of this grid
    pub fn subgrid(&self, row: usize, col: usize, nrows: usize, ncols: usize) -> FigureResult<GridSpec> {
        Ok(GridSpec::new(nrows, ncols, self.cell(row, col)?))
    }
}

/// Split `length` into cells with relative `ratios` separated by gaps.
///
/// The gap is `space` times the average cell size. Returns
/// `(offset, size)` pairs measured from the start of the region.
fn partition(length: f64, ratios: &[f64], space: f64) -> Vec<(f64, f64)> {
    let n = ratios.len() as f64;
    let cell_total = length / (n + space * (n - 1.0));
    let gap = space * cell_total;
    let ratio_sum: f64 = ratios.iter().sum();

    let mut offset = 0.0;
    ratios
        .iter()
        .map(|r| {
            let size = cell_total * n * r / ratio_sum;
            let cell = (offset, size);
            offset += size + gap;
            cell
        })
        .collect()
}
