//! Rendering a [`Figure`] onto a plotters drawing area
//!
//! Everything is drawn in pixel space with primitive elements (rectangles,
//! circles, paths and text), so any plotters backend works. Physical sizes
//! (fonts, line widths, tick lengths) are given in points and scaled by
//! `dpi / 72`. Text extents are estimated from the character count; no
//! font metrics are ever requested.

use plotters::coord::Shift;
use plotters::prelude::{Circle, DrawingArea, DrawingBackend, PathElement, Rectangle, Text};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color as _, FontFamily, FontTransform, RGBColor, ShapeStyle, TextStyle};
use tracing::debug;

use crate::axis::{calculate_ticks, AxisLayout, TickMark};
use crate::colormap::{self, Color, Colormap};
use crate::error::{FigureError, FigureResult};
use crate::figure::{
    Artist, Axes, Colorbar, Figure, ImageArtist, Legend, LegendGlyph, LegendLocation, LineArtist,
    MarkerFill, ScatterArtist,
};

/// Width of one character relative to the font size
const CHAR_WIDTH: f64 = 0.6;

/// Colors and sizes used for everything that is not data
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub canvas: Color,
    /// Data box background
    pub panel: Color,
    pub grid: Color,
    /// Tick marks and tick labels
    pub tick: Color,
    /// Axis labels, legend text, colorbar label
    pub text: Color,
    pub legend_face: Color,
    pub legend_edge: Color,

    /// Font sizes in points
    pub tick_size: f64,
    pub label_size: f64,
    pub legend_size: f64,

    /// Line widths in points
    pub grid_width: f64,
    pub tick_width: f64,

    /// Tick length and tick-label gap in points
    pub tick_length: f64,
    pub tick_pad: f64,
    /// Gap between tick labels and axis labels in points
    pub label_pad: f64,

    /// Whether text is drawn at all; raster backends need a font engine
    pub render_text: bool,
}

impl Theme {
    /// Grey panel with a white grid
    pub fn ggplot() -> Self {
        let hex = |s: &str| Color::from_hex(s).unwrap_or_default();
        Self {
            canvas: Color::WHITE,
            panel: hex("#E5E5E5"),
            grid: Color::WHITE,
            tick: hex("#555555"),
            text: hex("#555555"),
            legend_face: hex("#E5E5E5"),
            legend_edge: hex("#CCCCCC"),
            tick_size: 7.0,
            label_size: 8.0,
            legend_size: 7.0,
            grid_width: 0.8,
            tick_width: 0.8,
            tick_length: 3.5,
            tick_pad: 2.0,
            label_pad: 3.0,
            render_text: true,
        }
    }

    /// Theme for raster backends: text only when a font engine is built in
    pub fn raster() -> Self {
        Self {
            render_text: cfg!(feature = "ttf"),
            ..Self::ggplot()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::ggplot()
    }
}

/// Draw the whole figure on `area` at the given resolution
pub fn draw_figure<DB: DrawingBackend>(
    figure: &Figure,
    area: &DrawingArea<DB, Shift>,
    dpi: f64,
    theme: &Theme,
) -> FigureResult<()> {
    let (w, h) = area.dim_in_pixel();
    let painter = Painter {
        area,
        theme,
        scale: dpi / 72.0,
        canvas: (f64::from(w), f64::from(h)),
    };

    area.fill(&rgb(theme.canvas)).map_err(FigureError::render)?;
    for axes in &figure.axes {
        painter.axes(axes)?;
    }

    debug!(width = w, height = h, panels = figure.axes.len(), "rendered figure");
    Ok(())
}

/// Estimated rendered width of `text` at `font_px`
pub fn estimate_text_width(text: &str, font_px: f64) -> f64 {
    text.chars().count() as f64 * font_px * CHAR_WIDTH
}

fn rgb(color: Color) -> RGBColor {
    let (r, g, b) = color.to_rgb8();
    RGBColor(r, g, b)
}

fn px(v: f64) -> i32 {
    v.round() as i32
}

fn point(p: (f64, f64)) -> (i32, i32) {
    (px(p.0), px(p.1))
}

/// Counter-clockwise degrees to a plotters (clockwise) transform
fn rotation(degrees: f64) -> FontTransform {
    match degrees.rem_euclid(360.0).round() as i64 {
        90 => FontTransform::Rotate270,
        180 => FontTransform::Rotate180,
        270 => FontTransform::Rotate90,
        _ => FontTransform::None,
    }
}

fn resolve_cmap(name: &str) -> Colormap {
    colormap::by_name(name).unwrap_or_default()
}

struct Painter<'a, DB: DrawingBackend> {
    area: &'a DrawingArea<DB, Shift>,
    theme: &'a Theme,
    /// Pixels per point
    scale: f64,
    /// Canvas size in pixels
    canvas: (f64, f64),
}

impl<'a, DB: DrawingBackend> Painter<'a, DB> {
    fn pt(&self, v: f64) -> f64 {
        v * self.scale
    }

    fn stroke(&self, width_pt: f64) -> u32 {
        self.pt(width_pt).round().max(1.0) as u32
    }

    fn fill_rect(&self, a: (f64, f64), b: (f64, f64), color: Color) -> FigureResult<()> {
        self.area
            .draw(&Rectangle::new([point(a), point(b)], rgb(color).filled()))
            .map_err(FigureError::render)
    }

    fn stroke_rect(&self, a: (f64, f64), b: (f64, f64), color: Color, width_pt: f64) -> FigureResult<()> {
        self.area
            .draw(&Rectangle::new(
                [point(a), point(b)],
                rgb(color).stroke_width(self.stroke(width_pt)),
            ))
            .map_err(FigureError::render)
    }

    fn polyline(&self, points: &[(f64, f64)], color: Color, width_pt: f64) -> FigureResult<()> {
        if points.len() < 2 {
            return Ok(());
        }
        let path: Vec<(i32, i32)> = points.iter().copied().map(point).collect();
        self.area
            .draw(&PathElement::new(
                path,
                rgb(color).stroke_width(self.stroke(width_pt)),
            ))
            .map_err(FigureError::render)
    }

    fn marker(
        &self,
        center: (f64, f64),
        radius: f64,
        face: Option<Color>,
        edge: Option<(Color, f64)>,
    ) -> FigureResult<()> {
        let center = point(center);
        let radius = radius.max(1.0);
        if let Some(face) = face {
            let style: ShapeStyle = rgb(face).filled();
            self.area
                .draw(&Circle::new(center, radius, style))
                .map_err(FigureError::render)?;
        }
        if let Some((edge, width)) = edge {
            self.area
                .draw(&Circle::new(
                    center,
                    radius,
                    rgb(edge).stroke_width(self.stroke(width)),
                ))
                .map_err(FigureError::render)?;
        }
        Ok(())
    }

    fn text(
        &self,
        text: &str,
        at: (f64, f64),
        size_pt: f64,
        color: Color,
        pos: Pos,
        transform: FontTransform,
    ) -> FigureResult<()> {
        if text.is_empty() || !self.theme.render_text {
            return Ok(());
        }
        let color = rgb(color);
        let style = TextStyle::from((FontFamily::SansSerif, self.pt(size_pt)))
            .color(&color)
            .pos(pos)
            .transform(transform);
        self.area
            .draw(&Text::new(text, point(at), style))
            .map_err(FigureError::render)
    }

    fn axes(&self, axes: &Axes) -> FigureResult<()> {
        let theme = self.theme;
        let [x, y, w, h] = axes.plot_rect().to_pixels(self.canvas);
        let (x_range, y_range) = axes.view_limits();
        let layout = AxisLayout::new([x, y, w, h], x_range, y_range);

        self.fill_rect((x, y), (x + w, y + h), theme.panel)?;

        let x_ticks = calculate_ticks(&axes.x.ticks, x_range.0, x_range.1);
        let y_ticks = calculate_ticks(&axes.y.ticks, y_range.0, y_range.1);
        for tick in &x_ticks {
            let gx = x + tick.normalized * w;
            self.polyline(&[(gx, y), (gx, y + h)], theme.grid, theme.grid_width)?;
        }
        for tick in &y_ticks {
            let gy = y + (1.0 - tick.normalized) * h;
            self.polyline(&[(x, gy), (x + w, gy)], theme.grid, theme.grid_width)?;
        }

        for artist in &axes.artists {
            match artist {
                Artist::Image(image) => self.image(&layout, image)?,
                Artist::Scatter(scatter) => self.scatter(&layout, scatter)?,
                Artist::Line(line) => self.line(&layout, line)?,
            }
        }

        self.axis_decorations(axes, [x, y, w, h], &x_ticks, &y_ticks)?;

        if let Some(legend) = &axes.legend {
            self.legend(legend, [x, y, w, h])?;
        }
        if let Some(colorbar) = &axes.colorbar {
            self.colorbar(axes, colorbar)?;
        }
        Ok(())
    }

    fn image(&self, layout: &AxisLayout, image: &ImageArtist) -> FigureResult<()> {
        let (nx, ny) = (image.data.nx, image.data.ny);
        if nx == 0 || ny == 0 {
            return Ok(());
        }
        let cmap = resolve_cmap(&image.cmap);
        let [x0, x1, y0, y1] = image.extent;
        let dx = (x1 - x0) / nx as f64;
        let dy = (y1 - y0) / ny as f64;

        for iy in 0..ny {
            for ix in 0..nx {
                let Some(value) = image.data.get(ix, iy).filter(|v| v.is_finite()) else {
                    continue;
                };
                let top_left = layout.data_to_pixel(x0 + dx * ix as f64, y0 + dy * (iy + 1) as f64);
                let bottom_right =
                    layout.data_to_pixel(x0 + dx * (ix + 1) as f64, y0 + dy * iy as f64);
                self.fill_rect(top_left, bottom_right, image.scale.color(&cmap, value))?;
            }
        }
        Ok(())
    }

    fn scatter(&self, layout: &AxisLayout, scatter: &ScatterArtist) -> FigureResult<()> {
        let cmap = resolve_cmap(&scatter.cmap);
        let radius = self.pt(scatter.size.sqrt() / 2.0);

        for (i, (&x, &y)) in scatter.x.iter().zip(&scatter.y).enumerate() {
            if !(x.is_finite() && y.is_finite()) || !layout.contains(x, y) {
                continue;
            }
            let color = match (&scatter.values, scatter.scale) {
                (Some(values), Some(scale)) => values.get(i).map(|&v| scale.color(&cmap, v)),
                _ => None,
            }
            .unwrap_or(scatter.color);
            let edge = (scatter.edge_color.unwrap_or(color), scatter.line_width);
            let face = match scatter.fill {
                MarkerFill::Filled => Some(color),
                MarkerFill::Hollow => None,
            };
            self.marker(layout.data_to_pixel(x, y), radius, face, Some(edge))?;
        }
        Ok(())
    }

    /// Polyline clipped to the view; a clipped segment ends the current run
    fn line(&self, layout: &AxisLayout, line: &LineArtist) -> FigureResult<()> {
        let points: Vec<(f64, f64)> = line.x.iter().copied().zip(line.y.iter().copied()).collect();
        let mut run: Vec<(f64, f64)> = Vec::new();

        for pair in points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            match layout.clip_segment(a, b) {
                Some((ca, cb)) => {
                    if run.is_empty() || ca != a {
                        self.flush_run(&mut run, line)?;
                        run.push(layout.data_to_pixel(ca.0, ca.1));
                    }
                    run.push(layout.data_to_pixel(cb.0, cb.1));
                    if cb != b {
                        self.flush_run(&mut run, line)?;
                    }
                }
                None => self.flush_run(&mut run, line)?,
            }
        }
        self.flush_run(&mut run, line)
    }

    fn flush_run(&self, run: &mut Vec<(f64, f64)>, line: &LineArtist) -> FigureResult<()> {
        self.polyline(run, line.color, line.width)?;
        run.clear();
        Ok(())
    }

    fn axis_decorations(
        &self,
        axes: &Axes,
        [x, y, w, h]: [f64; 4],
        x_ticks: &[TickMark],
        y_ticks: &[TickMark],
    ) -> FigureResult<()> {
        let theme = self.theme;
        let tick_len = self.pt(theme.tick_length);
        let tick_pad = self.pt(theme.tick_pad);
        let tick_font = self.pt(theme.tick_size);
        let label_pad = self.pt(theme.label_pad);
        let bottom = y + h;

        for tick in x_ticks {
            let gx = x + tick.normalized * w;
            self.polyline(&[(gx, bottom), (gx, bottom + tick_len)], theme.tick, theme.tick_width)?;
            self.text(
                &tick.label,
                (gx, bottom + tick_len + tick_pad),
                theme.tick_size,
                theme.tick,
                Pos::new(HPos::Center, VPos::Top),
                FontTransform::None,
            )?;
        }

        let mut widest = 0.0_f64;
        for tick in y_ticks {
            let gy = y + (1.0 - tick.normalized) * h;
            self.polyline(&[(x - tick_len, gy), (x, gy)], theme.tick, theme.tick_width)?;
            self.text(
                &tick.label,
                (x - tick_len - tick_pad, gy),
                theme.tick_size,
                theme.tick,
                Pos::new(HPos::Right, VPos::Center),
                FontTransform::None,
            )?;
            widest = widest.max(estimate_text_width(&tick.label, tick_font));
        }

        if let Some(label) = &axes.x.label {
            let ty = bottom + tick_len + tick_pad + tick_font + label_pad;
            self.text(
                label,
                (x + w / 2.0, ty),
                theme.label_size,
                theme.text,
                Pos::new(HPos::Center, VPos::Top),
                FontTransform::None,
            )?;
        }
        if let Some(label) = &axes.y.label {
            let tx = x - tick_len - tick_pad - widest - label_pad;
            self.text(
                label,
                (tx, y + h / 2.0),
                theme.label_size,
                theme.text,
                Pos::new(HPos::Center, VPos::Bottom),
                rotation(90.0),
            )?;
        }
        Ok(())
    }

    fn legend(&self, legend: &Legend, [x, y, w, h]: [f64; 4]) -> FigureResult<()> {
        if legend.entries.is_empty() {
            return Ok(());
        }
        let theme = self.theme;
        let em = self.pt(theme.legend_size);
        let border = 0.4 * em;
        let handle = 2.0 * em;
        let handle_pad = 0.8 * em;
        let column_gap = 2.0 * em;
        let row_gap = 0.5 * em;

        let columns = legend.columns.clamp(1, legend.entries.len());
        let rows = legend.entries.len().div_ceil(columns);

        // filled column by column
        let mut column_widths = vec![0.0_f64; columns];
        for (i, entry) in legend.entries.iter().enumerate() {
            let width = handle + handle_pad + estimate_text_width(&entry.label, em);
            let col = i / rows;
            column_widths[col] = column_widths[col].max(width);
        }

        let body_width =
            column_widths.iter().sum::<f64>() + column_gap * (columns.saturating_sub(1)) as f64;
        let title_width = legend
            .title
            .as_deref()
            .map_or(0.0, |t| estimate_text_width(t, em));
        let title_height = if legend.title.is_some() { em + row_gap } else { 0.0 };
        let box_w = body_width.max(title_width) + 2.0 * border;
        let box_h = 2.0 * border + title_height + rows as f64 * em + (rows - 1) as f64 * row_gap;

        let (left, top) = match legend.location {
            LegendLocation::UpperLeft => (x + 0.5 * em, y + 0.5 * em),
            LegendLocation::Anchored { x: fx, y: fy } => {
                (x + fx * w, y + (1.0 - fy) * h - box_h)
            }
        };

        self.fill_rect((left, top), (left + box_w, top + box_h), theme.legend_face)?;
        self.stroke_rect((left, top), (left + box_w, top + box_h), theme.legend_edge, 0.8)?;

        if let Some(title) = &legend.title {
            self.text(
                title,
                (left + box_w / 2.0, top + border),
                theme.legend_size,
                theme.text,
                Pos::new(HPos::Center, VPos::Top),
                FontTransform::None,
            )?;
        }

        let body_left = left + border + (box_w - 2.0 * border - body_width) / 2.0;
        let body_top = top + border + title_height;
        for (i, entry) in legend.entries.iter().enumerate() {
            let (col, row) = (i / rows, i % rows);
            let cx = body_left
                + column_widths[..col].iter().sum::<f64>()
                + column_gap * col as f64;
            let cy = body_top + row as f64 * (em + row_gap) + em / 2.0;

            match &entry.glyph {
                LegendGlyph::Marker { fill, face, edge } => {
                    let face = matches!(fill, MarkerFill::Filled).then_some(*face);
                    self.marker((cx + handle / 2.0, cy), em / 3.0, face, Some((*edge, 0.75)))?;
                }
                LegendGlyph::Line { color } => {
                    self.polyline(&[(cx, cy), (cx + handle, cy)], *color, 1.5)?;
                }
            }
            self.text(
                &entry.label,
                (cx + handle + handle_pad, cy),
                theme.legend_size,
                theme.text,
                Pos::new(HPos::Left, VPos::Center),
                FontTransform::None,
            )?;
        }
        Ok(())
    }

    fn colorbar(&self, axes: &Axes, colorbar: &Colorbar) -> FigureResult<()> {
        let theme = self.theme;
        let [x, y, w, h] = colorbar
            .rect(axes.plot_rect(), axes.fig_size)
            .to_pixels(self.canvas);
        let cmap = resolve_cmap(&colorbar.cmap);

        // one band per pixel row; the LUT runs bottom to top
        let lut = cmap.generate_lut(h.round().max(1.0) as usize);
        let bands = lut.len();
        for (band, color) in lut.iter().rev().enumerate() {
            let top = y + h * band as f64 / bands as f64;
            let bottom = y + h * (band + 1) as f64 / bands as f64;
            self.fill_rect((x, top), (x + w, bottom), *color)?;
        }

        let tick_len = self.pt(theme.tick_length);
        let tick_pad = self.pt(theme.tick_pad);
        let tick_font = self.pt(theme.tick_size);
        let right = x + w;

        let mut widest = 0.0_f64;
        let scale = colorbar.scale;
        for tick in calculate_ticks(&colorbar.ticks, scale.vmin, scale.vmax) {
            let gy = y + (1.0 - tick.normalized) * h;
            self.polyline(&[(right, gy), (right + tick_len, gy)], theme.tick, theme.tick_width)?;
            self.text(
                &tick.label,
                (right + tick_len + tick_pad, gy),
                theme.tick_size,
                theme.tick,
                Pos::new(HPos::Left, VPos::Center),
                FontTransform::None,
            )?;
            widest = widest.max(estimate_text_width(&tick.label, tick_font));
        }

        let label_x = right + tick_len + tick_pad + widest + self.pt(colorbar.label_pad);
        self.text(
            &colorbar.label,
            (label_x, y + h / 2.0),
            theme.label_size,
            theme.text,
            Pos::new(HPos::Center, VPos::Bottom),
            rotation(colorbar.label_rotation),
        )?;

        if colorbar.outline_visible {
            self.stroke_rect((x, y), (right, y + h), theme.tick, 0.8)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormap::ColorScale;
    use crate::figure::Grid2D;
    use crate::layout::Rect;
    use plotters::prelude::{IntoDrawingArea, SVGBackend};

    fn render(figure: &Figure) -> String {
        let mut svg = String::new();
        {
            let area = SVGBackend::with_string(&mut svg, (530, 400)).into_drawing_area();
            draw_figure(figure, &area, 100.0, &Theme::default()).unwrap();
            area.present().unwrap();
        }
        svg
    }

    #[test]
    fn test_rotation_mapping() {
        assert!(matches!(rotation(270.0), FontTransform::Rotate90));
        assert!(matches!(rotation(90.0), FontTransform::Rotate270));
        assert!(matches!(rotation(0.0), FontTransform::None));
        assert!(matches!(rotation(-90.0), FontTransform::Rotate90));
    }

    #[test]
    fn test_text_width_estimate() {
        assert_eq!(estimate_text_width("", 10.0), 0.0);
        assert_eq!(estimate_text_width("abcde", 10.0), 30.0);
        // counts characters, not bytes
        assert_eq!(estimate_text_width("2π", 10.0), 12.0);
    }

    #[test]
    fn test_svg_contains_labels() {
        let mut figure = Figure::new(5.3, 4.0);
        let ax = figure.add_axes(Rect::new(0.15, 0.15, 0.6, 0.6));
        ax.plot(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 4.0], crate::colormap::cycle_color(0));
        ax.set_xlabel("angle (rads.)");
        ax.set_ylabel("cos");

        let svg = render(&figure);
        assert!(svg.contains("<svg"));
        assert!(svg.contains("angle (rads.)"));
        assert!(svg.contains("cos"));
    }

    #[test]
    fn test_svg_draws_colorbar_and_legend() {
        let mut figure = Figure::new(5.3, 4.0);
        let ax = figure.add_axes(Rect::new(0.15, 0.15, 0.6, 0.6));
        let image = ax.imshow(
            Grid2D::from_fn(&[0.0, 1.0], &[0.0, 1.0], |x, y| x + y),
            [0.0, 1.0, 0.0, 1.0],
            ColorScale::new(0.0, 2.0),
        );
        crate::colorbar::colorbar(ax, image, "color label").unwrap();
        ax.set_legend(Legend::new(vec![crate::figure::LegendEntry {
            label: "group 1".to_string(),
            glyph: LegendGlyph::Line { color: Color::BLACK },
        }]));

        let svg = render(&figure);
        assert!(svg.contains("color label"));
        assert!(svg.contains("group 1"));
    }

    #[test]
    fn test_colorbar_gradient_spans_colormap() {
        let mut figure = Figure::new(5.3, 4.0);
        let ax = figure.add_axes(Rect::new(0.15, 0.15, 0.6, 0.6));
        // image only uses the middle of the map
        let image = ax.imshow(
            Grid2D::from_fn(&[0.0, 1.0], &[0.0, 1.0], |_, _| 1.0),
            [0.0, 1.0, 0.0, 1.0],
            ColorScale::new(0.0, 2.0),
        );
        crate::colorbar::colorbar(ax, image, "c").unwrap();

        let svg = render(&figure).to_ascii_lowercase();
        let hex = |color: Color| {
            let (r, g, b) = color.to_rgb8();
            format!("#{r:02x}{g:02x}{b:02x}")
        };
        let cmap = crate::colormap::viridis();
        assert!(svg.contains(&hex(cmap.sample(0.0))));
        assert!(svg.contains(&hex(cmap.sample(1.0))));
    }

    #[test]
    fn test_line_outside_view_is_skipped() {
        let mut figure = Figure::new(5.3, 4.0);
        let ax = figure.add_axes(Rect::new(0.15, 0.15, 0.6, 0.6));
        ax.plot(vec![0.0, 1.0], vec![5.0, 6.0], Color::BLACK);
        ax.y.set_limits(-1.0, 1.0);
        assert!(!render(&figure).contains("stroke=\"#000000\""));
    }
}
