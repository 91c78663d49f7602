//! 2D axis system
//!
//! Provides tick mark calculation, label formatting, view limits and the
//! data-to-pixel transform used by the renderer.

use serde::{Deserialize, Serialize};

/// A requested tick: position in data coordinates plus an optional label
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub value: f64,
    pub label: Option<String>,
}

impl Tick {
    pub fn new(value: f64) -> Self {
        Self { value, label: None }
    }

    pub fn labeled(value: f64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: Some(label.into()),
        }
    }
}

/// How ticks are chosen for an axis
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum TickSpec {
    /// "Nice" steps of 1, 2 or 5 times a power of ten
    #[default]
    Auto,
    /// Exactly these ticks
    Fixed(Vec<Tick>),
}

/// Configuration for one axis of an axes
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    /// Label for the axis
    pub label: Option<String>,

    /// Fixed view limits; `None` derives them from the data
    pub limits: Option<(f64, f64)>,

    /// Tick selection
    pub ticks: TickSpec,
}

impl AxisConfig {
    /// Set the axis label
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }

    /// Fix the view limits
    pub fn set_limits(&mut self, min: f64, max: f64) {
        self.limits = Some((min, max));
    }

    /// Use unlabeled fixed ticks (labels are formatted from the values)
    pub fn set_ticks(&mut self, values: impl IntoIterator<Item = f64>) {
        self.ticks = TickSpec::Fixed(values.into_iter().map(Tick::new).collect());
    }

    /// Use fixed ticks with explicit labels
    pub fn set_labeled_ticks<S: Into<String>>(&mut self, ticks: impl IntoIterator<Item = (f64, S)>) {
        self.ticks = TickSpec::Fixed(
            ticks
                .into_iter()
                .map(|(value, label)| Tick::labeled(value, label))
                .collect(),
        );
    }
}

/// A resolved tick mark on an axis
#[derive(Clone, Debug, PartialEq)]
pub struct TickMark {
    /// Position in data coordinates
    pub value: f64,

    /// Position in normalized coordinates (0.0 to 1.0)
    pub normalized: f64,

    /// Label text
    pub label: String,
}

/// Calculate the visible tick marks for a view range
pub fn calculate_ticks(spec: &TickSpec, min: f64, max: f64) -> Vec<TickMark> {
    let range = max - min;
    if !(range > 0.0) {
        return vec![];
    }

    let tolerance = range * 1e-9;
    match spec {
        TickSpec::Auto => nice_tick_values(min, max)
            .into_iter()
            .map(|value| TickMark {
                value,
                normalized: ((value - min) / range).clamp(0.0, 1.0),
                label: format_number(value),
            })
            .collect(),
        TickSpec::Fixed(ticks) => ticks
            .iter()
            .filter(|t| t.value >= min - tolerance && t.value <= max + tolerance)
            .map(|t| TickMark {
                value: t.value,
                normalized: ((t.value - min) / range).clamp(0.0, 1.0),
                label: t.label.clone().unwrap_or_else(|| format_number(t.value)),
            })
            .collect(),
    }
}

fn nice_tick_values(min: f64, max: f64) -> Vec<f64> {
    let range = max - min;

    let rough_step = range / 5.0;
    let magnitude = 10.0_f64.powf(rough_step.abs().log10().floor());
    let residual = rough_step / magnitude;

    let nice_step = if residual <= 1.5 {
        1.0 * magnitude
    } else if residual <= 3.0 {
        2.0 * magnitude
    } else if residual <= 7.0 {
        5.0 * magnitude
    } else {
        10.0 * magnitude
    };

    let first = (min / nice_step).ceil() as i64;
    let last = ((max + nice_step * 0.001) / nice_step).floor() as i64;

    // Multiplying the index avoids accumulating float error
    (first..=last)
        .map(|i| {
            let v = i as f64 * nice_step;
            if v.abs() < nice_step * 1e-9 {
                0.0
            } else {
                v
            }
        })
        .collect()
}

/// Format a number for a tick label
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else if value.abs() >= 10000.0 || value.abs() < 0.01 {
        format!("{:.2e}", value)
    } else if value.fract().abs() < 1e-10 {
        format!("{:.0}", value)
    } else {
        let s = format!("{:.2}", value);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Expand a data range by a relative margin on both sides
///
/// A degenerate range is widened to ±0.5 around its value.
pub fn padded_range(min: f64, max: f64, margin: f64) -> (f64, f64) {
    if !(min.is_finite() && max.is_finite()) {
        return (0.0, 1.0);
    }
    let span = max - min;
    if span <= 0.0 {
        return (min - 0.5, max + 0.5);
    }
    (min - span * margin, max + span * margin)
}

/// Pixel-space layout of one axes' data area
#[derive(Clone, Debug)]
pub struct AxisLayout {
    /// Plot area in pixels (x, y, width, height), y pointing down
    pub plot_area: [f64; 4],

    /// View limits
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

impl AxisLayout {
    pub fn new(plot_area: [f64; 4], x_range: (f64, f64), y_range: (f64, f64)) -> Self {
        Self {
            plot_area,
            x_range,
            y_range,
        }
    }

    /// Transform data coordinates to pixel coordinates
    pub fn data_to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        let x_norm = (x - self.x_range.0) / (self.x_range.1 - self.x_range.0);
        let y_norm = (y - self.y_range.0) / (self.y_range.1 - self.y_range.0);

        let px = self.plot_area[0] + x_norm * self.plot_area[2];
        let py = self.plot_area[1] + (1.0 - y_norm) * self.plot_area[3]; // Y is flipped

        (px, py)
    }

    /// Whether a data point falls inside the view
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (x0, x1) = self.x_range;
        let (y0, y1) = self.y_range;
        x >= x0.min(x1) && x <= x0.max(x1) && y >= y0.min(y1) && y <= y0.max(y1)
    }

    /// Clip a data-space segment to the view (Liang-Barsky)
    pub fn clip_segment(&self, a: (f64, f64), b: (f64, f64)) -> Option<((f64, f64), (f64, f64))> {
        if !(a.0.is_finite() && a.1.is_finite() && b.0.is_finite() && b.1.is_finite()) {
            return None;
        }
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let (x0, x1) = (self.x_range.0.min(self.x_range.1), self.x_range.0.max(self.x_range.1));
        let (y0, y1) = (self.y_range.0.min(self.y_range.1), self.y_range.0.max(self.y_range.1));

        let mut t0 = 0.0_f64;
        let mut t1 = 1.0_f64;
        for (p, q) in [
            (-dx, a.0 - x0),
            (dx, x1 - a.0),
            (-dy, a.1 - y0),
            (dy, y1 - a.1),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
            if t0 > t1 {
                return None;
            }
        }

        Some((
            (a.0 + t0 * dx, a.1 + t0 * dy),
            (a.0 + t1 * dx, a.1 + t1 * dy),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_ticks() {
        let ticks = calculate_ticks(&TickSpec::Auto, 0.0, 10.0);
        let values: Vec<f64> = ticks.iter().map(|t| t.value).collect();
        assert_eq!(values, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    }

    #[test]
    fn test_auto_ticks_colorbar_range() {
        let ticks = calculate_ticks(&TickSpec::Auto, 0.0, 1.0);
        let labels: Vec<&str> = ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["0", "0.2", "0.4", "0.6", "0.8", "1"]);
    }

    #[test]
    fn test_fixed_ticks_filtered_to_view() {
        let mut axis = AxisConfig::default();
        axis.set_ticks([-3.0, 0.0, 3.0, 9.0]);
        let ticks = calculate_ticks(&axis.ticks, -3.0, 3.0);
        assert_eq!(ticks.len(), 3);
        assert_eq!(ticks[0].label, "-3");
        assert_eq!(ticks[2].normalized, 1.0);
    }

    #[test]
    fn test_labeled_ticks_keep_labels() {
        let mut axis = AxisConfig::default();
        axis.set_labeled_ticks([(0.0, "0"), (std::f64::consts::PI, "π")]);
        let ticks = calculate_ticks(&axis.ticks, 0.0, 4.0 * std::f64::consts::PI);
        assert_eq!(ticks[1].label, "π");
    }

    #[test]
    fn test_empty_range_has_no_ticks() {
        assert!(calculate_ticks(&TickSpec::Auto, 1.0, 1.0).is_empty());
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(123.0), "123");
        assert_eq!(format_number(-2.0), "-2");
        assert_eq!(format_number(0.25), "0.25");
        assert!(format_number(12345678.0).contains('e'));
    }

    #[test]
    fn test_padded_range() {
        assert_eq!(padded_range(0.0, 10.0, 0.05), (-0.5, 10.5));
        assert_eq!(padded_range(2.0, 2.0, 0.05), (1.5, 2.5));
    }

    #[test]
    fn test_axis_layout_transform() {
        let layout = AxisLayout::new([60.0, 20.0, 320.0, 230.0], (0.0, 100.0), (0.0, 100.0));

        let (px, py) = layout.data_to_pixel(50.0, 50.0);
        assert!((px - 220.0).abs() < 1e-9);
        assert!((py - 135.0).abs() < 1e-9);

        // y grows downwards in pixel space
        let (_, top) = layout.data_to_pixel(0.0, 100.0);
        assert_eq!(top, 20.0);
    }

    #[test]
    fn test_clip_segment() {
        let layout = AxisLayout::new([0.0, 0.0, 100.0, 100.0], (0.0, 1.0), (-1.0, 1.0));

        let (a, b) = layout.clip_segment((0.1, 0.0), (0.2, 0.5)).unwrap();
        assert!((a.0 - 0.1).abs() < 1e-12 && a.1.abs() < 1e-12);
        assert!((b.0 - 0.2).abs() < 1e-12 && (b.1 - 0.5).abs() < 1e-12);

        let ((_, y0), (_, y1)) = layout.clip_segment((0.5, 0.0), (0.5, 4.0)).unwrap();
        assert_eq!(y0, 0.0);
        assert_eq!(y1, 1.0);

        assert!(layout.clip_segment((0.5, 2.0), (0.6, 3.0)).is_none());
        assert!(layout.clip_segment((0.5, f64::NAN), (0.6, 0.0)).is_none());
    }
}
