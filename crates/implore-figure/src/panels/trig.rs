//! Phase-shifted trigonometric families

use std::f64::consts::{FRAC_PI_3, PI};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::colormap::cycle_color;
use crate::error::{FigureError, FigureResult};
use crate::figure::{Axes, Legend, LegendEntry, LegendGlyph, LegendLocation};

/// Samples per curve
pub const SAMPLES: usize = 100;

/// Phase shifts with their legend labels
pub const PHASES: [(f64, &str); 3] = [(0.0, "0"), (FRAC_PI_3, "π/3"), (2.0 * FRAC_PI_3, "2π/3")];

/// Symmetric y view shared by every panel
pub const Y_LIMIT: f64 = 1.05;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrigFunction {
    Sine,
    Cosine,
    Tangent,
}

impl TrigFunction {
    pub const ALL: [TrigFunction; 3] = [Self::Sine, Self::Cosine, Self::Tangent];

    /// Short name, also used as the y label
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sine => "sin",
            Self::Cosine => "cos",
            Self::Tangent => "tan",
        }
    }

    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Self::Sine => x.sin(),
            Self::Cosine => x.cos(),
            Self::Tangent => x.tan(),
        }
    }
}

impl fmt::Display for TrigFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TrigFunction {
    type Err = FigureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sin" | "sine" => Ok(Self::Sine),
            "cos" | "cosine" => Ok(Self::Cosine),
            "tan" | "tangent" => Ok(Self::Tangent),
            _ => Err(FigureError::UnknownTrigFunction(s.to_string())),
        }
    }
}

/// One phase-shifted curve
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseCurve {
    pub function: TrigFunction,
    pub phase: f64,
    pub label: &'static str,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl PhaseCurve {
    /// `f(angle - phase)`
    pub fn value_at(&self, angle: f64) -> f64 {
        self.function.eval(angle - self.phase)
    }
}

/// `n` evenly spaced values over `[start, end]`, both ends included
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// `f(x - phase)` over [0, 4π] for every phase
pub fn phase_family(function: TrigFunction) -> Vec<PhaseCurve> {
    let x = linspace(0.0, 4.0 * PI, SAMPLES);
    PHASES
        .iter()
        .map(|&(phase, label)| {
            let mut curve = PhaseCurve {
                function,
                phase,
                label,
                x: x.clone(),
                y: Vec::new(),
            };
            let y: Vec<f64> = curve.x.iter().map(|&angle| curve.value_at(angle)).collect();
            curve.y = y;
            curve
        })
        .collect()
}

/// Draw the family for `function`; only cosine gets a legend
pub fn draw(axes: &mut Axes, function: TrigFunction) -> FigureResult<()> {
    let curves = phase_family(function);

    let mut entries = Vec::with_capacity(curves.len());
    for (i, curve) in curves.into_iter().enumerate() {
        let color = cycle_color(i);
        axes.plot(curve.x, curve.y, color);
        entries.push(LegendEntry {
            label: curve.label.to_string(),
            glyph: LegendGlyph::Line { color },
        });
    }

    axes.y.set_limits(-Y_LIMIT, Y_LIMIT);
    axes.x.set_labeled_ticks(
        ["0", "π", "2π", "3π", "4π"]
            .into_iter()
            .enumerate()
            .map(|(i, label)| (i as f64 * PI, label)),
    );
    axes.set_ylabel(function.name());
    axes.set_xlabel("angle (rads.)");

    if function == TrigFunction::Cosine {
        axes.set_legend(
            Legend::new(entries)
                .with_title("phase shift")
                .with_columns(3)
                .with_location(LegendLocation::Anchored { x: -0.28, y: 1.1 }),
        );
    }

    debug!(axes = axes.id, function = %function, "drew phase family");
    Ok(())
}

/// Parse a selector such as `"tan"` and draw it
///
/// An unknown selector leaves the axes untouched.
pub fn draw_named(axes: &mut Axes, selector: &str) -> FigureResult<()> {
    let function: TrigFunction = selector.parse()?;
    draw(axes, function)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Rect;
    use rstest::rstest;

    fn axes() -> Axes {
        Axes::new(2, Rect::new(0.1, 0.1, 0.2, 0.3), (5.3, 4.0))
    }

    #[test]
    fn test_linspace_hits_end() {
        let x = linspace(0.0, 4.0 * PI, SAMPLES);
        assert_eq!(x.len(), 100);
        assert_eq!(x[0], 0.0);
        assert_eq!(x[99], 4.0 * PI);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
    }

    #[rstest]
    #[case("sin", TrigFunction::Sine)]
    #[case("cos", TrigFunction::Cosine)]
    #[case("tan", TrigFunction::Tangent)]
    #[case(" Cosine ", TrigFunction::Cosine)]
    fn test_parse(#[case] input: &str, #[case] expected: TrigFunction) {
        assert_eq!(input.parse::<TrigFunction>().unwrap(), expected);
    }

    #[test]
    fn test_display_round_trips() {
        for f in TrigFunction::ALL {
            assert_eq!(f.to_string().parse::<TrigFunction>().unwrap(), f);
        }
    }

    #[test]
    fn test_unknown_selector_draws_nothing() {
        let mut ax = axes();
        let err = draw_named(&mut ax, "sec").unwrap_err();
        assert!(matches!(err, FigureError::UnknownTrigFunction(ref s) if s == "sec"));
        assert!(ax.artists.is_empty());
        assert!(ax.y.label.is_none());
    }

    #[test]
    fn test_three_curves_in_cycle_colors() {
        let mut ax = axes();
        draw(&mut ax, TrigFunction::Sine).unwrap();
        let colors: Vec<_> = ax.lines().map(|l| l.color).collect();
        assert_eq!(colors, vec![cycle_color(0), cycle_color(1), cycle_color(2)]);
        assert_eq!(ax.y.label.as_deref(), Some("sin"));
        assert_eq!(ax.x.label.as_deref(), Some("angle (rads.)"));
        assert_eq!(ax.view_limits().1, (-1.05, 1.05));
        assert!(ax.legend.is_none());
    }

    #[test]
    fn test_cosine_legend() {
        let mut ax = axes();
        draw(&mut ax, TrigFunction::Cosine).unwrap();
        let legend = ax.legend.as_ref().unwrap();
        assert_eq!(legend.labels(), vec!["0", "π/3", "2π/3"]);
        assert_eq!(legend.title.as_deref(), Some("phase shift"));
        assert_eq!(legend.columns, 3);
        assert_eq!(legend.location, LegendLocation::Anchored { x: -0.28, y: 1.1 });
    }

    #[test]
    fn test_tangent_has_no_legend() {
        let mut ax = axes();
        draw(&mut ax, TrigFunction::Tangent).unwrap();
        assert!(ax.legend.is_none());
        assert_eq!(ax.lines().count(), 3);
    }

    #[test]
    fn test_curves_are_shifted_right_by_phase() {
        for function in TrigFunction::ALL {
            for curve in phase_family(function) {
                for (&x, &y) in curve.x.iter().zip(&curve.y) {
                    assert_eq!(y, function.eval(x - curve.phase));
                }
            }
        }

        let sine = phase_family(TrigFunction::Sine);
        for curve in &sine {
            assert!((curve.y[0] + curve.phase.sin()).abs() < 1e-12);
        }
        // π/3 curve starts below zero, so it is a right shift
        assert!(sine[1].y[0] < 0.0);
    }

    #[test]
    fn test_value_at_phase() {
        for curve in phase_family(TrigFunction::Sine) {
            assert!(curve.value_at(curve.phase).abs() < 1e-12);
        }
        for curve in phase_family(TrigFunction::Cosine) {
            assert!((curve.value_at(curve.phase) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_drawn_lines_carry_family() {
        let mut ax = axes();
        draw(&mut ax, TrigFunction::Cosine).unwrap();
        let family = phase_family(TrigFunction::Cosine);
        for (line, curve) in ax.lines().zip(&family) {
            assert_eq!(line.x, curve.x);
            assert_eq!(line.y, curve.y);
        }
        // first drawn line has no shift
        assert_eq!(ax.lines().next().unwrap().y[0], 1.0);
    }
}
