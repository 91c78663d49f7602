//! Shared helpers for integration tests

#![allow(dead_code)]

use implore_figure::{compose, Figure, FigureConfig, NoiseSource};

/// Panel order produced by the composer
pub const HEATMAP: usize = 0;
pub const SCATTER: usize = 1;
pub const SIN: usize = 2;
pub const COS: usize = 3;
pub const TAN: usize = 4;

/// The default figure with a fixed seed
pub fn seeded_figure(seed: u64) -> Figure {
    compose(&FigureConfig::default(), &mut NoiseSource::seeded(seed)).expect("default figure composes")
}
