//! Panel generators
//!
//! Each generator receives the axes it draws on, records its artists,
//! labels, ticks, legend and colorbar there, and returns. None of them
//! keep state between calls.

pub mod heatmap;
pub mod scatter;
pub mod trig;

pub use scatter::ScatterGroups;
pub use trig::{PhaseCurve, TrigFunction};
