//! Density evaluation and compositing.

pub mod compositor;
pub mod evaluator;

pub use compositor::{composite, compute_layers, CompositeInput};
pub use evaluator::{evaluate_density, FoliageEvaluator};
