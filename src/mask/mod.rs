//! Per-cell rasters for masks and density layers.
//!
//! Brush masks and tree exclusion masks are computed over a region's detail
//! rectangle and combined cell-by-cell with density grids during
//! compositing.

pub mod grid;
pub mod trees;

pub use grid::Grid;
pub use trees::{build_tree_mask, DEFAULT_TREE_BLEND_RANGE, DEFAULT_TREE_PADDING};
