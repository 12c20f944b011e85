//! Terrain coordinate model and host storage

pub mod host;
pub use host::{AlphaSamples, DetailScatterMode, SurfaceLayer, TerrainDimensions, TerrainHost, TreeInstance};

pub mod region;
pub use region::{TerrainRegion, DEFAULT_BOUNDS_PADDING};

pub mod position;
pub use position::TerrainPosition;

pub mod memory;
pub use memory::MemoryTerrain;

pub mod generator;
pub use generator::{HeightGenerator, HeightParams};
