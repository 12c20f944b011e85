//! Refresh orchestration: settings, chunking, deferred change requests and
//! the per-terrain foliage owner.

pub mod chunks;
pub mod dirty;
pub mod settings;
pub mod terrain;

pub use chunks::{split, ChunkProgress, ChunkedRefresh, MAX_CHUNKS_PER_AXIS};
pub use dirty::DirtyRegions;
pub use settings::RefreshSettings;
pub use terrain::FoliageTerrain;
