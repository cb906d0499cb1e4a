//! Repository trait definitions.

pub mod roadmap;

pub use roadmap::RoadmapRepository;
