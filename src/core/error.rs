//! Error types for voxmarch

use glam::Vec3;
use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("point {point:?} outside octree bounds [0, {size})")]
    OutOfBounds { point: Vec3, size: f32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}
