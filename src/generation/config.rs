//! Declarative scene configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::sphere::SphereParams;
use super::terrain::TerrainParams;
use crate::core::error::Error;
use crate::core::types::Result;

/// Description of a buildable scene
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneParams {
    /// Root cube edge length in world units
    pub size: f32,
    /// Maximum subdivision depth
    pub max_depth: u8,
    /// Optional terrain layer
    pub terrain: Option<TerrainParams>,
    /// Spheres to stamp into the scene
    pub spheres: Vec<SphereParams>,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            size: 1.0,
            max_depth: 8,
            terrain: Some(TerrainParams::default()),
            spheres: Vec::new(),
        }
    }
}

impl SceneParams {
    /// Load scene parameters from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| Error::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_scene() {
        let params = SceneParams::default();
        assert_eq!(params.size, 1.0);
        assert_eq!(params.max_depth, 8);
        assert!(params.terrain.is_some());
    }

    #[test]
    fn test_json_roundtrip() {
        let params = SceneParams::default();
        let json = serde_json::to_string(&params).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let loaded = SceneParams::from_json_file(file.path()).unwrap();
        assert_eq!(loaded.size, params.size);
        assert_eq!(loaded.max_depth, params.max_depth);
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        match SceneParams::from_json_file(file.path()) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other.map(|_| ())),
        }
    }
}
