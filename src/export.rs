//! Packed-array disk export
//!
//! Buffers are written in native byte order, intended for same-host GPU
//! upload rather than interchange.

use std::fs;
use std::path::Path;

use crate::core::types::Result;

/// Write a packed 64-bit node array as raw bytes
pub fn write_packed_u64(path: &Path, words: &[u64]) -> Result<()> {
    fs::write(path, bytemuck::cast_slice::<u64, u8>(words))?;
    Ok(())
}

/// Write a packed 32-bit node array as raw bytes
pub fn write_packed_u32(path: &Path, words: &[u32]) -> Result<()> {
    fs::write(path, bytemuck::cast_slice::<u32, u8>(words))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_u64_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nodes.bin");
        let words: Vec<u64> = vec![0xDEAD_BEEF_0000_0001, 42, u64::MAX];

        write_packed_u64(&path, &words).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(bytes.len(), words.len() * 8);
        let restored: Vec<u64> = bytemuck::pod_collect_to_vec(&bytes);
        assert_eq!(restored, words);
    }

    #[test]
    fn test_write_u32_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nodes32.bin");
        let words: Vec<u32> = vec![0xFF00_0001, 0, u32::MAX];

        write_packed_u32(&path, &words).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(bytes.len(), words.len() * 4);
        let restored: Vec<u32> = bytemuck::pod_collect_to_vec(&bytes);
        assert_eq!(restored, words);
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let result = write_packed_u64(Path::new("/nonexistent/dir/nodes.bin"), &[1, 2, 3]);
        assert!(matches!(result, Err(crate::core::Error::Io(_))));
    }
}
