//! Utility functions for rqc-step
//!
//! Small filesystem and naming helpers shared by the filter step and the
//! local packer.

use std::fs;
use std::io;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Create `path` and any missing parents. Succeeds if it already exists.
pub fn mkdir<P: AsRef<Path>>(path: P) -> io::Result<()> {
    fs::create_dir_all(path)
}

/// Milliseconds since the Unix epoch, `0` if the clock is before it.
pub fn timestamp_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// `<prefix>_<millis>_<uuid>`: sortable by creation time, unique even when
/// two names are made in the same millisecond.
pub fn unique_name(prefix: &str) -> String {
    format!("{}_{}_{}", prefix, timestamp_millis(), Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_mkdir_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");

        mkdir(&nested).unwrap();
        mkdir(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_unique_name_shape() {
        let name = unique_name("dummy_rqcfilter_output");
        let rest = name.strip_prefix("dummy_rqcfilter_output_").unwrap();
        let (millis, id) = rest.split_once('_').unwrap();

        assert!(millis.parse::<u128>().is_ok());
        assert_eq!(id.len(), 32);
        assert!(Uuid::parse_str(id).is_ok());
    }

    #[test]
    fn test_unique_name_differs_within_same_millisecond() {
        let names: Vec<String> = (0..100).map(|_| unique_name("x")).collect();
        let mut deduped = names.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), names.len());
    }
}
