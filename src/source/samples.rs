//! Consume-once samples file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::SamplesSnapshot;
use crate::error::ForwardError;

/// Picks up the samples file each time the game drops a new one.
///
/// The producer writes the file atomically; a file that exists is assumed
/// complete. After a successful read and parse the file is deleted, which
/// tells the producer it may write the next one.
#[derive(Debug)]
pub struct SampleIngester {
    path: PathBuf,
}

impl SampleIngester {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the path being monitored.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Take the samples file if one is waiting.
    ///
    /// Returns `Ok(None)` when there is no file. A file that fails to parse
    /// is left in place; a failed delete discards the parsed samples.
    pub fn take_if_available(&self) -> Result<Option<SamplesSnapshot>, ForwardError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ForwardError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let samples: SamplesSnapshot =
            serde_json::from_str(&content).map_err(|source| ForwardError::Parse {
                path: self.path.clone(),
                source,
            })?;

        fs::remove_file(&self.path).map_err(|source| ForwardError::Remove {
            path: self.path.clone(),
            source,
        })?;

        debug!(
            path = %self.path.display(),
            entities = samples.entities.len(),
            "consumed samples file"
        );
        Ok(Some(samples))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLES: &str = r#"{
        "entities": [{
            "settings": { "name": "my_metric", "tags": "", "absent_signals": "ignore" },
            "red_signals": [{ "signal": { "type": "item", "name": "coal" }, "count": 2 }]
        }]
    }"#;

    #[test]
    fn test_missing_file_is_not_ready() {
        let dir = TempDir::new().unwrap();
        let ingester = SampleIngester::new(dir.path().join("samples.json"));

        assert!(ingester.take_if_available().unwrap().is_none());
    }

    #[test]
    fn test_take_reads_and_deletes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("samples.json");
        fs::write(&path, SAMPLES).unwrap();

        let ingester = SampleIngester::new(&path);
        let samples = ingester.take_if_available().unwrap().unwrap();
        assert_eq!(samples.entities.len(), 1);
        assert_eq!(samples.entities[0].settings.name, "my_metric");
        assert!(!path.exists());

        // Consumed exactly once.
        assert!(ingester.take_if_available().unwrap().is_none());
    }

    #[test]
    fn test_invalid_json_is_kept() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("samples.json");
        fs::write(&path, "not valid json").unwrap();

        let ingester = SampleIngester::new(&path);
        let err = ingester.take_if_available().unwrap_err();
        assert!(matches!(err, ForwardError::Parse { .. }));
        assert!(path.exists());
    }

    #[test]
    fn test_directory_in_place_of_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("samples.json");
        fs::create_dir(&path).unwrap();

        let ingester = SampleIngester::new(&path);
        let err = ingester.take_if_available().unwrap_err();
        assert!(matches!(err, ForwardError::Read { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_delete_is_remove_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("samples.json");
        fs::write(&path, SAMPLES).unwrap();
        fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o555)).unwrap();

        // Root ignores directory permissions; nothing to check there.
        if fs::write(dir.path().join("writable"), "").is_ok() {
            fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let ingester = SampleIngester::new(&path);
        let result = ingester.take_if_available();
        fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o755)).unwrap();

        let err = result.unwrap_err();
        assert!(matches!(err, ForwardError::Remove { .. }));
        assert!(path.exists());
    }
}
