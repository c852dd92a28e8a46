//! JSON files on disk
//!
//! Readers treat a missing file as empty. Writers go through a sibling temp
//! file and a rename, so a crash leaves either the old or the new contents.
//! Used by the JSON-file document store and the local identity provider.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::CashlyError;

fn io_error(action: &str, path: &Path, err: std::io::Error) -> CashlyError {
    CashlyError::Io(format!("Failed to {} {}: {}", action, path.display(), err))
}

/// Read a JSON value, or `T::default()` when the file does not exist yet
pub fn read_json<T, P>(path: P) -> Result<T, CashlyError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(io_error("open", path, e)),
    };

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| CashlyError::Json(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Temp file next to `path`; the rename is only atomic within one directory
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}

/// Replace the file at `path` with `data` serialized as pretty JSON
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), CashlyError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error("create directory", parent, e))?;
    }

    let staging = staging_path(path);
    let result = write_staged(&staging, data).and_then(|()| {
        fs::rename(&staging, path).map_err(|e| io_error("replace", path, e))
    });
    if result.is_err() {
        let _ = fs::remove_file(&staging);
    }
    result
}

fn write_staged<T: Serialize>(staging: &Path, data: &T) -> Result<(), CashlyError> {
    let file = File::create(staging).map_err(|e| io_error("create", staging, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)?;
    writer.flush().map_err(|e| io_error("write", staging, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| io_error("sync", staging, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_read_nonexistent_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.json");

        let data: TestData = read_json(&path).unwrap();
        assert_eq!(data, TestData::default());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");

        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };

        write_json_atomic(&path, &data).unwrap();
        let loaded: TestData = read_json(&path).unwrap();
        assert_eq!(data, loaded);
        let leftovers = fs::read_dir(temp_dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("test.json");

        write_json_atomic(&path, &TestData::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_read_invalid_json_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "not json at all").unwrap();

        let result: Result<TestData, _> = read_json(&path);
        assert!(matches!(result, Err(CashlyError::Json(_))));
    }
}
