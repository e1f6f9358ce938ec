//! JSON file backend.
//!
//! [`JsonFileBackend`] keeps the whole record sequence in one JSON array.
//! Saves never modify the target in place: the snapshot is written to a
//! temporary file in the same directory, flushed (and optionally synced),
//! then renamed over the target. A crash mid-save leaves either the old or
//! the new snapshot, never a torn one. The replacement inherits the mode of
//! the file it replaces, and with `sync_on_save` the directory is synced so
//! the rename itself is durable.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use roster_types::Student;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::traits::RecordBackend;

/// A [`RecordBackend`] persisting to a single JSON file.
#[derive(Clone, Debug)]
pub struct JsonFileBackend {
    config: StoreConfig,
}

impl JsonFileBackend {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Backend for `path` with default formatting and sync settings.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(StoreConfig::at(path))
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Directory that receives the temporary file. Must be on the same
    /// filesystem as the target for the rename to be atomic.
    fn staging_dir(&self) -> PathBuf {
        match self.config.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn encode(&self, students: &[Student], out: &mut impl Write) -> StoreResult<()> {
        let indent = vec![b' '; self.config.indent];
        let mut ser = serde_json::Serializer::with_formatter(&mut *out, PrettyFormatter::with_indent(&indent));
        students
            .serialize(&mut ser)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        out.write_all(b"\n")?;
        Ok(())
    }
}

impl RecordBackend for JsonFileBackend {
    fn load(&self) -> StoreResult<Vec<Student>> {
        let path = &self.config.path;
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "record file absent; starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let students: Vec<Student> =
            serde_json::from_str(&text).map_err(|source| StoreError::Parse {
                path: path.clone(),
                source,
            })?;

        debug!(path = %path.display(), count = students.len(), "records loaded");
        Ok(students)
    }

    fn save(&self, students: &[Student]) -> StoreResult<()> {
        let path = &self.config.path;
        let dir = self.staging_dir();
        fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            self.encode(students, &mut writer)?;
            writer.flush()?;
        }
        // The temporary file is created owner-only; keep the target's mode.
        match fs::metadata(path) {
            Ok(meta) => tmp.as_file().set_permissions(meta.permissions())?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        if self.config.sync_on_save {
            tmp.as_file().sync_all()?;
        }

        tmp.persist(path).map_err(|e| StoreError::Persist {
            path: path.clone(),
            source: e.error,
        })?;

        if self.config.sync_on_save {
            sync_dir(&dir)?;
        }

        debug!(path = %path.display(), count = students.len(), "records saved");
        Ok(())
    }

    fn location(&self) -> String {
        self.config.path.display().to_string()
    }
}

/// Make a completed rename durable.
#[cfg(unix)]
fn sync_dir(dir: &Path) -> io::Result<()> {
    fs::File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Student> {
        vec![
            Student::new("S1", "Alice", "CS", "2", "90"),
            Student::new("S2", "Bob", "EE", "3", "78"),
        ]
    }

    fn backend_in(dir: &tempfile::TempDir) -> JsonFileBackend {
        JsonFileBackend::open(dir.path().join("students.json"))
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let backend = backend_in(&dir);
        assert!(backend.load().unwrap().is_empty());
        assert!(!backend.path().exists());
    }

    #[test]
    fn save_then_load_preserves_order_and_fields() {
        let dir = tempfile::tempdir().unwrap();
        let backend = backend_in(&dir);
        backend.save(&sample()).unwrap();

        let fresh = backend_in(&dir);
        assert_eq!(fresh.load().unwrap(), sample());
    }

    #[test]
    fn written_file_is_four_space_indented_array() {
        let dir = tempfile::tempdir().unwrap();
        let backend = backend_in(&dir);
        backend.save(&sample()[..1]).unwrap();

        let text = fs::read_to_string(backend.path()).unwrap();
        let expected = "[\n    {\n        \"student_id\": \"S1\",\n        \"name\": \"Alice\",\n        \"branch\": \"CS\",\n        \"year\": \"2\",\n        \"marks\": \"90\"\n    }\n]\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn save_replaces_previous_snapshot_entirely() {
        let dir = tempfile::tempdir().unwrap();
        let backend = backend_in(&dir);
        backend.save(&sample()).unwrap();
        backend.save(&[]).unwrap();

        assert!(backend.load().unwrap().is_empty());
        assert_eq!(fs::read_to_string(backend.path()).unwrap(), "[]\n");
    }

    #[test]
    fn save_leaves_no_temporary_files() {
        let dir = tempfile::tempdir().unwrap();
        let backend = backend_in(&dir);
        backend.save(&sample()).unwrap();
        backend.save(&sample()[..1]).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("students.json")]);
    }

    #[test]
    fn save_creates_missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::open(dir.path().join("nested/data/students.json"));
        backend.save(&sample()).unwrap();
        assert_eq!(backend.load().unwrap().len(), 2);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let backend = backend_in(&dir);
        fs::write(backend.path(), "{ not json").unwrap();

        let err = backend.load().unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
        assert!(err.is_storage());
    }

    #[test]
    fn empty_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let backend = backend_in(&dir);
        fs::write(backend.path(), "").unwrap();
        assert!(matches!(backend.load(), Err(StoreError::Parse { .. })));
    }

    #[test]
    fn object_instead_of_array_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let backend = backend_in(&dir);
        fs::write(
            backend.path(),
            r#"{"student_id":"S1","name":"A","branch":"B","year":"1","marks":"2"}"#,
        )
        .unwrap();
        assert!(matches!(backend.load(), Err(StoreError::Parse { .. })));
    }

    #[test]
    fn numeric_fields_written_by_hand_are_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let backend = backend_in(&dir);
        fs::write(
            backend.path(),
            r#"[{"student_id":"S1","name":"Alice","branch":"CS","year":2,"marks":91}]"#,
        )
        .unwrap();

        let loaded = backend.load().unwrap();
        assert_eq!(loaded, vec![Student::new("S1", "Alice", "CS", "2", "91")]);
    }

    #[test]
    fn custom_indent_is_honoured() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            indent: 2,
            sync_on_save: false,
            ..StoreConfig::at(dir.path().join("s.json"))
        };
        let backend = JsonFileBackend::new(config);
        backend.save(&sample()[..1]).unwrap();

        let text = fs::read_to_string(backend.path()).unwrap();
        assert!(text.starts_with("[\n  {\n    \"student_id\""));
    }

    #[cfg(unix)]
    #[test]
    fn save_keeps_existing_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let backend = backend_in(&dir);
        fs::write(backend.path(), "[]").unwrap();
        fs::set_permissions(backend.path(), fs::Permissions::from_mode(0o644)).unwrap();

        backend.save(&sample()).unwrap();

        let mode = fs::metadata(backend.path()).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
        assert_eq!(backend.load().unwrap(), sample());
    }

    #[test]
    fn synced_save_into_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::at(dir.path().join("a/b/students.json"));
        assert!(config.sync_on_save);
        let backend = JsonFileBackend::new(config);

        backend.save(&sample()).unwrap();
        backend.save(&sample()[..1]).unwrap();
        assert_eq!(backend.load().unwrap().len(), 1);
    }

    #[test]
    fn location_is_the_file_path() {
        let backend = JsonFileBackend::open("data/students.json");
        assert_eq!(backend.location(), Path::new("data/students.json").display().to_string());
    }
}
