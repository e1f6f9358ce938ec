use std::path::PathBuf;

/// Default backing file, relative to the working directory.
pub const DEFAULT_FILE: &str = "students.json";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Backing JSON file.
    pub path: PathBuf,
    /// Spaces per indentation level in the written file.
    pub indent: usize,
    /// `fsync` the temporary file before it replaces the target.
    pub sync_on_save: bool,
}

impl StoreConfig {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_FILE),
            indent: 4,
            sync_on_save: true,
        }
    }
}
