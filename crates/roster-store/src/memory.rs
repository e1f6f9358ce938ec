//! In-memory backend for testing and ephemeral use.
//!
//! [`InMemoryBackend`] keeps the last saved snapshot in a `Vec` protected by
//! a `RwLock`. Data is lost when the backend is dropped. It counts saves and
//! can be told to fail them, which lets tests observe the store's
//! persist-after-every-mutation and rollback behaviour.

use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use roster_types::Student;

use crate::error::{StoreError, StoreResult};
use crate::traits::RecordBackend;

/// An in-memory implementation of [`RecordBackend`].
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    snapshot: RwLock<Vec<Student>>,
    saves: AtomicUsize,
    fail_saves: AtomicBool,
}

impl InMemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend that already holds `students`.
    pub fn with_records(students: Vec<Student>) -> Self {
        Self {
            snapshot: RwLock::new(students),
            ..Self::default()
        }
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Make every following `save` fail with an I/O error (or stop doing so).
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Copy of the last saved snapshot.
    pub fn snapshot(&self) -> StoreResult<Vec<Student>> {
        let snapshot = self
            .snapshot
            .read()
            .map_err(|e| StoreError::Serialization(format!("lock poisoned: {e}")))?;
        Ok(snapshot.clone())
    }
}

impl RecordBackend for InMemoryBackend {
    fn load(&self) -> StoreResult<Vec<Student>> {
        self.snapshot()
    }

    fn save(&self, students: &[Student]) -> StoreResult<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(io::Error::other("injected save failure").into());
        }
        let mut snapshot = self
            .snapshot
            .write()
            .map_err(|e| StoreError::Serialization(format!("lock poisoned: {e}")))?;
        *snapshot = students.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
