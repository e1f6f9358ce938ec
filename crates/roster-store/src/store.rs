//! The [`RecordStore`]: ordered student records plus their persistence.

use std::collections::HashSet;

use roster_types::{Student, StudentId, StudentPatch};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::traits::RecordBackend;

/// Ordered, id-unique student records synchronized to a [`RecordBackend`].
///
/// The full sequence is loaded when the store is opened and written back
/// after every successful mutation. If that write fails, the mutation is
/// undone before the error is returned, so the in-memory sequence always
/// matches the last snapshot the backend accepted.
pub struct RecordStore<B: RecordBackend> {
    backend: B,
    students: Vec<Student>,
}

impl<B: RecordBackend> std::fmt::Debug for RecordStore<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("location", &self.backend.location())
            .field("students", &self.students.len())
            .finish()
    }
}

impl<B: RecordBackend> RecordStore<B> {
    /// Open a store and load its records from `backend`.
    pub fn open(backend: B) -> StoreResult<Self> {
        let mut store = Self {
            backend,
            students: Vec::new(),
        };
        store.load()?;
        Ok(store)
    }

    /// Replace the in-memory records with the backend's snapshot.
    ///
    /// A snapshot holding the same id twice is rejected as
    /// [`StoreError::Corrupt`] and the current records are kept.
    pub fn load(&mut self) -> StoreResult<()> {
        let students = self.backend.load()?;
        if let Some(student_id) = first_duplicate(&students) {
            return Err(StoreError::Corrupt {
                location: self.backend.location(),
                student_id,
            });
        }

        info!(location = %self.backend.location(), count = students.len(), "record store loaded");
        self.students = students;
        Ok(())
    }

    /// Write the full current sequence to the backend.
    pub fn save(&self) -> StoreResult<()> {
        self.backend.save(&self.students)?;
        debug!(count = self.students.len(), "record store saved");
        Ok(())
    }

    /// Append a new record and persist.
    ///
    /// Fails with [`StoreError::DuplicateKey`] if the id is taken.
    pub fn add(&mut self, student: Student) -> StoreResult<()> {
        if self.position(student.student_id.as_str()).is_some() {
            warn!(student_id = %student.student_id, "add rejected: duplicate id");
            return Err(StoreError::DuplicateKey {
                student_id: student.student_id,
            });
        }

        let student_id = student.student_id.clone();
        self.students.push(student);
        if let Err(e) = self.save() {
            self.students.pop();
            return Err(e);
        }

        info!(student_id = %student_id, "student added");
        Ok(())
    }

    /// Apply `patch` to the record with `student_id` and persist.
    ///
    /// Only the slots present in the patch change. A patch that leaves the
    /// record as it was does not rewrite storage. Returns the updated record.
    pub fn update(&mut self, student_id: &str, patch: &StudentPatch) -> StoreResult<&Student> {
        let idx = self.require(student_id)?;

        let previous = self.students[idx].clone();
        if self.students[idx].apply(patch) {
            if let Err(e) = self.save() {
                self.students[idx] = previous;
                return Err(e);
            }
            info!(student_id, "student updated");
        } else {
            debug!(student_id, "update left record unchanged");
        }

        Ok(&self.students[idx])
    }

    /// Remove the record with `student_id` and persist. Returns the removed record.
    pub fn delete(&mut self, student_id: &str) -> StoreResult<Student> {
        let idx = self.require(student_id)?;

        let removed = self.students.remove(idx);
        if let Err(e) = self.save() {
            self.students.insert(idx, removed);
            return Err(e);
        }

        info!(student_id, "student deleted");
        Ok(removed)
    }

    /// All records in insertion order.
    pub fn list_all(&self) -> &[Student] {
        &self.students
    }

    pub fn get(&self, student_id: &str) -> Option<&Student> {
        self.position(student_id).map(|idx| &self.students[idx])
    }

    pub fn contains(&self, student_id: &str) -> bool {
        self.position(student_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn position(&self, student_id: &str) -> Option<usize> {
        self.students
            .iter()
            .position(|s| s.student_id.as_str() == student_id)
    }

    fn require(&self, student_id: &str) -> StoreResult<usize> {
        self.position(student_id).ok_or_else(|| {
            warn!(student_id, "no such student");
            StoreError::NotFound {
                student_id: StudentId::from(student_id),
            }
        })
    }
}

fn first_duplicate(students: &[Student]) -> Option<StudentId> {
    let mut seen = HashSet::with_capacity(students.len());
    let dup = students
        .iter()
        .find(|s| !seen.insert(s.student_id.as_str()))?;
    Some(dup.student_id.clone())
}
