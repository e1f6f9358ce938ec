//! The [`RecordBackend`] trait defining the persistence interface.

use roster_types::Student;

use crate::error::StoreResult;

/// Persistence backend for the record store.
///
/// A backend deals in whole snapshots only: `load` returns the complete
/// ordered sequence and `save` replaces it. Implementations must:
/// - preserve record order exactly,
/// - leave the previous snapshot intact when `save` fails,
/// - propagate every I/O error.
pub trait RecordBackend: Send + Sync {
    /// Read the full snapshot. A backend with nothing stored yet returns
    /// an empty vector.
    fn load(&self) -> StoreResult<Vec<Student>>;

    /// Replace the stored snapshot with `students`.
    fn save(&self, students: &[Student]) -> StoreResult<()>;

    /// Human-readable location, for logs and messages.
    fn location(&self) -> String;
}
