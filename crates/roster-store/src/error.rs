//! Error types for record store operations.

use std::path::PathBuf;

use roster_types::StudentId;
use thiserror::Error;

/// Errors that can occur during record store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record has the given id.
    #[error("Student with ID {student_id} not found!")]
    NotFound { student_id: StudentId },

    /// A record with this id already exists.
    #[error("Student with ID {student_id} already exists!")]
    DuplicateKey { student_id: StudentId },

    /// The backing file exists but does not hold a valid record array.
    #[error("malformed record file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The backing snapshot holds the same id more than once.
    #[error("corrupt record store {location}: student ID {student_id} appears more than once")]
    Corrupt {
        location: String,
        student_id: StudentId,
    },

    /// Records could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The temporary file could not be moved over the target.
    #[error("failed to replace {}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O error while reading or writing the backing file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Returns `true` for failures of the storage layer, as opposed to
    /// rejected operations that leave the store untouched.
    pub fn is_storage(&self) -> bool {
        !matches!(self, Self::NotFound { .. } | Self::DuplicateKey { .. })
    }
}

/// Convenience alias for store results.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_messages_name_the_id() {
        let err = StoreError::NotFound { student_id: "S9".into() };
        assert_eq!(err.to_string(), "Student with ID S9 not found!");
        let err = StoreError::DuplicateKey { student_id: "S1".into() };
        assert_eq!(err.to_string(), "Student with ID S1 already exists!");
    }

    #[test]
    fn storage_classification() {
        assert!(!StoreError::NotFound { student_id: "a".into() }.is_storage());
        assert!(!StoreError::DuplicateKey { student_id: "a".into() }.is_storage());
        assert!(StoreError::Serialization("x".into()).is_storage());
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(StoreError::from(io).is_storage());
        let corrupt = StoreError::Corrupt {
            location: "students.json".into(),
            student_id: "S1".into(),
        };
        assert!(corrupt.is_storage());
    }

    #[test]
    fn persist_keeps_io_error_as_source() {
        use std::error::Error as _;

        let err = StoreError::Persist {
            path: PathBuf::from("students.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "failed to replace students.json");
        assert_eq!(err.source().unwrap().to_string(), "denied");
    }
}
