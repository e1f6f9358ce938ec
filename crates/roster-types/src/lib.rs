//! Foundation types for Roster.
//!
//! This crate provides the record types shared by the store and the CLI.
//! Every other Roster crate depends on `roster-types`.
//!
//! # Key Types
//!
//! - [`StudentId`] -- Unique, immutable key of a student record
//! - [`Student`] -- A single student record as persisted on disk
//! - [`StudentPatch`] -- Partial update with one optional slot per mutable field

pub mod identity;
pub mod patch;
pub mod student;

pub use identity::StudentId;
pub use patch::StudentPatch;
pub use student::Student;
