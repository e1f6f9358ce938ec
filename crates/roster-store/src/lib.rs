//! Record store for Roster.
//!
//! This crate owns the in-memory sequence of [`Student`] records and keeps
//! it synchronized with durable storage. Every successful mutation is
//! followed by a full rewrite of the backing snapshot.
//!
//! # Storage Backends
//!
//! All backends implement the [`RecordBackend`] trait:
//!
//! - [`JsonFileBackend`] -- JSON array on disk, replaced atomically on save
//! - [`InMemoryBackend`] -- `RwLock`-guarded snapshot for tests and embedding
//!
//! # Design Rules
//!
//! 1. No two records share a `student_id`.
//! 2. Records keep insertion order; updates never reorder, deletes remove in place.
//! 3. After a completed operation memory and storage hold the same sequence.
//!    A mutation whose save fails is rolled back before the error is returned.
//! 4. All I/O errors are propagated, never retried.
//!
//! [`Student`]: roster_types::Student

pub mod config;
pub mod error;
pub mod file;
pub mod memory;
pub mod store;
pub mod traits;

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use file::JsonFileBackend;
pub use memory::InMemoryBackend;
pub use store::RecordStore;
pub use traits::RecordBackend;
