//! Cliphub Storage Library
//!
//! This crate provides the object-store gateway abstraction and its
//! implementations: S3 (and S3-compatible providers) and the local
//! filesystem, plus an in-memory double for tests.
//!
//! # Object id format
//!
//! Object ids double as storage keys: `videos/{uuid}.{ext}`. Ids must not
//! contain `..` or a leading `/`. Id generation is centralized in the `keys`
//! module so the lifecycle manager and all backends stay consistent. The
//! caller picks the id *before* the upload, which is what makes best-effort
//! cleanup of a timed-out upload possible at all.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod test_helpers;
pub mod traits;

// Re-export commonly used types
pub use cliphub_core::StorageBackend;
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
