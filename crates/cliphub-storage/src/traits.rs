//! Storage abstraction trait
//!
//! This module defines the Storage trait that all object-store backends must
//! implement.

use crate::StorageBackend;
use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid object id: {0}")]
    InvalidId(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// All object-store backends (S3, local filesystem) must implement this
/// trait. The gateway holds no authoritative state about which objects are
/// live: liveness is inferred solely from video records pointing at an
/// object id, which is why callers must remove the object *before* dropping
/// the record that references it.
///
/// **Object id format:** `videos/{uuid}.{ext}`, generated in the `keys`
/// module. See the crate root documentation.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store an object under the given id and return its publicly
    /// addressable URL. Overwrites any existing object with the same id.
    async fn put_object(
        &self,
        object_id: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<String>;

    /// Remove an object by id. Removing an absent object is not an error,
    /// so removal is safe to retry and safe to use as compensation for an
    /// upload that may or may not have happened.
    async fn remove_object(&self, object_id: &str) -> StorageResult<()>;

    /// Check whether an object exists
    async fn exists(&self, object_id: &str) -> StorageResult<bool>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
