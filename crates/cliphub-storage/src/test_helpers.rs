//! In-memory Storage implementation for testing
//!
//! Keeps objects in a HashMap and supports failure injection and call
//! counting, so tests can exercise the lifecycle manager's compensation
//! paths without a real backend.

use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// In-memory storage double.
#[derive(Default)]
pub struct MemoryStorage {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    fail_put: AtomicBool,
    fail_remove: AtomicBool,
    put_delay: Mutex<Option<Duration>>,
    put_calls: AtomicUsize,
    remove_calls: AtomicUsize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `put_object` calls fail.
    pub fn set_fail_put(&self, fail: bool) {
        self.fail_put.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `remove_object` calls fail.
    pub fn set_fail_remove(&self, fail: bool) {
        self.fail_remove.store(fail, Ordering::SeqCst);
    }

    /// Delay every `put_object` by the given duration (for timeout tests).
    pub fn set_put_delay(&self, delay: Duration) {
        *self.put_delay.lock().unwrap() = Some(delay);
    }

    /// Check if an object exists (for test assertions)
    pub fn has_object(&self, object_id: &str) -> bool {
        self.objects.lock().unwrap().contains_key(object_id)
    }

    /// Number of stored objects
    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    /// Number of `put_object` calls made so far
    pub fn put_calls(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }

    /// Number of `remove_object` calls made so far
    pub fn remove_calls(&self) -> usize {
        self.remove_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn put_object(
        &self,
        object_id: &str,
        _content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<String> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);

        let delay = *self.put_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_put.load(Ordering::SeqCst) {
            return Err(StorageError::UploadFailed(
                "injected upload failure".to_string(),
            ));
        }

        self.objects
            .lock()
            .unwrap()
            .insert(object_id.to_string(), data);
        Ok(format!("https://media.example.com/{}", object_id))
    }

    async fn remove_object(&self, object_id: &str) -> StorageResult<()> {
        self.remove_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_remove.load(Ordering::SeqCst) {
            return Err(StorageError::DeleteFailed(
                "injected delete failure".to_string(),
            ));
        }

        self.objects.lock().unwrap().remove(object_id);
        Ok(())
    }

    async fn exists(&self, object_id: &str) -> StorageResult<bool> {
        Ok(self.objects.lock().unwrap().contains_key(object_id))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
